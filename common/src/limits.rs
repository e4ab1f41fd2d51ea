/// Largest single image accepted by the newsletter editor (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Most images a newsletter may carry, counting existing and staged ones.
pub const MAX_ATTACHMENTS: usize = 5;

/// Shown when the backend rejects a newsletter save without a message.
pub const SAVE_FALLBACK_MESSAGE: &str = "Failed to save newsletter";

/// Shown when a list refresh fails without a message.
pub const LOAD_FALLBACK_MESSAGE: &str = "Failed to load newsletters. Please log in.";
