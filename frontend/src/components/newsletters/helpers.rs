//! Small utilities for the newsletter screen.
//!
//! Browser textarea APIs report selections in UTF-16 code units while the
//! editor slices UTF-8 strings, so every selection crosses one of the two
//! conversions below.

use num_format::{Locale, ToFormattedString};
use web_sys::HtmlTextAreaElement;

/// Converts a UTF-8 byte index to its UTF-16 code unit index, for
/// `set_selection_range`.
pub fn byte_to_utf16_idx(s: &str, byte_idx: usize) -> u32 {
    s[..byte_idx.min(s.len())].encode_utf16().count() as u32
}

/// Converts a UTF-16 code unit index (as reported by `selectionStart`) to a
/// UTF-8 byte index. Positions past the end map to `s.len()`.
pub fn utf16_to_byte_idx(s: &str, utf16_idx: usize) -> usize {
    let mut units = 0;
    for (byte_idx, ch) in s.char_indices() {
        if units >= utf16_idx {
            return byte_idx;
        }
        units += ch.len_utf16();
    }
    s.len()
}

/// Current selection of `textarea` as a byte range of `text`.
pub fn selection_bytes(textarea: &HtmlTextAreaElement, text: &str) -> (usize, usize) {
    let start = textarea.selection_start().ok().flatten().unwrap_or(0) as usize;
    let end = textarea.selection_end().ok().flatten().unwrap_or(0) as usize;
    let start = utf16_to_byte_idx(text, start);
    let end = utf16_to_byte_idx(text, end);
    (start.min(end), start.max(end))
}

/// File size for the attachment strip, e.g. `1,234 KB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else {
        format!("{} KB", (bytes / 1024).to_formatted_string(&Locale::en))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_conversion_handles_surrogate_pairs() {
        let text = "a😀b";
        assert_eq!(utf16_to_byte_idx(text, 1), 1);
        assert_eq!(utf16_to_byte_idx(text, 3), 5);
        assert_eq!(utf16_to_byte_idx(text, 10), text.len());
        assert_eq!(byte_to_utf16_idx(text, 5), 3);
    }

    #[test]
    fn sizes_are_grouped() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(5 * 1024 * 1024), "5,120 KB");
    }
}
