//! Ordered image attachments of the newsletter being edited.
//!
//! An attachment is either *existing* (already stored by the backend, known
//! by its server id) or *staged* (a local file picked in this session, known
//! only by a transient [`LocalHandle`]). Removing an existing attachment
//! needs a delete request, so it goes through two phases: it is first marked
//! pending, then either dropped once the backend confirms or restored in
//! place if the request fails.

use crate::error::{EditorError, StagingRejection};
use crate::limits::{MAX_ATTACHMENTS, MAX_IMAGE_BYTES};
use crate::model::newsletter::{ImageId, NewsletterImage};

/// A file the user picked for upload. Implemented by the browser file
/// wrapper in the frontend and by fakes in tests.
pub trait StagedFile: Clone {
    fn file_name(&self) -> String;
    fn byte_len(&self) -> u64;
}

/// Rejects an image over [`MAX_IMAGE_BYTES`]. Shared by staging and by
/// inline insertion into the body.
pub fn check_image_size(file_name: &str, size: u64) -> Result<(), StagingRejection> {
    if size > MAX_IMAGE_BYTES {
        log::warn!("editor: rejecting {} ({} bytes)", file_name, size);
        return Err(StagingRejection::TooLarge {
            file_name: file_name.to_string(),
            size,
        });
    }
    Ok(())
}

/// Identity of a staged attachment within one editor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalHandle(u64);

#[derive(Debug, Clone)]
pub enum AttachmentSource<F> {
    Existing { id: ImageId, url: String },
    Staged { handle: LocalHandle, file: F },
}

#[derive(Debug, Clone)]
pub struct Attachment<F> {
    pub source: AttachmentSource<F>,
    /// Set while the delete request for an existing image is in flight.
    pub pending_delete: bool,
}

impl<F> Attachment<F> {
    pub fn server_id(&self) -> Option<ImageId> {
        match &self.source {
            AttachmentSource::Existing { id, .. } => Some(*id),
            AttachmentSource::Staged { .. } => None,
        }
    }

    pub fn handle(&self) -> Option<LocalHandle> {
        match &self.source {
            AttachmentSource::Existing { .. } => None,
            AttachmentSource::Staged { handle, .. } => Some(*handle),
        }
    }

    pub fn is_staged(&self) -> bool {
        matches!(self.source, AttachmentSource::Staged { .. })
    }
}

/// Result of staging a batch of files. Accepted and rejected files are
/// independent: one bad file never blocks the others.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StagingReport {
    pub accepted: Vec<LocalHandle>,
    pub rejected: Vec<StagingRejection>,
}

/// What removing an attachment requires from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// A staged file was dropped; nothing to tell the backend.
    Local(LocalHandle),
    /// An existing image was marked pending; the caller must issue the
    /// delete request and report back.
    Remote(ImageId),
}

#[derive(Debug, Clone)]
pub struct AttachmentList<F> {
    items: Vec<Attachment<F>>,
    next_handle: u64,
}

impl<F> Default for AttachmentList<F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_handle: 0,
        }
    }
}

impl<F: StagedFile> AttachmentList<F> {
    pub fn from_existing(images: &[NewsletterImage]) -> Self {
        Self {
            items: images
                .iter()
                .map(|image| Attachment {
                    source: AttachmentSource::Existing {
                        id: image.id,
                        url: image.image.clone(),
                    },
                    pending_delete: false,
                })
                .collect(),
            next_handle: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment<F>> {
        self.items.iter()
    }

    /// Attachments counting toward the limit, pending deletes included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validates and appends `files` in order. Each file is checked against
    /// the size limit and the remaining room; a rejected file is skipped and
    /// reported by name.
    pub fn stage(&mut self, files: impl IntoIterator<Item = F>) -> StagingReport {
        let mut report = StagingReport::default();
        for file in files {
            let file_name = file.file_name();
            if let Err(rejection) = check_image_size(&file_name, file.byte_len()) {
                report.rejected.push(rejection);
                continue;
            }
            if self.items.len() >= MAX_ATTACHMENTS {
                log::warn!("editor: rejecting {}, attachment limit reached", file_name);
                report.rejected.push(StagingRejection::TooMany { file_name });
                continue;
            }
            let handle = LocalHandle(self.next_handle);
            self.next_handle += 1;
            self.items.push(Attachment {
                source: AttachmentSource::Staged { handle, file },
                pending_delete: false,
            });
            report.accepted.push(handle);
        }
        report
    }

    /// Moves the attachment at `from` so it ends up at `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        if from >= self.items.len() {
            return Err(EditorError::NoSuchAttachment(from));
        }
        if to >= self.items.len() {
            return Err(EditorError::NoSuchAttachment(to));
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    /// First phase of removal. Staged files go away immediately; existing
    /// images are only marked pending.
    pub fn remove(&mut self, index: usize) -> Result<Removal, EditorError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(EditorError::NoSuchAttachment(index))?;
        match item.source {
            AttachmentSource::Existing { id, .. } => {
                if item.pending_delete {
                    return Err(EditorError::AlreadyPendingDelete(id));
                }
                item.pending_delete = true;
                Ok(Removal::Remote(id))
            }
            AttachmentSource::Staged { handle, .. } => {
                self.items.remove(index);
                Ok(Removal::Local(handle))
            }
        }
    }

    /// The backend deleted image `id`; drop it for good, pending or not.
    /// A reload between the two phases clears the pending mark.
    pub fn confirm_delete(&mut self, id: ImageId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.server_id() != Some(id));
        self.items.len() != before
    }

    pub fn has_pending_delete(&self) -> bool {
        self.items.iter().any(|item| item.pending_delete)
    }

    /// The delete request for image `id` failed; put it back as it was.
    pub fn restore(&mut self, id: ImageId) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| item.pending_delete && item.server_id() == Some(id))
        {
            Some(item) => {
                item.pending_delete = false;
                true
            }
            None => false,
        }
    }

    /// Files to send with the next submission: exactly the staged
    /// attachments, in their current order.
    pub fn uploads(&self) -> Vec<F> {
        self.items
            .iter()
            .filter_map(|item| match &item.source {
                AttachmentSource::Staged { file, .. } => Some(file.clone()),
                AttachmentSource::Existing { .. } => None,
            })
            .collect()
    }

    /// Position of every attachment as `(server id, local handle)`; used for
    /// dirty tracking.
    pub(crate) fn fingerprint(&self) -> String {
        self.items
            .iter()
            .map(|item| match &item.source {
                AttachmentSource::Existing { id, .. } => format!("e{}", id),
                AttachmentSource::Staged { handle, .. } => format!("s{}", handle.0),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeFile(&'static str, u64);

    impl StagedFile for FakeFile {
        fn file_name(&self) -> String {
            self.0.to_string()
        }

        fn byte_len(&self) -> u64 {
            self.1
        }
    }

    fn existing(ids: &[u64]) -> AttachmentList<FakeFile> {
        let images: Vec<_> = ids
            .iter()
            .map(|id| NewsletterImage {
                id: *id,
                image: format!("/media/{}.png", id),
            })
            .collect();
        AttachmentList::from_existing(&images)
    }

    #[test]
    fn oversized_file_is_rejected_alone() {
        let mut list = existing(&[]);
        let report = list.stage(vec![
            FakeFile("ok.png", 10),
            FakeFile("huge.png", MAX_IMAGE_BYTES + 1),
            FakeFile("fine.jpg", MAX_IMAGE_BYTES),
        ]);
        assert_eq!(report.accepted.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].file_name(), "huge.png");
        assert_eq!(list.uploads(), vec![FakeFile("ok.png", 10), FakeFile("fine.jpg", MAX_IMAGE_BYTES)]);
    }

    #[test]
    fn moving_out_of_range_is_an_error() {
        let mut list = existing(&[1, 2]);
        assert_eq!(list.move_item(0, 2), Err(EditorError::NoSuchAttachment(2)));
        assert_eq!(list.move_item(3, 0), Err(EditorError::NoSuchAttachment(3)));
        assert!(list.move_item(1, 0).is_ok());
        let order: Vec<_> = list.iter().filter_map(Attachment::server_id).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn failed_delete_restores_in_place() {
        let mut list = existing(&[4, 5, 6]);
        assert_eq!(list.remove(1), Ok(Removal::Remote(5)));
        assert_eq!(list.remove(1), Err(EditorError::AlreadyPendingDelete(5)));
        assert_eq!(list.len(), 3);

        assert!(list.restore(5));

        let order: Vec<_> = list.iter().filter_map(Attachment::server_id).collect();
        assert_eq!(order, vec![4, 5, 6]);
        assert!(list.iter().all(|a| !a.pending_delete));
    }

    #[test]
    fn confirmed_delete_drops_the_matching_image() {
        let mut list = existing(&[4, 5]);
        list.remove(0).unwrap();
        assert!(list.has_pending_delete());
        assert!(list.confirm_delete(4));
        assert!(!list.confirm_delete(9));
        let order: Vec<_> = list.iter().filter_map(Attachment::server_id).collect();
        assert_eq!(order, vec![5]);
        assert!(!list.has_pending_delete());
    }

    #[test]
    fn confirmation_after_reload_still_drops_the_image() {
        // A reload rebuilds the list without pending marks.
        let mut list = existing(&[7, 8]);
        assert!(list.confirm_delete(7));
        let order: Vec<_> = list.iter().filter_map(Attachment::server_id).collect();
        assert_eq!(order, vec![8]);
    }

    #[test]
    fn staged_removal_is_local() {
        let mut list = existing(&[]);
        let report = list.stage(vec![FakeFile("a.png", 1)]);
        assert_eq!(list.remove(0), Ok(Removal::Local(report.accepted[0])));
        assert!(list.is_empty());
    }
}
