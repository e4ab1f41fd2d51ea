use common::editor::description::Snippet;
use common::editor::Field;
use common::error::ApiError;
use common::model::newsletter::{ImageId, Newsletter, NewsletterId, NewsletterStatus};
use common::store::RefreshTicket;

use super::state::EditorTab;

pub enum Msg {
    Refresh,
    Refreshed(RefreshTicket, Result<Vec<Newsletter>, ApiError>),
    OpenCard(NewsletterId),
    EditPublished(NewsletterId),
    CloseDetail,
    StartNew,
    SetField(Field, String),
    SetTab(EditorTab),
    AutoResize,
    ApplySnippet(Snippet),
    Undo,
    Redo,
    OpenInlineImageDialog,
    InlineImageSelected(web_sys::File),
    /// Bytes of an inline image, to replace `selection` of the body.
    InlineImageRead {
        name: String,
        mime: String,
        selection: (usize, usize),
        bytes: Result<Vec<u8>, String>,
    },
    OpenFileDialog,
    FilesSelected(Vec<web_sys::File>),
    MoveAttachment { from: usize, to: usize },
    RemoveAttachment(usize),
    AttachmentDeleted {
        image_id: ImageId,
        result: Result<(), ApiError>,
    },
    Submit(NewsletterStatus),
    Submitted(Result<Newsletter, ApiError>),
    Delete(NewsletterId),
    ConfirmDeleteAll,
    DeleteAll,
    Deleted {
        id: Option<NewsletterId>,
        result: Result<(), ApiError>,
    },
}
