use common::model::feedback::FeedbackId;
use common::triage::BulkAction;

#[derive(Clone)]
pub enum Msg {
    SetCategory(String),
    SetRating(String),
    SetSort(String),
    SetSearch(String),
    ToggleRead(FeedbackId),
    ToggleFlag(FeedbackId),
    Delete(FeedbackId),
    ToggleSelect(FeedbackId),
    ClearSelection,
    Bulk(BulkAction),
    Open(FeedbackId),
    Close,
}
