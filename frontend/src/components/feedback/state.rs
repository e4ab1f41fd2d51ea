use common::model::feedback::FeedbackRecord;
use common::triage::FeedbackBoard;
use yew::NodeRef;

pub struct FeedbackScreen {
    pub board: FeedbackBoard,
    /// Top sheet showing the opened record.
    pub detail_ref: NodeRef,
}

impl FeedbackScreen {
    pub fn new(records: Vec<FeedbackRecord>) -> Self {
        Self {
            board: FeedbackBoard::new(records),
            detail_ref: NodeRef::default(),
        }
    }
}
