use common::pipeline::{CategoryFilter, RatingFilter};
use common::triage::BulkAction;
use yew::prelude::*;

use crate::components::toast::{show_error, show_success};
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

use super::messages::Msg;
use super::state::FeedbackScreen;

pub fn update(screen: &mut FeedbackScreen, _ctx: &Context<FeedbackScreen>, msg: Msg) -> bool {
    let board = &mut screen.board;
    match msg {
        Msg::SetCategory(value) => {
            board.query.category = CategoryFilter::from_option(&value);
            true
        }
        Msg::SetRating(value) => {
            board.query.rating = RatingFilter::from_option(&value);
            true
        }
        Msg::SetSort(value) => match value.parse() {
            Ok(order) => {
                board.query.sort = Some(order);
                true
            }
            Err(err) => {
                log::warn!("feedback: {}", err);
                false
            }
        },
        Msg::SetSearch(value) => {
            board.query.search = value;
            true
        }
        Msg::ToggleRead(id) => board.toggle_read(id),
        Msg::ToggleFlag(id) => board.toggle_flag(id),
        Msg::Delete(id) => {
            let was_open = board.opened().map(|r| r.id) == Some(id);
            match board.delete(id) {
                Some(_) => {
                    if was_open {
                        close_top_sheet(screen.detail_ref.clone());
                    }
                    show_success("Feedback deleted");
                    true
                }
                None => false,
            }
        }
        Msg::ToggleSelect(id) => {
            board.toggle_select(id);
            true
        }
        Msg::ClearSelection => {
            board.clear_selection();
            true
        }
        Msg::Bulk(action) => {
            if board.selection().is_empty() {
                show_error("Select at least one entry first");
                return false;
            }
            let open_before = board.opened().is_some();
            let count = board.bulk(action);
            if open_before && board.opened().is_none() {
                close_top_sheet(screen.detail_ref.clone());
            }
            let message = match action {
                BulkAction::MarkRead => format!("Marked {} as read", count),
                BulkAction::Delete => format!("Deleted {} entries", count),
            };
            show_success(&message);
            true
        }
        Msg::Open(id) => {
            if board.open(id) {
                open_top_sheet(screen.detail_ref.clone());
                true
            } else {
                false
            }
        }
        Msg::Close => {
            board.close();
            true
        }
    }
}
