use common::model::feedback::{FeedbackCategory, FeedbackRecord, Rating};
use common::pipeline::{CategoryFilter, RatingFilter};
use common::triage::BulkAction;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::messages::Msg;
use super::state::FeedbackScreen;

const SORT_OPTIONS: [(&str, &str); 4] = [
    ("date-desc", "Newest first"),
    ("date-asc", "Oldest first"),
    ("rating-desc", "Highest rating"),
    ("rating-asc", "Lowest rating"),
];

pub fn view(screen: &FeedbackScreen, ctx: &Context<FeedbackScreen>) -> Html {
    let link = ctx.link();
    let visible = screen.board.visible();

    html! {
        <div class="feedback-root">
            <div class="page-header">
                <h1>{"Alumni Feedback"}</h1>
                <span class="badge">{ format!("{} unread", screen.board.unread_count()) }</span>
            </div>
            { filter_bar(screen, link) }
            { bulk_bar(screen, link) }
            if visible.is_empty() {
                <div class="empty-state">{"No feedback matches the current filters."}</div>
            } else {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th></th>
                            <th>{"Author"}</th>
                            <th>{"Category"}</th>
                            <th>{"Rating"}</th>
                            <th>{"Comment"}</th>
                            <th>{"Date"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for visible.iter().map(|record| feedback_row(screen, record, link)) }
                    </tbody>
                </table>
            }
            { detail_sheet(screen, link) }
        </div>
    }
}

fn filter_bar(screen: &FeedbackScreen, link: &Scope<FeedbackScreen>) -> Html {
    let query = &screen.board.query;
    let selected_category = match query.category {
        CategoryFilter::All => "All",
        CategoryFilter::Only(category) => category.label(),
    };
    let selected_rating = match query.rating {
        RatingFilter::All => "All".to_string(),
        RatingFilter::Exactly(rating) => rating.value().to_string(),
    };
    let selected_sort = query.sort.map(|s| s.to_string()).unwrap_or_default();

    html! {
        <div class="filter-bar">
            <input
                type="search"
                placeholder="Search by name or comment"
                value={query.search.clone()}
                oninput={link.callback(|e: InputEvent| {
                    Msg::SetSearch(e.target_unchecked_into::<HtmlInputElement>().value())
                })}
            />
            <select onchange={link.callback(|e: Event| {
                Msg::SetCategory(e.target_unchecked_into::<HtmlSelectElement>().value())
            })}>
                <option value="All" selected={selected_category == "All"}>{"All categories"}</option>
                { for FeedbackCategory::ALL.iter().map(|c| html! {
                    <option value={c.label()} selected={selected_category == c.label()}>{ c.label() }</option>
                }) }
            </select>
            <select onchange={link.callback(|e: Event| {
                Msg::SetRating(e.target_unchecked_into::<HtmlSelectElement>().value())
            })}>
                <option value="All" selected={selected_rating == "All"}>{"All ratings"}</option>
                { for (Rating::MIN..=Rating::MAX).rev().map(|stars| html! {
                    <option value={stars.to_string()} selected={selected_rating == stars.to_string()}>
                        { format!("{} stars", stars) }
                    </option>
                }) }
            </select>
            <select onchange={link.callback(|e: Event| {
                Msg::SetSort(e.target_unchecked_into::<HtmlSelectElement>().value())
            })}>
                { for SORT_OPTIONS.iter().map(|(value, label)| html! {
                    <option value={*value} selected={selected_sort == *value}>{ *label }</option>
                }) }
            </select>
        </div>
    }
}

fn bulk_bar(screen: &FeedbackScreen, link: &Scope<FeedbackScreen>) -> Html {
    let selected = screen.board.selection().len();
    if selected == 0 {
        return html! {};
    }
    html! {
        <div class="bulk-bar">
            <span>{ format!("{} selected", selected) }</span>
            <button onclick={link.callback(|_| Msg::Bulk(BulkAction::MarkRead))}>{"Mark as read"}</button>
            <button class="danger" onclick={link.callback(|_| Msg::Bulk(BulkAction::Delete))}>{"Delete"}</button>
            <button class="link" onclick={link.callback(|_| Msg::ClearSelection)}>{"Clear"}</button>
        </div>
    }
}

fn stars(rating: Rating) -> String {
    let filled = rating.value() as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(Rating::MAX as usize - filled))
}

fn feedback_row(screen: &FeedbackScreen, record: &FeedbackRecord, link: &Scope<FeedbackScreen>) -> Html {
    let id = record.id;
    let row_class = classes!(
        "feedback-row",
        (!record.is_read).then_some("unread"),
        record.is_flagged.then_some("flagged"),
    );
    html! {
        <tr class={row_class}>
            <td>
                <input
                    type="checkbox"
                    checked={screen.board.selection().contains(&id)}
                    onchange={link.callback(move |_| Msg::ToggleSelect(id))}
                />
            </td>
            <td onclick={link.callback(move |_| Msg::Open(id))}>
                <div class="author">{ record.user.clone() }</div>
                <div class="muted">{ record.email.clone() }</div>
            </td>
            <td>{ record.category.label() }</td>
            <td title={record.rating.sentiment().label()}>{ stars(record.rating) }</td>
            <td class="comment" onclick={link.callback(move |_| Msg::Open(id))}>{ record.comment.clone() }</td>
            <td>{ record.date.format("%b %d, %Y").to_string() }</td>
            <td class="actions">
                <button
                    class="icon-btn"
                    title={if record.is_read { "Mark as unread" } else { "Mark as read" }}
                    onclick={link.callback(move |_| Msg::ToggleRead(id))}
                >
                    <i class="material-icons">{ if record.is_read { "visibility_off" } else { "visibility" } }</i>
                </button>
                <button
                    class={classes!("icon-btn", record.is_flagged.then_some("active"))}
                    title={if record.is_flagged { "Unflag" } else { "Flag for follow-up" }}
                    onclick={link.callback(move |_| Msg::ToggleFlag(id))}
                >
                    <i class="material-icons">{"flag"}</i>
                </button>
                <button class="icon-btn danger" title="Delete" onclick={link.callback(move |_| Msg::Delete(id))}>
                    <i class="material-icons">{"delete"}</i>
                </button>
            </td>
        </tr>
    }
}

fn detail_sheet(screen: &FeedbackScreen, link: &Scope<FeedbackScreen>) -> Html {
    let content = match screen.board.opened() {
        Some(record) => {
            let id = record.id;
            html! {
                <div class="feedback-detail">
                    <p class="author">{ format!("{} <{}>", record.user, record.email) }</p>
                    <p class="muted">
                        { format!("{} · {} · {}", record.category, record.date.format("%B %d, %Y"), record.rating.sentiment().label()) }
                    </p>
                    <p class="stars">{ stars(record.rating) }</p>
                    <blockquote>{ record.comment.clone() }</blockquote>
                    <div class="status-chips">
                        <span class={classes!("chip", record.is_read.then_some("read"))}>
                            { if record.is_read { "Read" } else { "Unread" } }
                        </span>
                        if record.is_flagged {
                            <span class="chip flagged">{"Flagged"}</span>
                        }
                    </div>
                    <div class="dialog-actions">
                        <button onclick={link.callback(move |_| Msg::ToggleRead(id))}>
                            { if record.is_read { "Mark unread" } else { "Mark read" } }
                        </button>
                        <button onclick={link.callback(move |_| Msg::ToggleFlag(id))}>
                            { if record.is_flagged { "Unflag" } else { "Flag" } }
                        </button>
                        <button class="danger" onclick={link.callback(move |_| Msg::Delete(id))}>{"Delete"}</button>
                    </div>
                </div>
            }
        }
        None => html! {},
    };
    html! {
        <YwMaterialTopSheet
            node_ref={screen.detail_ref.clone()}
            title={Some("Feedback details".to_string())}
            on_close={link.callback(|_| Msg::Close)}
        >
            { content }
        </YwMaterialTopSheet>
    }
}
