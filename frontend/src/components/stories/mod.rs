//! Success stories: list, search, read-only modal and delete.

use common::error::ApiError;
use common::model::story::{StoryId, SuccessStory};
use common::stories::StoryBoard;
use common::store::RefreshTicket;
use common::sync::StoryApi;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpApi;
use crate::components::toast::{show_error, show_success};
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet, YwMaterialTopSheet};

pub enum Msg {
    Refresh,
    Refreshed(RefreshTicket, Result<Vec<SuccessStory>, ApiError>),
    SetSearch(String),
    Open(StoryId),
    Close,
    Delete(StoryId),
    Deleted(StoryId, Result<(), ApiError>),
}

#[derive(Properties, PartialEq, Clone)]
pub struct StoriesProps {
    pub api: HttpApi,
}

pub struct StoriesScreen {
    board: StoryBoard,
    detail_ref: NodeRef,
}

impl Component for StoriesScreen {
    type Message = Msg;
    type Properties = StoriesProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Refresh);
        Self {
            board: StoryBoard::new(),
            detail_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Refresh => {
                let ticket = self.board.begin_refresh();
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.list_stories().await;
                    link.send_message(Msg::Refreshed(ticket, result));
                });
                true
            }
            Msg::Refreshed(ticket, result) => {
                let was_open = self.board.opened().is_some();
                if let Err(message) = self.board.finish_refresh(ticket, result) {
                    show_error(&message);
                }
                if was_open && self.board.opened().is_none() {
                    close_top_sheet(self.detail_ref.clone());
                }
                true
            }
            Msg::SetSearch(search) => {
                self.board.search = search;
                true
            }
            Msg::Open(id) => {
                if self.board.open(id) {
                    open_top_sheet(self.detail_ref.clone());
                    true
                } else {
                    false
                }
            }
            Msg::Close => {
                self.board.close();
                true
            }
            Msg::Delete(id) => {
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.delete_story(id).await;
                    link.send_message(Msg::Deleted(id, result));
                });
                false
            }
            Msg::Deleted(id, Ok(())) => {
                if self.board.opened().map(|s| s.id) == Some(id) {
                    close_top_sheet(self.detail_ref.clone());
                }
                self.board.deleted(id);
                show_success("Story deleted");
                ctx.link().send_message(Msg::Refresh);
                true
            }
            Msg::Deleted(_, Err(err)) => {
                show_error(&err.user_message("Failed to delete story"));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let visible = self.board.visible();
        html! {
            <div class="stories-root">
                <div class="page-header">
                    <h1>{"Success Stories"}</h1>
                    <span class="badge">{ self.board.len() }</span>
                    <button class="icon-btn" title="Refresh" onclick={link.callback(|_| Msg::Refresh)}>
                        <i class="material-icons">{"refresh"}</i>
                    </button>
                </div>
                <div class="filter-bar">
                    <input
                        type="search"
                        placeholder="Search stories"
                        value={self.board.search.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::SetSearch(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                </div>
                if self.board.is_loading() && self.board.is_empty() {
                    <div class="spinner" />
                } else if visible.is_empty() {
                    <div class="empty-state">{"No success stories to show."}</div>
                } else {
                    <div class="card-grid">
                        { for visible.into_iter().map(|story| story_card(story, link)) }
                    </div>
                }
                { self.detail_sheet(link) }
            </div>
        }
    }
}

impl StoriesScreen {
    fn detail_sheet(&self, link: &yew::html::Scope<Self>) -> Html {
        let content = match self.board.opened() {
            Some(story) => {
                let id = story.id;
                html! {
                    <div class="story-detail">
                        if let Some(title) = &story.title {
                            <h4>{ title.clone() }</h4>
                        }
                        if let Some(created) = story.created_at {
                            <p class="muted">{ created.format("%B %d, %Y").to_string() }</p>
                        }
                        <p class="story-text">{ story.story.clone() }</p>
                        <div class="dialog-actions">
                            <button class="danger" onclick={link.callback(move |_| Msg::Delete(id))}>{"Delete"}</button>
                        </div>
                    </div>
                }
            }
            None => html! {},
        };
        html! {
            <YwMaterialTopSheet
                node_ref={self.detail_ref.clone()}
                title={self.board.opened().map(|s| s.name.clone())}
                on_close={link.callback(|_| Msg::Close)}
            >
                { content }
            </YwMaterialTopSheet>
        }
    }
}

fn story_card(story: &SuccessStory, link: &yew::html::Scope<StoriesScreen>) -> Html {
    let id = story.id;
    let excerpt: String = story.story.chars().take(160).collect();
    let truncated = excerpt.len() < story.story.len();
    html! {
        <article class="card" onclick={link.callback(move |_| Msg::Open(id))}>
            <div class="card-body">
                <h3>{ story.name.clone() }</h3>
                if let Some(title) = &story.title {
                    <p class="muted">{ title.clone() }</p>
                }
                <p>{ excerpt }{ if truncated { "…" } else { "" } }</p>
            </div>
            <button
                class="icon-btn danger"
                title="Delete"
                onclick={link.callback(move |e: MouseEvent| {
                    e.stop_propagation();
                    Msg::Delete(id)
                })}
            >
                <i class="material-icons">{"delete"}</i>
            </button>
        </article>
    }
}
