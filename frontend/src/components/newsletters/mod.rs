//! Newsletter screen: the composition form above the list of stored
//! newsletters.
//!
//! The editor state machine and the list live in
//! [`common::newsletters::NewsletterDesk`]; this component only turns DOM
//! events into messages, sends the desk's submissions over HTTP and feeds
//! the answers back.

use yew::prelude::*;

mod helpers;
mod messages;
mod state;
mod update;
mod view;

use crate::api::HttpApi;

pub use messages::Msg;
pub use state::NewsletterScreen;

#[derive(Properties, PartialEq, Clone)]
pub struct NewsletterProps {
    pub api: HttpApi,
}

impl Component for NewsletterScreen {
    type Message = Msg;
    type Properties = NewsletterProps;

    fn create(_ctx: &Context<Self>) -> Self {
        NewsletterScreen::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let render = update::update(self, ctx, msg);
        self.sync_unsaved();
        render
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            self.install_unload_guard();
            ctx.link().send_message(Msg::Refresh);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.remove_unload_guard();
    }
}
