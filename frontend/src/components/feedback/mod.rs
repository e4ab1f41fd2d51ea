//! Feedback triage screen.
//!
//! Elm-style split: `state` holds the board and DOM refs, `update` applies
//! messages to it and `view` renders. All state is local; feedback has no
//! backend.

use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::FeedbackScreen;

impl Component for FeedbackScreen {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        FeedbackScreen::new(crate::fixtures::feedback())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
