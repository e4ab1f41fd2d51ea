use std::cell::Cell;
use std::rc::Rc;

use common::editor::history::TextHistory;
use common::newsletters::NewsletterDesk;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{BeforeUnloadEvent, HtmlTextAreaElement};
use yew::prelude::*;

use crate::api::BrowserFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTab {
    Write,
    Preview,
}

pub struct NewsletterScreen {
    pub desk: NewsletterDesk<BrowserFile>,
    /// Undo history of the description body.
    pub history: TextHistory,
    pub tab: EditorTab,
    pub body_ref: NodeRef,
    pub file_input_ref: NodeRef,
    pub inline_image_ref: NodeRef,
    /// Read-only modal for a published newsletter.
    pub detail_ref: NodeRef,
    pub confirm_ref: NodeRef,
    /// Guards the first-render fetch.
    pub loaded: bool,
    /// Read by the `beforeunload` listener.
    pub unsaved: Rc<Cell<bool>>,
    pub unload_guard: Option<Closure<dyn FnMut(BeforeUnloadEvent)>>,
}

impl NewsletterScreen {
    pub fn new() -> Self {
        Self {
            desk: NewsletterDesk::new(),
            history: TextHistory::default(),
            tab: EditorTab::Write,
            body_ref: NodeRef::default(),
            file_input_ref: NodeRef::default(),
            inline_image_ref: NodeRef::default(),
            detail_ref: NodeRef::default(),
            confirm_ref: NodeRef::default(),
            loaded: false,
            unsaved: Rc::new(Cell::new(false)),
            unload_guard: None,
        }
    }

    /// Starts a new undo history at the body the editor holds now. Called
    /// whenever the editor is loaded or reset.
    pub fn restart_history(&mut self) {
        self.history = TextHistory::new(self.desk.editor.fields().body.clone());
    }

    pub fn sync_unsaved(&self) {
        self.unsaved.set(self.desk.editor.is_dirty());
    }

    /// Grows the body textarea to fit its content.
    pub fn resize_body(&self) {
        if let Some(textarea) = self.body_ref.cast::<HtmlTextAreaElement>() {
            let style = textarea.style();
            let _ = style.set_property("height", "auto");
            let _ = style.set_property("height", &format!("{}px", textarea.scroll_height()));
        }
    }

    /// Asks the browser to confirm leaving the page while the form holds
    /// unsaved input.
    pub fn install_unload_guard(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let unsaved = self.unsaved.clone();
        let guard = Closure::<dyn FnMut(BeforeUnloadEvent)>::new(move |event: BeforeUnloadEvent| {
            if unsaved.get() {
                event.prevent_default();
                event.set_return_value("");
            }
        });
        if window
            .add_event_listener_with_callback("beforeunload", guard.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("newsletters: could not install unload guard");
            return;
        }
        self.unload_guard = Some(guard);
    }

    pub fn remove_unload_guard(&mut self) {
        if let (Some(guard), Some(window)) = (self.unload_guard.take(), web_sys::window()) {
            let _ = window
                .remove_event_listener_with_callback("beforeunload", guard.as_ref().unchecked_ref());
        }
    }
}
