//! Update function for the newsletter screen.
//!
//! Every network call is spawned here and answers with a follow-up message;
//! the desk decides what the answer means. Any successful mutation ends with
//! a [`Msg::Refresh`] so the list always mirrors the backend.

use common::detail::DetailMode;
use common::editor::attachments::check_image_size;
use common::editor::description::{inline_image, insert_at};
use common::editor::{AttachmentSource, EditorMode, Field, Removal, SubmitOutcome};
use gloo_file::futures::read_as_bytes;
use gloo_file::Blob;
use common::sync::{self, NewsletterApi};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::BrowserFile;
use crate::components::toast::{show_error, show_success};
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

use super::helpers::{byte_to_utf16_idx, selection_bytes};
use super::messages::Msg;
use super::state::{EditorTab, NewsletterScreen};

pub fn update(screen: &mut NewsletterScreen, ctx: &Context<NewsletterScreen>, msg: Msg) -> bool {
    match msg {
        Msg::Refresh => {
            let ticket = screen.desk.begin_refresh();
            let api = ctx.props().api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api.list().await;
                link.send_message(Msg::Refreshed(ticket, result));
            });
            true
        }
        Msg::Refreshed(ticket, result) => {
            let was_open = screen.desk.opened().is_some();
            if let Err(message) = screen.desk.finish_refresh(ticket, result) {
                show_error(&message);
            }
            if was_open && screen.desk.opened().is_none() {
                close_top_sheet(screen.detail_ref.clone());
            }
            true
        }
        Msg::OpenCard(id) => match screen.desk.open(id) {
            Some(DetailMode::View) => {
                open_top_sheet(screen.detail_ref.clone());
                true
            }
            Some(DetailMode::Edit) => {
                screen.restart_history();
                screen.tab = EditorTab::Write;
                scroll_to_top();
                ctx.link().send_message(Msg::AutoResize);
                true
            }
            None => false,
        },
        Msg::EditPublished(id) => {
            if !screen.desk.edit(id) {
                return false;
            }
            close_top_sheet(screen.detail_ref.clone());
            screen.restart_history();
            screen.tab = EditorTab::Write;
            scroll_to_top();
            ctx.link().send_message(Msg::AutoResize);
            true
        }
        Msg::CloseDetail => {
            screen.desk.close();
            true
        }
        Msg::StartNew => {
            if screen.desk.editor.is_submitting() {
                return false;
            }
            screen.desk.start_new();
            screen.restart_history();
            true
        }
        Msg::SetField(field, value) => {
            if !screen.desk.editor.set_field(field, value.clone()) {
                return false;
            }
            if field == Field::Body {
                screen.history.record(value);
                screen.resize_body();
            }
            true
        }
        Msg::SetTab(tab) => {
            screen.tab = tab;
            if tab == EditorTab::Write {
                let link = ctx.link().clone();
                spawn_local(async move {
                    gloo_timers::future::TimeoutFuture::new(50).await;
                    link.send_message(Msg::AutoResize);
                });
            }
            true
        }
        Msg::AutoResize => {
            screen.resize_body();
            false
        }
        Msg::ApplySnippet(snippet) => {
            let Some(textarea) = screen.body_ref.cast::<HtmlTextAreaElement>() else {
                return false;
            };
            let body = screen.desk.editor.fields().body.clone();
            let (start, end) = selection_bytes(&textarea, &body);
            let (text, (word_start, word_end)) = snippet.insert(&body, start, end);
            if !screen.desk.editor.set_field(Field::Body, text.clone()) {
                return false;
            }
            textarea.set_value(&text);
            let select_start = byte_to_utf16_idx(&text, word_start);
            let select_end = byte_to_utf16_idx(&text, word_end);
            textarea.set_selection_range(select_start, select_end).ok();
            textarea.focus().ok();
            screen.history.record(text);
            true
        }
        Msg::OpenInlineImageDialog => {
            if let Some(input) = screen.inline_image_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::InlineImageSelected(file) => {
            let name = file.name();
            if let Err(rejection) = check_image_size(&name, file.size() as u64) {
                show_error(&rejection.to_string());
                return false;
            }
            let selection = match screen.body_ref.cast::<HtmlTextAreaElement>() {
                Some(textarea) => selection_bytes(&textarea, &screen.desk.editor.fields().body),
                None => {
                    let end = screen.desk.editor.fields().body.len();
                    (end, end)
                }
            };
            let mime = file.type_();
            let link = ctx.link().clone();
            spawn_local(async move {
                let bytes = read_as_bytes(&Blob::from(file))
                    .await
                    .map_err(|err| err.to_string());
                link.send_message(Msg::InlineImageRead {
                    name,
                    mime,
                    selection,
                    bytes,
                });
            });
            false
        }
        Msg::InlineImageRead {
            name,
            mime,
            selection: (start, end),
            bytes,
        } => {
            let markup = match bytes {
                Ok(bytes) => {
                    inline_image(&name, &mime, &bytes).map_err(|rejection| rejection.to_string())
                }
                Err(err) => {
                    log::error!("newsletters: reading {} failed: {}", name, err);
                    Err(format!("Could not read {}", name))
                }
            };
            let markup = match markup {
                Ok(markup) => markup,
                Err(message) => {
                    show_error(&message);
                    return false;
                }
            };
            let (text, cursor) = insert_at(&screen.desk.editor.fields().body, start, end, &markup);
            if !screen.desk.editor.set_field(Field::Body, text.clone()) {
                return false;
            }
            if let Some(textarea) = screen.body_ref.cast::<HtmlTextAreaElement>() {
                textarea.set_value(&text);
                let at = byte_to_utf16_idx(&text, cursor);
                textarea.set_selection_range(at, at).ok();
                textarea.focus().ok();
            }
            screen.history.record(text);
            true
        }
        Msg::Undo => {
            if screen.desk.editor.is_submitting() {
                return false;
            }
            match screen.history.undo().map(str::to_string) {
                Some(text) => screen.desk.editor.set_field(Field::Body, text),
                None => false,
            }
        }
        Msg::Redo => {
            if screen.desk.editor.is_submitting() {
                return false;
            }
            match screen.history.redo().map(str::to_string) {
                Some(text) => screen.desk.editor.set_field(Field::Body, text),
                None => false,
            }
        }
        Msg::OpenFileDialog => {
            if let Some(input) = screen.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FilesSelected(files) => {
            if files.is_empty() {
                return false;
            }
            let files: Vec<BrowserFile> = files.into_iter().map(BrowserFile::new).collect();
            match screen.desk.editor.stage_files(files.clone()) {
                Ok(report) => {
                    for rejection in &report.rejected {
                        show_error(&rejection.to_string());
                    }
                    release_unstaged(screen, &files);
                    if !report.accepted.is_empty() {
                        log::debug!("newsletters: staged {} image(s)", report.accepted.len());
                    }
                    true
                }
                Err(err) => {
                    files.iter().for_each(BrowserFile::release);
                    show_error(&err.to_string());
                    false
                }
            }
        }
        Msg::MoveAttachment { from, to } => match screen.desk.editor.move_attachment(from, to) {
            Ok(()) => true,
            Err(err) => {
                show_error(&err.to_string());
                false
            }
        },
        Msg::RemoveAttachment(index) => remove_attachment(screen, ctx, index),
        Msg::AttachmentDeleted { image_id, result } => {
            match result {
                Ok(()) => {
                    screen.desk.editor.confirm_attachment_delete(image_id);
                    show_success("Image removed");
                    ctx.link().send_message(Msg::Refresh);
                }
                Err(err) => {
                    screen.desk.editor.restore_attachment(image_id);
                    show_error(&err.user_message("Failed to delete image"));
                }
            }
            true
        }
        Msg::Submit(status) => match screen.desk.editor.submit(status) {
            Ok(submission) => {
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = sync::send(&api, submission).await;
                    link.send_message(Msg::Submitted(result));
                });
                true
            }
            Err(err) => {
                show_error(&err.to_string());
                false
            }
        },
        Msg::Submitted(result) => {
            let staged: Vec<BrowserFile> = staged_files(screen);
            match screen.desk.editor.complete(result) {
                Ok(SubmitOutcome::Created(newsletter)) => {
                    staged.iter().for_each(BrowserFile::release);
                    show_success(&format!("Newsletter saved as {}", newsletter.status));
                    screen.restart_history();
                    ctx.link().send_message(Msg::Refresh);
                }
                Ok(SubmitOutcome::Updated(newsletter)) => {
                    staged.iter().for_each(BrowserFile::release);
                    show_success(&format!("\"{}\" updated", newsletter.title));
                    screen.restart_history();
                    ctx.link().send_message(Msg::Refresh);
                }
                Ok(SubmitOutcome::Failed(message)) => show_error(&message),
                Err(err) => log::warn!("newsletters: {}", err),
            }
            true
        }
        Msg::Delete(id) => {
            let api = ctx.props().api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api.delete(id).await;
                link.send_message(Msg::Deleted {
                    id: Some(id),
                    result,
                });
            });
            false
        }
        Msg::ConfirmDeleteAll => {
            open_top_sheet(screen.confirm_ref.clone());
            false
        }
        Msg::DeleteAll => {
            close_top_sheet(screen.confirm_ref.clone());
            let api = ctx.props().api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api.delete_all().await;
                link.send_message(Msg::Deleted { id: None, result });
            });
            false
        }
        Msg::Deleted { id, result } => match result {
            Ok(()) => {
                let was_editing = matches!(screen.desk.editor.mode(), EditorMode::Edit(_));
                match id {
                    Some(id) => {
                        if screen.desk.opened().map(|n| n.id) == Some(id) {
                            close_top_sheet(screen.detail_ref.clone());
                        }
                        screen.desk.deleted(id);
                        show_success("Newsletter deleted");
                    }
                    None => {
                        close_top_sheet(screen.detail_ref.clone());
                        screen.desk.deleted_all();
                        show_success("All newsletters deleted");
                    }
                }
                if was_editing && screen.desk.editor.mode() == EditorMode::Create {
                    screen.restart_history();
                }
                ctx.link().send_message(Msg::Refresh);
                true
            }
            Err(err) => {
                let fallback = if id.is_some() {
                    "Failed to delete newsletter"
                } else {
                    "Failed to delete newsletters"
                };
                show_error(&err.user_message(fallback));
                false
            }
        },
    }
}

/// First phase of an attachment removal. Existing images stay in the strip,
/// marked pending, until the backend answers.
fn remove_attachment(
    screen: &mut NewsletterScreen,
    ctx: &Context<NewsletterScreen>,
    index: usize,
) -> bool {
    let file = match screen.desk.editor.attachments().iter().nth(index) {
        Some(attachment) => match &attachment.source {
            AttachmentSource::Staged { file, .. } => Some(file.clone()),
            AttachmentSource::Existing { .. } => None,
        },
        None => None,
    };
    match screen.desk.editor.remove_attachment(index) {
        Ok(Removal::Local(_)) => {
            if let Some(file) = file {
                file.release();
            }
            true
        }
        Ok(Removal::Remote(image_id)) => {
            let EditorMode::Edit(newsletter_id) = screen.desk.editor.mode() else {
                screen.desk.editor.restore_attachment(image_id);
                return true;
            };
            let api = ctx.props().api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api.delete_attachment(newsletter_id, image_id).await;
                link.send_message(Msg::AttachmentDeleted { image_id, result });
            });
            true
        }
        Err(err) => {
            show_error(&err.to_string());
            false
        }
    }
}

fn staged_files(screen: &NewsletterScreen) -> Vec<BrowserFile> {
    screen
        .desk
        .editor
        .attachments()
        .iter()
        .filter_map(|attachment| match &attachment.source {
            AttachmentSource::Staged { file, .. } => Some(file.clone()),
            AttachmentSource::Existing { .. } => None,
        })
        .collect()
}

/// Revokes the preview URLs of picked files the editor refused.
fn release_unstaged(screen: &NewsletterScreen, picked: &[BrowserFile]) {
    let kept = staged_files(screen);
    picked
        .iter()
        .filter(|file| !kept.contains(file))
        .for_each(BrowserFile::release);
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
