//! View rendering for the newsletter screen.
//!
//! Top: the composition form with a Write/Preview tab bar over the body,
//! a formatting toolbar and the attachment strip. Bottom: the stored
//! newsletters as cards. A card opens either the form (drafts) or a
//! read-only top sheet (published).

use common::editor::description::{self, Snippet};
use common::editor::{Attachment, AttachmentSource, EditorMode, Field};
use common::limits::MAX_ATTACHMENTS;
use common::model::newsletter::{Newsletter, NewsletterStatus};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::api::{BrowserFile, HttpApi};
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::helpers::format_size;
use super::messages::Msg;
use super::state::{EditorTab, NewsletterScreen};

pub fn view(screen: &NewsletterScreen, ctx: &Context<NewsletterScreen>) -> Html {
    let link = ctx.link();
    html! {
        <div class="newsletter-root">
            <div class="page-header">
                <h1>{"Manage Newsletter"}</h1>
            </div>
            { editor_panel(screen, ctx) }
            { newsletter_list(screen, ctx) }
            { detail_sheet(screen, ctx) }
            { confirm_sheet(screen, link) }
        </div>
    }
}

fn editor_panel(screen: &NewsletterScreen, ctx: &Context<NewsletterScreen>) -> Html {
    let link = ctx.link();
    let api = &ctx.props().api;
    let editor = &screen.desk.editor;
    let fields = editor.fields();
    let busy = editor.is_submitting();
    let heading = match editor.mode() {
        EditorMode::Create => "New newsletter".to_string(),
        EditorMode::Edit(_) => format!("Editing \"{}\"", fields.title),
    };

    html! {
        <section class="editor-panel">
            <div class="panel-header">
                <h2>{ heading }</h2>
                if matches!(editor.mode(), EditorMode::Edit(_)) {
                    <button class="link" disabled={busy} onclick={link.callback(|_| Msg::StartNew)}>
                        {"Start a new one"}
                    </button>
                }
            </div>
            { text_input("Title", "title", Field::Title, &fields.title, busy, link) }
            { text_input("Subtitle", "subtitle", Field::Subtitle, &fields.subtitle, busy, link) }
            { text_input("Link (optional)", "https://", Field::Url, &fields.url, busy, link) }
            { toolbar(screen, link) }
            { tab_bar(screen, link) }
            {
                match screen.tab {
                    EditorTab::Write => body_editor(screen, link),
                    EditorTab::Preview => preview(&fields.body),
                }
            }
            { attachment_strip(screen, api, link) }
            <div class="editor-actions">
                if busy {
                    <span class="spinner" title="Saving" />
                }
                <button
                    disabled={busy}
                    onclick={link.callback(|_| Msg::Submit(NewsletterStatus::Draft))}
                >
                    {"Save as draft"}
                </button>
                <button
                    class="primary"
                    disabled={busy}
                    onclick={link.callback(|_| Msg::Submit(NewsletterStatus::Published))}
                >
                    {"Publish"}
                </button>
            </div>
        </section>
    }
}

fn text_input(
    label: &'static str,
    placeholder: &'static str,
    field: Field,
    value: &str,
    busy: bool,
    link: &Scope<NewsletterScreen>,
) -> Html {
    html! {
        <label class="form-field">
            <span>{ label }</span>
            <input
                type="text"
                placeholder={placeholder}
                value={value.to_string()}
                disabled={busy}
                oninput={link.callback(move |e: InputEvent| {
                    Msg::SetField(field, e.target_unchecked_into::<HtmlInputElement>().value())
                })}
            />
        </label>
    }
}

fn toolbar(screen: &NewsletterScreen, link: &Scope<NewsletterScreen>) -> Html {
    let busy = screen.desk.editor.is_submitting();
    let write = screen.tab == EditorTab::Write;
    let snippet = |snippet: Snippet| link.callback(move |_| Msg::ApplySnippet(snippet));
    html! {
        <div class="icon-toolbar">
            { icon_button("undo", "Undo", link.callback(|_| Msg::Undo), busy) }
            { icon_button("redo", "Redo", link.callback(|_| Msg::Redo), busy) }
            { icon_button("format_bold", "Bold", snippet(Snippet::Bold), busy || !write) }
            { icon_button("format_italic", "Italic", snippet(Snippet::Italic), busy || !write) }
            { icon_button("format_underlined", "Underline", snippet(Snippet::Underline), busy || !write) }
            { icon_button("format_list_bulleted", "List", snippet(Snippet::BulletedList), busy || !write) }
            { icon_button("link", "Link", snippet(Snippet::Link), busy || !write) }
            { icon_button("image", "Insert image", link.callback(|_| Msg::OpenInlineImageDialog), busy || !write) }
            { icon_button("add_photo_alternate", "Add images", link.callback(|_| Msg::OpenFileDialog), busy) }
            <input
                type="file"
                accept="image/*"
                multiple={true}
                style="display: none;"
                ref={screen.file_input_ref.clone()}
                onchange={link.callback(|e: Event| {
                    let input = e.target_unchecked_into::<HtmlInputElement>();
                    let mut files = Vec::new();
                    if let Some(list) = input.files() {
                        for i in 0..list.length() {
                            if let Some(file) = list.get(i) {
                                files.push(file);
                            }
                        }
                    }
                    input.set_value("");
                    Msg::FilesSelected(files)
                })}
            />
            <input
                type="file"
                accept="image/*"
                style="display: none;"
                ref={screen.inline_image_ref.clone()}
                onchange={link.batch_callback(|e: Event| {
                    let input = e.target_unchecked_into::<HtmlInputElement>();
                    let file = input.files().and_then(|list| list.get(0));
                    input.set_value("");
                    file.map(Msg::InlineImageSelected)
                })}
            />
        </div>
    }
}

fn icon_button(icon: &'static str, title: &'static str, onclick: Callback<MouseEvent>, disabled: bool) -> Html {
    html! {
        <button class="icon-btn" title={title} {onclick} {disabled}>
            <i class="material-icons">{ icon }</i>
        </button>
    }
}

fn tab_bar(screen: &NewsletterScreen, link: &Scope<NewsletterScreen>) -> Html {
    let dirty = screen.desk.editor.is_dirty();
    html! {
        <div class="tab-bar">
            <button
                class={classes!("tab-btn", (screen.tab == EditorTab::Write).then_some("active"))}
                onclick={link.callback(|_| Msg::SetTab(EditorTab::Write))}
            >
                {"Write"}
                if dirty {
                    <span class="dirty-dot" title="Unsaved changes" />
                }
            </button>
            <button
                class={classes!("tab-btn", (screen.tab == EditorTab::Preview).then_some("active"))}
                onclick={link.callback(|_| Msg::SetTab(EditorTab::Preview))}
            >
                {"Preview"}
            </button>
        </div>
    }
}

fn body_editor(screen: &NewsletterScreen, link: &Scope<NewsletterScreen>) -> Html {
    let editor = &screen.desk.editor;
    html! {
        <textarea
            class="body-editor"
            rows="8"
            placeholder="Write the newsletter. Markdown and HTML are supported."
            ref={screen.body_ref.clone()}
            value={editor.fields().body.clone()}
            disabled={editor.is_submitting()}
            oninput={link.callback(|e: InputEvent| {
                Msg::SetField(Field::Body, e.target_unchecked_into::<HtmlTextAreaElement>().value())
            })}
        />
    }
}

fn preview(body: &str) -> Html {
    let html = description::render_html(body);
    if !description::has_content(&html) {
        return html! { <div class="preview empty-state">{"Nothing to preview yet."}</div> };
    }
    html! {
        <div class="preview">{ Html::from_html_unchecked(AttrValue::from(html)) }</div>
    }
}

fn attachment_strip(screen: &NewsletterScreen, api: &HttpApi, link: &Scope<NewsletterScreen>) -> Html {
    let attachments = screen.desk.editor.attachments();
    let count = attachments.len();
    let busy = screen.desk.editor.is_submitting();
    html! {
        <div class="attachment-strip">
            <span class="muted">{ format!("{}/{} images", count, MAX_ATTACHMENTS) }</span>
            <div class="thumbnails">
                { for attachments.iter().enumerate().map(|(index, attachment)| {
                    attachment_thumb(api, attachment, index, count, busy, link)
                }) }
            </div>
        </div>
    }
}

fn attachment_thumb(
    api: &HttpApi,
    attachment: &Attachment<BrowserFile>,
    index: usize,
    count: usize,
    busy: bool,
    link: &Scope<NewsletterScreen>,
) -> Html {
    let (src, caption) = match &attachment.source {
        AttachmentSource::Existing { url, .. } => (Some(api.media_url(url)), String::new()),
        AttachmentSource::Staged { file, .. } => (
            file.preview_url.clone(),
            format!("{} · {}", file.file.name(), format_size(file.file.size() as u64)),
        ),
    };
    let locked = busy || attachment.pending_delete;
    html! {
        <figure class={classes!("thumb", attachment.pending_delete.then_some("pending"), attachment.is_staged().then_some("staged"))}>
            if let Some(src) = src {
                <img src={src} alt={format!("Image {}", index + 1)} />
            }
            if !caption.is_empty() {
                <figcaption>{ caption }</figcaption>
            }
            <div class="thumb-actions">
                <button
                    class="icon-btn"
                    title="Move left"
                    disabled={locked || index == 0}
                    onclick={link.callback(move |_| Msg::MoveAttachment { from: index, to: index - 1 })}
                >
                    <i class="material-icons">{"chevron_left"}</i>
                </button>
                <button
                    class="icon-btn"
                    title="Move right"
                    disabled={locked || index + 1 >= count}
                    onclick={link.callback(move |_| Msg::MoveAttachment { from: index, to: index + 1 })}
                >
                    <i class="material-icons">{"chevron_right"}</i>
                </button>
                <button
                    class="icon-btn danger"
                    title="Remove"
                    disabled={locked}
                    onclick={link.callback(move |_| Msg::RemoveAttachment(index))}
                >
                    <i class="material-icons">{"delete"}</i>
                </button>
            </div>
        </figure>
    }
}

fn newsletter_list(screen: &NewsletterScreen, ctx: &Context<NewsletterScreen>) -> Html {
    let link = ctx.link();
    let records = screen.desk.records();
    html! {
        <section class="newsletter-list">
            <div class="panel-header">
                <h2>{"Previous newsletters"}</h2>
                <span class="muted">{ format!("{} drafts", screen.desk.draft_count()) }</span>
                <button class="icon-btn" title="Refresh" onclick={link.callback(|_| Msg::Refresh)}>
                    <i class="material-icons">{"refresh"}</i>
                </button>
                <button
                    class="danger"
                    disabled={records.is_empty()}
                    onclick={link.callback(|_| Msg::ConfirmDeleteAll)}
                >
                    {"Delete all"}
                </button>
            </div>
            if screen.desk.is_loading() && records.is_empty() {
                <div class="spinner" />
            } else if records.is_empty() {
                <div class="empty-state">{"No newsletters available. Create a new one above!"}</div>
            } else {
                <div class="card-grid">
                    { for records.iter().map(|newsletter| newsletter_card(newsletter, ctx)) }
                </div>
            }
        </section>
    }
}

fn newsletter_card(newsletter: &Newsletter, ctx: &Context<NewsletterScreen>) -> Html {
    let link = ctx.link();
    let api = &ctx.props().api;
    let id = newsletter.id;
    html! {
        <article
            class={classes!("card", newsletter.is_draft().then_some("draft"))}
            onclick={link.callback(move |_| Msg::OpenCard(id))}
        >
            if let Some(cover) = newsletter.cover() {
                <img class="card-cover" src={api.media_url(&cover.image)} alt={newsletter.title.clone()} />
            }
            <div class="card-body">
                <span class={classes!("chip", newsletter.status.as_str())}>{ newsletter.status.as_str() }</span>
                <h3>{ newsletter.title.clone() }</h3>
                if let Some(subtitle) = &newsletter.subtitle {
                    <p class="muted">{ subtitle.clone() }</p>
                }
                <p class="muted">{ newsletter.created_at.format("%b %d, %Y").to_string() }</p>
            </div>
        </article>
    }
}

fn detail_sheet(screen: &NewsletterScreen, ctx: &Context<NewsletterScreen>) -> Html {
    let link = ctx.link();
    let api = &ctx.props().api;
    let content = match screen.desk.opened() {
        Some(newsletter) => {
            let id = newsletter.id;
            html! {
                <div class="newsletter-detail">
                    if let Some(subtitle) = &newsletter.subtitle {
                        <p class="subtitle">{ subtitle.clone() }</p>
                    }
                    <p class="muted">
                        { format!("Published {}", newsletter.created_at.format("%B %d, %Y")) }
                    </p>
                    <div class="detail-images">
                        { for newsletter.images.iter().map(|image| html! {
                            <img src={api.media_url(&image.image)} alt={newsletter.title.clone()} />
                        }) }
                    </div>
                    <div class="preview">
                        { Html::from_html_unchecked(AttrValue::from(newsletter.description.clone())) }
                    </div>
                    if let Some(url) = &newsletter.url {
                        <a href={url.clone()} target="_blank" rel="noopener noreferrer">{ url.clone() }</a>
                    }
                    <div class="dialog-actions">
                        <button onclick={link.callback(move |_| Msg::EditPublished(id))}>{"Edit"}</button>
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
            title={screen.desk.opened().map(|n| n.title.clone())}
            on_close={link.callback(|_| Msg::CloseDetail)}
        >
            { content }
        </YwMaterialTopSheet>
    }
}

fn confirm_sheet(screen: &NewsletterScreen, link: &Scope<NewsletterScreen>) -> Html {
    html! {
        <YwMaterialTopSheet
            node_ref={screen.confirm_ref.clone()}
            title={Some("Delete all newsletters?".to_string())}
        >
            <p>{"Every newsletter and its images will be removed. This cannot be undone."}</p>
            <div class="dialog-actions">
                <button class="danger" onclick={link.callback(|_| Msg::DeleteAll)}>{"Delete all"}</button>
            </div>
        </YwMaterialTopSheet>
    }
}
