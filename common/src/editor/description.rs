//! Newsletter body: authored as Markdown, sent as HTML.
//!
//! Raw HTML passes through the Markdown renderer untouched, so descriptions
//! loaded back from the backend (already HTML) survive a re-save.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose;
use pulldown_cmark::{Options, Parser, html};
use regex::Regex;

use crate::editor::attachments::check_image_size;
use crate::error::StagingRejection;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\s").expect("valid img pattern"));

/// Renders the Markdown `source` to the HTML fragment stored by the backend.
pub fn render_html(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output.trim_end().to_string()
}

/// Whether rendered `html` shows anything: visible text or an inline image.
/// An editor left with only `<p></p>` or `&nbsp;` counts as empty.
pub fn has_content(html: &str) -> bool {
    if IMG_TAG.is_match(html) {
        return true;
    }
    let text = TAG.replace_all(html, "");
    !text.replace("&nbsp;", " ").trim().is_empty()
}

/// Formatting snippets the toolbar inserts at the cursor. The word `text`
/// placeholder is selected after insertion so typing replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snippet {
    Bold,
    Italic,
    Underline,
    BulletedList,
    Link,
}

impl Snippet {
    pub const PLACEHOLDER: &'static str = "text";

    pub fn markup(self) -> &'static str {
        match self {
            Snippet::Bold => "**text**",
            Snippet::Italic => "*text*",
            Snippet::Underline => "<u>text</u>",
            Snippet::BulletedList => "- text",
            Snippet::Link => "[text](https://)",
        }
    }

    /// Replaces the byte range `start..end` of `body` with this snippet.
    /// Returns the new body and the byte range of the placeholder word.
    pub fn insert(self, body: &str, start: usize, end: usize) -> (String, (usize, usize)) {
        let start = start.min(body.len());
        let end = end.clamp(start, body.len());
        let markup = self.markup();
        let text = format!("{}{}{}", &body[..start], markup, &body[end..]);
        let offset = markup.find(Self::PLACEHOLDER).unwrap_or(0);
        let at = start + offset;
        (text, (at, at + Self::PLACEHOLDER.len()))
    }
}

/// Builds an `<img>` tag carrying the picked file as a base64 data URL.
/// Files over the image size limit are refused before encoding.
pub fn inline_image(file_name: &str, mime: &str, bytes: &[u8]) -> Result<String, StagingRejection> {
    check_image_size(file_name, bytes.len() as u64)?;
    let mime = if mime.starts_with("image/") { mime } else { "image/*" };
    let alt = file_name
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    Ok(format!(
        r#"<img src="data:{};base64,{}" alt="{}">"#,
        mime,
        general_purpose::STANDARD.encode(bytes),
        alt
    ))
}

/// Replaces the byte range `start..end` of `body` with `markup`.
/// Returns the new body and the byte offset just past the insertion.
pub fn insert_at(body: &str, start: usize, end: usize, markup: &str) -> (String, usize) {
    let start = floor_char_boundary(body, start.min(body.len()));
    let end = floor_char_boundary(body, end.clamp(start, body.len()));
    let text = format!("{}{}{}", &body[..start], markup, &body[end..]);
    (text, start + markup.len())
}

fn floor_char_boundary(text: &str, mut at: usize) -> usize {
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::MAX_IMAGE_BYTES;

    #[test]
    fn html_passes_through_unchanged() {
        assert_eq!(render_html("<p>hi</p>"), "<p>hi</p>");
    }

    #[test]
    fn markdown_is_rendered() {
        assert_eq!(render_html("**Spring** update"), "<p><strong>Spring</strong> update</p>");
    }

    #[test]
    fn empty_markup_has_no_content() {
        assert!(!has_content(""));
        assert!(!has_content("<p></p>"));
        assert!(!has_content("<p>&nbsp; </p>"));
        assert!(has_content("<p><img src=\"data:image/png;base64,AA\"></p>"));
        assert!(has_content("<p>hi</p>"));
    }

    #[test]
    fn snippet_replaces_selection_and_locates_placeholder() {
        let (text, (from, to)) = Snippet::Bold.insert("Hello world", 6, 11);
        assert_eq!(text, "Hello **text**");
        assert_eq!(&text[from..to], "text");

        let (text, (from, to)) = Snippet::Underline.insert("", 4, 9);
        assert_eq!(text, "<u>text</u>");
        assert_eq!(&text[from..to], "text");
    }

    #[test]
    fn inline_image_embeds_a_data_url() {
        let tag = inline_image("logo \"v2\".png", "image/png", &[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(tag, r#"<img src="data:image/png;base64,iVBORw==" alt="logo &quot;v2&quot;.png">"#);
        assert!(has_content(&render_html(&tag)));

        let tag = inline_image("blob", "", b"GIF").unwrap();
        assert!(tag.starts_with(r#"<img src="data:image/*;base64,R0lG""#));
    }

    #[test]
    fn oversized_inline_image_is_refused() {
        let bytes = vec![0u8; MAX_IMAGE_BYTES as usize + 1];
        let err = inline_image("poster.png", "image/png", &bytes).unwrap_err();
        assert_eq!(
            err,
            StagingRejection::TooLarge {
                file_name: "poster.png".into(),
                size: MAX_IMAGE_BYTES + 1,
            }
        );
        let at_limit = vec![0u8; MAX_IMAGE_BYTES as usize];
        assert!(inline_image("poster.png", "image/png", &at_limit).is_ok());
    }

    #[test]
    fn insertion_replaces_selection_and_moves_cursor_past_it() {
        let (text, cursor) = insert_at("Hi there", 3, 8, "<img>");
        assert_eq!(text, "Hi <img>");
        assert_eq!(cursor, text.len());

        let (text, cursor) = insert_at("é", 1, 1, "x");
        assert_eq!(text, "xé");
        assert_eq!(cursor, 1);
    }
}
