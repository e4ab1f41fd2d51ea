//! Transient notifications shown at the top right of the page.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn background(self) -> &'static str {
        match self {
            ToastKind::Success => "rgba(22, 101, 52, 0.92)",
            ToastKind::Error => "rgba(153, 27, 27, 0.92)",
        }
    }

    fn millis(self) -> u32 {
        match self {
            ToastKind::Success => 3000,
            ToastKind::Error => 5000,
        }
    }
}

pub fn show_success(message: &str) {
    show_toast(message, ToastKind::Success);
}

pub fn show_error(message: &str) {
    show_toast(message, ToastKind::Error);
}

/// Appends a toast to `<body>` and removes it after a few seconds. The
/// message is set as text, never as markup.
pub fn show_toast(message: &str, kind: ToastKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    let toast: HtmlElement = toast.unchecked_into();
    let style = toast.style();
    for (property, value) in [
        ("position", "fixed"),
        ("top", "20px"),
        ("right", "20px"),
        ("max-width", "360px"),
        ("background", kind.background()),
        ("color", "#fff"),
        ("padding", "10px 20px"),
        ("border-radius", "8px"),
        ("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.2)"),
        ("z-index", "10000"),
        ("font-family", "Poppins, Arial, sans-serif"),
    ] {
        style.set_property(property, value).ok();
    }

    if body.append_child(&toast).is_ok() {
        let millis = kind.millis();
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(millis).await;
            if let Some(parent) = toast.parent_node() {
                parent.remove_child(&toast).ok();
            }
        });
    }
}
