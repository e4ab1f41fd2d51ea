//! Top sheet dialog: a panel sliding down from the top of the viewport.
//!
//! The sheet is always mounted; `open_top_sheet` and `close_top_sheet`
//! toggle its `show` class through the node ref, so a screen can open it
//! from its update function without re-rendering the content.

use yew::{html, Callback, Component, Context, Html, MouseEvent, NodeRef, Properties};

pub struct YwMaterialTopSheet;

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub title: Option<String>,
    /// Fired by the close button and by a click on the backdrop.
    #[prop_or_default]
    pub on_close: Callback<()>,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let node_ref = props.node_ref.clone();
        let on_close = props.on_close.clone();
        let close = Callback::from(move |_: MouseEvent| {
            close_top_sheet(node_ref.clone());
            on_close.emit(());
        });

        html! {
            <div class="top-sheet" ref={props.node_ref.clone()}>
                <div class="top-sheet-backdrop" onclick={close.clone()} />
                <div class="top-sheet-panel" role="dialog">
                    <div class="top-sheet-header">
                        if let Some(title) = &props.title {
                            <h3>{ title }</h3>
                        }
                        <button class="icon-btn" title="Close" onclick={close}>
                            <i class="material-icons">{"close"}</i>
                        </button>
                    </div>
                    { props.children.clone() }
                </div>
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    set_shown(&top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    set_shown(&top_sheet_ref, false);
}

fn set_shown(top_sheet_ref: &NodeRef, shown: bool) {
    if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
        let classes = top_sheet.class_list();
        let result = if shown {
            classes.add_1("show")
        } else {
            classes.remove_1("show")
        };
        if result.is_err() {
            log::warn!("top sheet: could not toggle visibility");
        }
    }
}
