//! Application shell: picks the screen from the page path and renders the
//! navigation around it.
//!
//! `/` is only an entry point. It asks the backend whether an admin account
//! exists and sends the browser to the login or the set-admin page, both of
//! which live outside this app.

use common::sync::{AdminApi, EntryRoute};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpApi;
use crate::components::feedback::FeedbackScreen;
use crate::components::newsletters::NewsletterScreen;
use crate::components::stories::StoriesScreen;
use crate::components::students::StudentsScreen;
use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Entry,
    Feedback,
    Newsletter,
    SuccessStories,
    Students(String),
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Entry,
            ["feedback"] => Route::Feedback,
            ["newsletter"] => Route::Newsletter,
            ["success-stories"] => Route::SuccessStories,
            ["view-students", degree_id] => Route::Students(degree_id.to_string()),
            _ => Route::NotFound,
        }
    }
}

fn entry_path(route: EntryRoute) -> &'static str {
    match route {
        EntryRoute::Login => "/login",
        EntryRoute::SetAdmin => "/set-admin",
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: AppConfig,
}

pub struct App {
    route: Route,
    api: HttpApi,
}

impl Component for App {
    type Message = ();
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string());
        let route = Route::from_path(&path);
        log::debug!("app: {} -> {:?}", path, route);
        Self {
            route,
            api: HttpApi::new(&ctx.props().config.api_base),
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render && self.route == Route::Entry {
            let api = self.api.clone();
            spawn_local(async move {
                let target = entry_path(EntryRoute::from_check(api.check_admin_exists().await));
                log::info!("app: redirecting to {}", target);
                if let Some(window) = web_sys::window() {
                    if window.location().set_href(target).is_err() {
                        log::error!("app: could not navigate to {}", target);
                    }
                }
            });
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let screen = match &self.route {
            Route::Entry => html! { <div class="spinner" title="Loading" /> },
            Route::Feedback => html! { <FeedbackScreen /> },
            Route::Newsletter => html! { <NewsletterScreen api={self.api.clone()} /> },
            Route::SuccessStories => html! { <StoriesScreen api={self.api.clone()} /> },
            Route::Students(degree_id) => html! { <StudentsScreen degree_id={degree_id.clone()} /> },
            Route::NotFound => html! { <div class="empty-state">{"Page not found."}</div> },
        };
        html! {
            <div class="app-shell">
                if self.route != Route::Entry {
                    { self.navigation() }
                }
                <main>{ screen }</main>
            </div>
        }
    }
}

impl App {
    fn navigation(&self) -> Html {
        let link = |href: &'static str, label: &'static str, active: bool| {
            html! { <a {href} class={classes!("nav-link", active.then_some("active"))}>{ label }</a> }
        };
        html! {
            <nav class="side-nav">
                { link("/feedback", "Feedback", self.route == Route::Feedback) }
                { link("/newsletter", "Newsletter", self.route == Route::Newsletter) }
                { link("/success-stories", "Success Stories", self.route == Route::SuccessStories) }
            </nav>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_map_to_screens() {
        assert_eq!(Route::from_path("/"), Route::Entry);
        assert_eq!(Route::from_path("/feedback/"), Route::Feedback);
        assert_eq!(Route::from_path("/newsletter"), Route::Newsletter);
        assert_eq!(Route::from_path("/success-stories"), Route::SuccessStories);
        assert_eq!(
            Route::from_path("/view-students/3"),
            Route::Students("3".to_string())
        );
        assert_eq!(Route::from_path("/view-students"), Route::NotFound);
    }

    #[test]
    fn entry_route_targets() {
        assert_eq!(entry_path(EntryRoute::SetAdmin), "/set-admin");
        assert_eq!(entry_path(EntryRoute::Login), "/login");
    }
}
