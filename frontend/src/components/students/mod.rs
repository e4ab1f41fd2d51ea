//! Student roster of one degree, read from seed data.

use common::students::{StudentField, StudentRoster};
use yew::prelude::*;

use crate::tops_sheet::yw_material_top_sheet::open_top_sheet;

mod view;

pub enum Msg {
    SetFilter(StudentField, String),
    ClearFilters,
    Open(String),
    Close,
    ToggleAnalytics,
}

#[derive(Properties, PartialEq, Clone)]
pub struct StudentsProps {
    pub degree_id: String,
}

pub struct StudentsScreen {
    /// `None` when the degree id in the path is not a number.
    roster: Option<StudentRoster>,
    show_analytics: bool,
    detail_ref: NodeRef,
}

impl StudentsScreen {
    fn load(degree_id: &str) -> Option<StudentRoster> {
        let roster = crate::fixtures::students(degree_id).map(StudentRoster::new);
        if roster.is_none() {
            log::warn!("students: invalid degree id {:?}", degree_id);
        }
        roster
    }
}

impl Component for StudentsScreen {
    type Message = Msg;
    type Properties = StudentsProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            roster: Self::load(&ctx.props().degree_id),
            show_analytics: false,
            detail_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().degree_id != old_props.degree_id {
            self.roster = Self::load(&ctx.props().degree_id);
        }
        true
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Some(roster) = self.roster.as_mut() else {
            return false;
        };
        match msg {
            Msg::SetFilter(field, query) => {
                roster.filter.set(field, query);
                true
            }
            Msg::ClearFilters => {
                roster.filter.clear();
                true
            }
            Msg::Open(reg_no) => {
                if roster.open(&reg_no) {
                    open_top_sheet(self.detail_ref.clone());
                    true
                } else {
                    false
                }
            }
            Msg::Close => {
                roster.close();
                true
            }
            Msg::ToggleAnalytics => {
                self.show_analytics = !self.show_analytics;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
