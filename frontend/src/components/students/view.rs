use common::model::student::StudentRecord;
use common::students::{StudentAnalytics, StudentField, StudentRoster};
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::{Msg, StudentsScreen};

const GPA_SCALE: f32 = 4.0;

pub fn view(screen: &StudentsScreen, ctx: &Context<StudentsScreen>) -> Html {
    let link = ctx.link();
    let Some(roster) = &screen.roster else {
        return html! { <div class="empty-state">{"Invalid degree ID."}</div> };
    };
    let visible = roster.visible();

    html! {
        <div class="students-root">
            <div class="page-header">
                <h1>{ format!("Students of degree {}", ctx.props().degree_id) }</h1>
                <span class="badge">{ format!("{} of {}", visible.len(), roster.len()) }</span>
                <button onclick={link.callback(|_| Msg::ToggleAnalytics)}>
                    { if screen.show_analytics { "Hide analytics" } else { "Show analytics" } }
                </button>
            </div>
            { filter_bar(roster, link) }
            if screen.show_analytics {
                { analytics_panel(&roster.analytics()) }
            }
            if roster.is_empty() {
                <div class="empty-state">{"No students are enrolled in this degree."}</div>
            } else if visible.is_empty() {
                <div class="empty-state">{"No students match the filters."}</div>
            } else {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Reg No"}</th>
                            <th>{"Name"}</th>
                            <th>{"Email"}</th>
                            <th>{"Year"}</th>
                            <th>{"Job"}</th>
                            <th>{"GPA"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for visible.iter().map(|student| student_row(student, link)) }
                    </tbody>
                </table>
            }
            { detail_sheet(screen, roster, link) }
        </div>
    }
}

fn filter_bar(roster: &StudentRoster, link: &Scope<StudentsScreen>) -> Html {
    html! {
        <div class="filter-bar">
            { for StudentField::ALL.iter().map(|field| {
                let field = *field;
                html! {
                    <input
                        type="search"
                        placeholder={field.label()}
                        value={roster.filter.query(field).to_string()}
                        oninput={link.callback(move |e: InputEvent| {
                            Msg::SetFilter(field, e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                }
            }) }
            <button
                class="link"
                disabled={roster.filter.is_empty()}
                onclick={link.callback(|_| Msg::ClearFilters)}
            >
                {"Clear filters"}
            </button>
        </div>
    }
}

fn student_row(student: &StudentRecord, link: &Scope<StudentsScreen>) -> Html {
    let reg_no = student.reg_no.clone();
    let job = match (&student.job_title, &student.job_location) {
        (Some(title), Some(location)) => format!("{} · {}", title, location),
        (Some(title), None) => title.clone(),
        _ => "Not employed".to_string(),
    };
    html! {
        <tr class="clickable" onclick={link.callback(move |_| Msg::Open(reg_no.clone()))}>
            <td>{ student.reg_no.clone() }</td>
            <td>{ student.name.clone() }</td>
            <td>{ student.email.clone() }</td>
            <td>{ student.studying_year }</td>
            <td>{ job }</td>
            <td>{ format!("{:.2}", student.gpa) }</td>
        </tr>
    }
}

fn analytics_panel(analytics: &StudentAnalytics) -> Html {
    let total = analytics.employed + analytics.unemployed;
    let employed_pct = if total == 0 {
        0.0
    } else {
        analytics.employed as f32 * 100.0 / total as f32
    };
    html! {
        <section class="analytics-panel">
            <div class="stat">
                <h4>{"Employment"}</h4>
                <p>{ format!("{} employed · {} not employed", analytics.employed, analytics.unemployed) }</p>
                <div class="bar"><div class="bar-fill" style={format!("width: {:.0}%", employed_pct)} /></div>
            </div>
            <div class="stat">
                <h4>{"Average GPA by department"}</h4>
                { for analytics.gpa_by_department.iter().map(|(department, gpa)| html! {
                    <div class="bar-row">
                        <span>{ department.clone() }</span>
                        <div class="bar">
                            <div class="bar-fill" style={format!("width: {:.0}%", (gpa / GPA_SCALE * 100.0).min(100.0))} />
                        </div>
                        <span>{ format!("{:.2}", gpa) }</span>
                    </div>
                }) }
            </div>
            <div class="stat">
                <h4>{"Graduation years"}</h4>
                if analytics.graduation_years.is_empty() {
                    <p class="muted">{"No graduates yet."}</p>
                } else {
                    <ul>
                        { for analytics.graduation_years.iter().map(|(year, count)| html! {
                            <li>{ format!("{}: {}", year, count) }</li>
                        }) }
                    </ul>
                }
            </div>
        </section>
    }
}

fn detail_sheet(screen: &StudentsScreen, roster: &StudentRoster, link: &Scope<StudentsScreen>) -> Html {
    let content = match roster.opened() {
        Some(student) => html! {
            <dl class="student-detail">
                <dt>{"Registration No"}</dt><dd>{ student.reg_no.clone() }</dd>
                <dt>{"Email"}</dt><dd>{ student.email.clone() }</dd>
                <dt>{"Contact"}</dt><dd>{ student.contact.clone() }</dd>
                <dt>{"Department"}</dt><dd>{ student.department.clone() }</dd>
                <dt>{"Studying year"}</dt><dd>{ student.studying_year }</dd>
                <dt>{"Graduation year"}</dt>
                <dd>{ student.graduation_year.map(|y| y.to_string()).unwrap_or_else(|| "-".into()) }</dd>
                <dt>{"Job title"}</dt><dd>{ student.job_title.clone().unwrap_or_else(|| "-".into()) }</dd>
                <dt>{"Job location"}</dt><dd>{ student.job_location.clone().unwrap_or_else(|| "-".into()) }</dd>
                <dt>{"Previous company"}</dt>
                <dd>{ student.previous_company.clone().unwrap_or_else(|| "-".into()) }</dd>
                <dt>{"GPA"}</dt><dd>{ format!("{:.2}", student.gpa) }</dd>
            </dl>
        },
        None => html! {},
    };
    html! {
        <YwMaterialTopSheet
            node_ref={screen.detail_ref.clone()}
            title={roster.opened().map(|s| s.name.clone())}
            on_close={link.callback(|_| Msg::Close)}
        >
            { content }
        </YwMaterialTopSheet>
    }
}
