//! Domain core of the alumni admin dashboard.
//!
//! Everything here is independent of the browser: the record types the
//! backend exchanges, the feedback triage pipeline, the newsletter editor
//! state machine and the boundary traits the frontend implements over HTTP.
//! The `frontend` crate wires these into Yew components.

pub mod detail;
pub mod editor;
pub mod error;
pub mod limits;
pub mod model;
pub mod newsletters;
pub mod pipeline;
pub mod selection;
pub mod stories;
pub mod store;
pub mod students;
pub mod sync;
pub mod triage;
