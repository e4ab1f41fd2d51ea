use serde::{Deserialize, Serialize};

use super::Record;

/// A student or alumnus enrolled in a degree. Read only on the dashboard.
///
/// The job fields are only present for alumni who reported employment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub reg_no: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub studying_year: u8,
    #[serde(default)]
    pub graduation_year: Option<u16>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_location: Option<String>,
    #[serde(default)]
    pub previous_company: Option<String>,
    pub department: String,
    pub gpa: f32,
}

impl StudentRecord {
    pub fn is_employed(&self) -> bool {
        self.job_title.is_some()
    }
}

impl Record for StudentRecord {
    type Id = String;

    fn id(&self) -> String {
        self.reg_no.clone()
    }
}
