//! Student roster of one degree: field filters, the detail modal and the
//! summary figures behind the analytics panel.

use std::collections::BTreeMap;

use crate::detail::DetailController;
use crate::model::student::StudentRecord;
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StudentField {
    Name,
    RegNo,
    Email,
    JobTitle,
    JobLocation,
    PreviousCompany,
}

impl StudentField {
    pub const ALL: [StudentField; 6] = [
        StudentField::Name,
        StudentField::RegNo,
        StudentField::Email,
        StudentField::JobTitle,
        StudentField::JobLocation,
        StudentField::PreviousCompany,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StudentField::Name => "Name",
            StudentField::RegNo => "Registration No",
            StudentField::Email => "Email",
            StudentField::JobTitle => "Job Title",
            StudentField::JobLocation => "Job Location",
            StudentField::PreviousCompany => "Previous Company",
        }
    }

    fn value(self, student: &StudentRecord) -> Option<&str> {
        match self {
            StudentField::Name => Some(&student.name),
            StudentField::RegNo => Some(&student.reg_no),
            StudentField::Email => Some(&student.email),
            StudentField::JobTitle => student.job_title.as_deref(),
            StudentField::JobLocation => student.job_location.as_deref(),
            StudentField::PreviousCompany => student.previous_company.as_deref(),
        }
    }
}

/// One case-insensitive substring query per field. Blank queries match
/// everything; a non-blank query never matches a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    queries: BTreeMap<StudentField, String>,
}

impl StudentFilter {
    pub fn query(&self, field: StudentField) -> &str {
        self.queries
            .get(&field)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Sets the query for `field`. Queries are matched as typed, so only an
    /// empty string clears the field.
    pub fn set(&mut self, field: StudentField, query: String) {
        if query.is_empty() {
            self.queries.remove(&field);
        } else {
            self.queries.insert(field, query);
        }
    }

    pub fn clear(&mut self) {
        self.queries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn matches(&self, student: &StudentRecord) -> bool {
        StudentField::ALL.iter().all(|field| {
            let query = self.query(*field).to_lowercase();
            if query.is_empty() {
                return true;
            }
            field
                .value(student)
                .is_some_and(|value| value.to_lowercase().contains(&query))
        })
    }

    pub fn apply<'a>(&self, students: &'a [StudentRecord]) -> Vec<&'a StudentRecord> {
        students.iter().filter(|s| self.matches(s)).collect()
    }
}

/// Figures shown in the analytics panel for a set of students.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAnalytics {
    pub employed: usize,
    pub unemployed: usize,
    /// Departments in order of first appearance.
    pub gpa_by_department: Vec<(String, f32)>,
    /// Ascending by year; students without a graduation year are left out.
    pub graduation_years: Vec<(u16, usize)>,
}

impl StudentAnalytics {
    pub fn compute<'a>(students: impl IntoIterator<Item = &'a StudentRecord>) -> Self {
        let mut employed = 0;
        let mut unemployed = 0;
        let mut departments: Vec<(String, f32, usize)> = Vec::new();
        let mut years: BTreeMap<u16, usize> = BTreeMap::new();

        for student in students {
            if student.is_employed() {
                employed += 1;
            } else {
                unemployed += 1;
            }
            match departments
                .iter_mut()
                .find(|(name, _, _)| *name == student.department)
            {
                Some((_, sum, count)) => {
                    *sum += student.gpa;
                    *count += 1;
                }
                None => departments.push((student.department.clone(), student.gpa, 1)),
            }
            if let Some(year) = student.graduation_year {
                *years.entry(year).or_default() += 1;
            }
        }

        Self {
            employed,
            unemployed,
            gpa_by_department: departments
                .into_iter()
                .map(|(name, sum, count)| (name, sum / count as f32))
                .collect(),
            graduation_years: years.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudentRoster {
    store: RecordStore<StudentRecord>,
    pub filter: StudentFilter,
    detail: DetailController<String>,
}

impl StudentRoster {
    pub fn new(students: Vec<StudentRecord>) -> Self {
        Self {
            store: RecordStore::from_records(students),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn visible(&self) -> Vec<&StudentRecord> {
        self.filter.apply(self.store.records())
    }

    pub fn open(&mut self, reg_no: &str) -> bool {
        match self.store.get(&reg_no.to_string()) {
            Some(student) => {
                self.detail.open(student);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.detail.close();
    }

    pub fn opened(&self) -> Option<&StudentRecord> {
        self.detail.selected().and_then(|id| self.store.get(id))
    }

    /// Analytics for the opened student if there is one, otherwise for
    /// the filtered roster.
    pub fn analytics(&self) -> StudentAnalytics {
        match self.opened() {
            Some(student) => StudentAnalytics::compute([student]),
            None => StudentAnalytics::compute(self.visible()),
        }
    }
}
