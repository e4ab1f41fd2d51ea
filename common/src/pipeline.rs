//! Filter/sort pipeline for the feedback triage screen.
//!
//! [`FeedbackQuery::apply`] is a pure function of the records and the query:
//! it never mutates its input and always returns records in input order
//! unless a sort is requested. Sorting is stable, so records with equal keys
//! keep their insertion order whichever direction is chosen.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::feedback::{FeedbackCategory, FeedbackRecord, Rating};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(FeedbackCategory),
}

impl CategoryFilter {
    /// Parses a dropdown value: `"All"` or a category label.
    pub fn from_option(value: &str) -> Self {
        FeedbackCategory::from_label(value).map_or(CategoryFilter::All, CategoryFilter::Only)
    }

    fn admits(self, record: &FeedbackRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => record.category == category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Exactly(Rating),
}

impl RatingFilter {
    /// Parses a dropdown value: `"All"` or a star count.
    pub fn from_option(value: &str) -> Self {
        value
            .parse::<u8>()
            .ok()
            .and_then(Rating::new)
            .map_or(RatingFilter::All, RatingFilter::Exactly)
    }

    fn admits(self, record: &FeedbackRecord) -> bool {
        match self {
            RatingFilter::All => true,
            RatingFilter::Exactly(rating) => record.rating == rating,
        }
    }
}

/// Text fields the free-text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Author,
    Email,
    Comment,
}

impl SearchField {
    fn text(self, record: &FeedbackRecord) -> &str {
        match self {
            SearchField::Author => &record.user,
            SearchField::Email => &record.email,
            SearchField::Comment => &record.comment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const DATE_DESC: SortOrder = SortOrder::new(SortKey::Date, SortDirection::Desc);
    pub const DATE_ASC: SortOrder = SortOrder::new(SortKey::Date, SortDirection::Asc);
    pub const RATING_DESC: SortOrder = SortOrder::new(SortKey::Rating, SortDirection::Desc);
    pub const RATING_ASC: SortOrder = SortOrder::new(SortKey::Rating, SortDirection::Asc);

    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    fn compare(self, a: &FeedbackRecord, b: &FeedbackRecord) -> Ordering {
        let ascending = match self.key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Rating => a.rating.cmp(&b.rating),
        };
        match self.direction {
            SortDirection::Asc => ascending,
            SortDirection::Desc => ascending.reverse(),
        }
    }
}

/// Dropdown values: `date-desc`, `date-asc`, `rating-desc`, `rating-asc`.
impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-desc" => Ok(SortOrder::DATE_DESC),
            "date-asc" => Ok(SortOrder::DATE_ASC),
            "rating-desc" => Ok(SortOrder::RATING_DESC),
            "rating-asc" => Ok(SortOrder::RATING_ASC),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            SortKey::Date => "date",
            SortKey::Rating => "rating",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}-{}", key, direction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackQuery {
    pub category: CategoryFilter,
    pub rating: RatingFilter,
    pub search: String,
    pub search_fields: Vec<SearchField>,
    /// `None` keeps input order.
    pub sort: Option<SortOrder>,
}

impl Default for FeedbackQuery {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            rating: RatingFilter::All,
            search: String::new(),
            search_fields: vec![SearchField::Author, SearchField::Comment],
            sort: Some(SortOrder::DATE_DESC),
        }
    }
}

impl FeedbackQuery {
    /// Whether `record` passes every filter of this query.
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        self.category.admits(record) && self.rating.admits(record) && self.matches_search(record)
    }

    fn matches_search(&self, record: &FeedbackRecord) -> bool {
        let needle = self.search.to_lowercase();
        needle.is_empty()
            || self
                .search_fields
                .iter()
                .any(|field| field.text(record).to_lowercase().contains(&needle))
    }

    /// Derives the visible list from `records`.
    pub fn apply<'a>(&self, records: &'a [FeedbackRecord]) -> Vec<&'a FeedbackRecord> {
        let mut view: Vec<&FeedbackRecord> = records.iter().filter(|r| self.matches(r)).collect();
        if let Some(order) = self.sort {
            view.sort_by(|a, b| order.compare(a, b));
        }
        view
    }
}
