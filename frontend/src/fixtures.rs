//! Seed data for the screens that have no backend yet: feedback and the
//! per-degree student rosters.

use std::collections::BTreeMap;

use common::model::feedback::FeedbackRecord;
use common::model::student::StudentRecord;

const FEEDBACK: &str = include_str!("../fixtures/feedback.json");
const STUDENTS: &str = include_str!("../fixtures/students.json");

pub fn feedback() -> Vec<FeedbackRecord> {
    serde_json::from_str(FEEDBACK).unwrap_or_else(|e| {
        log::error!("fixtures: feedback seed is invalid: {}", e);
        Vec::new()
    })
}

/// Whether `id` reads as a number the way a browser coerces strings: blank
/// padding is ignored, and hex, octal and binary literals count.
fn is_numeric(id: &str) -> bool {
    let text = id.trim();
    if text.is_empty() {
        return !id.is_empty();
    }
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return true;
    }
    let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u128::from_str_radix(&text[2..], radix).is_ok();
    }
    !text.contains(|c: char| matches!(c.to_ascii_lowercase(), 'i' | 'n'))
        && text.parse::<f64>().is_ok()
}

/// Students enrolled in `degree_id`, or `None` if the id is not a number.
/// Rosters are keyed by the id exactly as written, so a numeric id with no
/// roster under that spelling (`01`, `-1`) is an empty roster.
pub fn students(degree_id: &str) -> Option<Vec<StudentRecord>> {
    if !is_numeric(degree_id) {
        return None;
    }
    let mut rosters: BTreeMap<String, Vec<StudentRecord>> = serde_json::from_str(STUDENTS)
        .unwrap_or_else(|e| {
            log::error!("fixtures: student seed is invalid: {}", e);
            BTreeMap::new()
        });
    Some(rosters.remove(degree_id).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_seed_parses() {
        let records = feedback();
        assert_eq!(records.len(), 14);
        assert_eq!(records.iter().filter(|r| r.is_flagged).count(), 3);
    }

    #[test]
    fn degree_ids_are_validated() {
        assert_eq!(students("1").map(|s| s.len()), Some(3));
        assert_eq!(students("9").map(|s| s.len()), Some(0));
        assert!(students("abc").is_none());
        assert!(students("NaN").is_none());
        assert!(students("1a").is_none());
    }

    #[test]
    fn numeric_ids_look_up_the_roster_as_written() {
        assert_eq!(students("01").map(|s| s.len()), Some(0));
        assert_eq!(students("-1").map(|s| s.len()), Some(0));
        assert_eq!(students("1.0").map(|s| s.len()), Some(0));
        assert_eq!(students("0x1").map(|s| s.len()), Some(0));
        assert!(is_numeric("1e3"));
        assert!(is_numeric(" 2 "));
        assert!(!is_numeric(""));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("0xZ"));
    }
}
