use crate::categories::display_name;
use crate::code::{CodePrefixes, GroupLevel};
use crate::models::Record;

const SEPARATOR: &str = " > ";

/// `(code, name)` pairs for the major, sub-major and minor groups above a record.
/// The unit group and the record itself are not part of the path.
pub fn breadcrumb_segments(record: &Record) -> Vec<(String, String)> {
    CodePrefixes::parse(&record.code)
        .iter()
        .filter(|(level, _)| *level != GroupLevel::Unit)
        .map(|(_, prefix)| (prefix.to_string(), display_name(prefix)))
        .collect()
}

/// Ancestor path of a record, e.g. `"2 - Professionals > 25 - ..."`
pub fn breadcrumb(record: &Record) -> String {
    breadcrumb_segments(record)
        .iter()
        .map(|(code, name)| format!("{} - {}", code, name))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_code(code: &str) -> Record {
        Record {
            code: code.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_breadcrumb() {
        assert_eq!(
            breadcrumb(&with_code("2512")),
            "2 - Professionals > 25 - Information and communications technology professionals > 251 - Software and applications developers and analysts"
        );
    }

    #[test]
    fn test_variant_code_stops_at_minor() {
        assert_eq!(breadcrumb(&with_code("2512.4")), breadcrumb(&with_code("2512")));
    }

    #[test]
    fn test_short_codes() {
        assert_eq!(breadcrumb(&with_code("1")), "1 - Managers");
        assert_eq!(
            breadcrumb(&with_code("13")),
            "1 - Managers > 13 - Production and specialised services managers"
        );
    }

    #[test]
    fn test_unknown_groups_use_fallback_names() {
        assert_eq!(breadcrumb(&with_code("X9")), "X - Group X > X9 - Group X9");
    }

    #[test]
    fn test_empty_code() {
        assert_eq!(breadcrumb(&with_code("")), "");
        assert!(breadcrumb_segments(&with_code("")).is_empty());
    }
}
