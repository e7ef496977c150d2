use std::io::ErrorKind;
use std::path::Path;

use crate::operations::LoadError;

/// Map record loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_file_load_error(error: &LoadError, path: &Path) -> (String, String, String) {
    match (error, error.io_kind()) {
        (_, Some(ErrorKind::NotFound)) => (
            "File Not Found".to_string(),
            "The file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        (_, Some(ErrorKind::PermissionDenied)) => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        (LoadError::Validation(errors), _) => (
            "Validation Error".to_string(),
            format!("The record file has {} validation error(s).", errors.len()),
            errors.join("\n"),
        ),
        (LoadError::UnsupportedFormat(_), _) => (
            "Unsupported File".to_string(),
            "Records must be provided as CSV or JSON.".to_string(),
            format!("Path: {}", path.display()),
        ),
        (LoadError::Csv(_) | LoadError::Json(_), _) => (
            "Parse Error".to_string(),
            "The record file could not be parsed.".to_string(),
            error.to_string(),
        ),
        _ => (
            "Error Loading File".to_string(),
            "Failed to load record file.".to_string(),
            error.to_string(),
        ),
    }
}

/// Map configuration errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_config_error(error: &LoadError, path: &Path) -> (String, String, String) {
    match error {
        LoadError::Config(err) => (
            "Invalid Configuration".to_string(),
            "The search configuration was rejected.".to_string(),
            format!("{}\n\nFile: {}", err, path.display()),
        ),
        other => map_file_load_error(other, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use occubrowse_core::SearchError;

    #[test]
    fn test_not_found() {
        let error = LoadError::Io {
            path: "records.csv".into(),
            source: std::io::Error::from(ErrorKind::NotFound),
        };

        let (title, _, details) = map_file_load_error(&error, Path::new("records.csv"));
        assert_eq!(title, "File Not Found");
        assert!(details.contains("records.csv"));
    }

    #[test]
    fn test_validation_errors_are_listed() {
        let error = LoadError::Validation(vec!["first".to_string(), "second".to_string()]);

        let (title, message, details) = map_file_load_error(&error, Path::new("a.json"));
        assert_eq!(title, "Validation Error");
        assert!(message.contains('2'));
        assert_eq!(details, "first\nsecond");
    }

    #[test]
    fn test_config_error() {
        let error = LoadError::Config(SearchError::InvalidThreshold(2.0));

        let (title, _, details) = map_config_error(&error, Path::new("search.json"));
        assert_eq!(title, "Invalid Configuration");
        assert!(details.contains("threshold"));
    }
}
