use std::fs;
use std::path::{Path, PathBuf};

use occubrowse_core::{Record, SearchConfig, SearchError};
use thiserror::Error;
use tracing::{debug, info};

use super::validation::{record_file_schema, validate_against_schema};

/// Failure to materialise the record list or the search configuration
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error("unsupported file type '{0}', expected .csv or .json")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Config(#[from] SearchError),
}

impl LoadError {
    /// Underlying I/O error, wherever it is wrapped
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            LoadError::Io { source, .. } => Some(source.kind()),
            LoadError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(io) => Some(io.kind()),
                _ => None,
            },
            _ => None,
        }
    }
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load records from a `.csv` or `.json` file.
///
/// Columns or keys that are missing default to an empty string.
pub fn load_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let records = match extension.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        _ => return Err(LoadError::UnsupportedFormat(extension)),
    };

    info!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

fn load_csv(path: &Path) -> Result<Vec<Record>, LoadError> {
    let contents = read_to_string(path)?;
    parse_csv(&contents)
}

/// Parse CSV text with a header row; unknown columns are ignored
pub fn parse_csv(contents: &str) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(contents.as_bytes());

    let records = reader
        .deserialize::<Record>()
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = records.len(), "parsed CSV");
    Ok(records)
}

fn load_json(path: &Path) -> Result<Vec<Record>, LoadError> {
    let contents = read_to_string(path)?;
    parse_json(&contents)
}

/// Parse a JSON array of record objects, validated against the record schema
pub fn parse_json(contents: &str) -> Result<Vec<Record>, LoadError> {
    let value: serde_json::Value = serde_json::from_str(contents)?;

    validate_against_schema(&record_file_schema(), &value).map_err(LoadError::Validation)?;

    Ok(serde_json::from_value(value)?)
}

/// Read a JSON search configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig, LoadError> {
    match path {
        Some(path) => {
            let contents = read_to_string(path)?;
            let config = SearchConfig::from_json_str(&contents)?;
            debug!(path = %path.display(), ?config, "loaded search configuration");
            Ok(config)
        }
        None => Ok(SearchConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_csv_with_esco_headers_and_missing_columns() {
        let csv = "conceptUri,code,preferredLabel,altLabels,hiddenLabels\n\
                   http://esco/1,2512,Software developer,\"programmer\ncoder\",x\n\
                   http://esco/2,2511,Systems analyst,,\n";

        let records = parse_csv(csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, "http://esco/1");
        assert_eq!(records[0].alternate_designations().count(), 2);
        assert_eq!(records[1].preferred_label, "Systems analyst");
        assert_eq!(records[1].description, "");
        assert_eq!(records[1].alternate_designations, "");
    }

    #[test]
    fn test_json_records() {
        let records = parse_json(
            r#"[{"keyId": "a", "code": "2512", "preferredLabel": "Software developer"}, {}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key_id, "a");
        assert_eq!(records[1], Record::default());
    }

    #[test]
    fn test_json_schema_violation() {
        let err = parse_json(r#"[{"code": 2512}]"#).unwrap_err();
        assert!(matches!(err, LoadError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed"));
    }

    #[test]
    fn test_load_records_by_extension() {
        let csv = write_temp(".csv", "code,preferredLabel\n2512,Software developer\n");
        assert_eq!(load_records(csv.path()).unwrap().len(), 1);

        let json = write_temp(".JSON", r#"[{"code": "2512"}]"#);
        assert_eq!(load_records(json.path()).unwrap().len(), 1);

        let txt = write_temp(".txt", "");
        assert!(matches!(
            load_records(txt.path()),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_records(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), SearchConfig::default());

        let file = write_temp(".json", r#"{"threshold": 0.3}"#);
        assert_eq!(load_config(Some(file.path())).unwrap().threshold, 0.3);

        let bad = write_temp(".json", r#"{"threshold": 3}"#);
        assert!(matches!(
            load_config(Some(bad.path())),
            Err(LoadError::Config(SearchError::InvalidThreshold(_)))
        ));
    }
}
