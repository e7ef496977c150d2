use std::path::{Path, PathBuf};

use occubrowse_core::*;
use tracing::{info, warn};

use crate::operations::{load_records, LoadError};

/// Application state: the record set, its classification tree and its search
/// index, held for the lifetime of the process
#[derive(Debug)]
pub struct AppState {
    /// Path to the loaded record file
    pub data_file: PathBuf,
    /// Index over the loaded records
    pub index: SearchIndex,
    /// Tree built from the indexed records
    taxonomy: Vec<GroupNode>,
}

impl AppState {
    /// Load a record file, index it and build its tree
    pub fn load_from_file(path: &Path, config: SearchConfig) -> Result<Self, LoadError> {
        let records = load_records(path)?;
        let index = SearchIndex::with_config(records, config)?;

        if index.is_empty() {
            warn!(path = %path.display(), "record file contains no records");
        }
        info!(
            records = index.len(),
            threshold = index.config().threshold,
            "indexed records"
        );

        Ok(Self::new(path.to_path_buf(), index))
    }

    #[cfg(test)]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(PathBuf::new(), SearchIndex::new(records))
    }

    fn new(data_file: PathBuf, index: SearchIndex) -> Self {
        let taxonomy = build_taxonomy(index.records());
        Self {
            data_file,
            index,
            taxonomy,
        }
    }

    pub fn records(&self) -> &[Record] {
        self.index.records()
    }

    /// Classification tree for browse mode
    pub fn taxonomy(&self) -> &[GroupNode] {
        &self.taxonomy
    }

    pub fn record_count(&self) -> usize {
        self.index.len()
    }

    /// Find a record by key id, falling back to an exact code match
    pub fn find_record(&self, key: &str) -> Option<&Record> {
        let records = self.records();
        records
            .iter()
            .find(|record| record.key_id == key)
            .or_else(|| records.iter().find(|record| record.code == key))
    }

    /// File name shown in headers
    pub fn source_name(&self) -> &str {
        self.data_file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::from_records(vec![
            Record {
                key_id: "dev".to_string(),
                code: "2512".to_string(),
                preferred_label: "Software developer".to_string(),
                ..Default::default()
            },
            Record {
                key_id: "2511".to_string(),
                code: "2512.1".to_string(),
                preferred_label: "Web developer".to_string(),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_find_record_prefers_key_id() {
        let state = state();
        assert_eq!(state.find_record("dev").unwrap().code, "2512");
        assert_eq!(state.find_record("2511").unwrap().key_id, "2511");
        assert_eq!(state.find_record("2512.1").unwrap().key_id, "2511");
        assert!(state.find_record("missing").is_none());
    }

    #[test]
    fn test_taxonomy_and_source_name() {
        let state = state();
        assert_eq!(state.taxonomy().len(), 1);
        assert_eq!(state.taxonomy()[0].record_count(), 2);
        assert_eq!(state.record_count(), 2);
        assert_eq!(state.source_name(), "Untitled");
    }

    #[test]
    fn test_load_from_file_builds_tree_once() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"code,preferredLabel\n2512,Software developer\n1321,Manufacturing manager\n")
            .unwrap();

        let state = AppState::load_from_file(file.path(), SearchConfig::default()).unwrap();

        assert_eq!(state.record_count(), 2);
        let majors: Vec<_> = state.taxonomy().iter().map(|g| g.code.as_str()).collect();
        assert_eq!(majors, vec!["1", "2"]);
        assert!(std::ptr::eq(state.taxonomy(), state.taxonomy()));
    }
}
