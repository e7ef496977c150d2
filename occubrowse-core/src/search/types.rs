use serde::Serialize;

use crate::models::{Record, SearchField};

/// Where a query matched inside one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub field: SearchField,
    /// Text of the closest fragment
    pub matched: String,
    /// Inclusive `(start, end)` char offsets into the field value, in text order
    pub indices: Vec<(usize, usize)>,
}

/// A ranked hit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub record: Record,
    /// Boosted relevance, higher is better. Not bounded by 1.
    pub score: f64,
    /// Fuzzy score before boosting, in [0, 1]
    pub raw_score: f64,
    pub matches: Vec<SearchMatch>,
    pub breadcrumb: String,
}

/// Output of the fuzzy pass, before filtering and boosting
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Position of the record in the index
    pub index: usize,
    pub raw_score: f64,
    pub matches: Vec<SearchMatch>,
}
