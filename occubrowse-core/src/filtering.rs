use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::FilterError;
use crate::models::Record;

/// Facet filters for search and listing.
///
/// An empty set places no constraint. A record must match at least one value
/// of every non-empty set (AND across facets, OR within a facet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub isco_major_groups: BTreeSet<String>,
    pub occupation_types: BTreeSet<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_major_group(mut self, major: impl Into<String>) -> Self {
        self.isco_major_groups.insert(major.into());
        self
    }

    pub fn with_occupation_type(mut self, occupation_type: impl Into<String>) -> Self {
        self.occupation_types.insert(occupation_type.into());
        self
    }

    /// Check if no facet is constrained
    pub fn is_empty(&self) -> bool {
        self.isco_major_groups.is_empty() && self.occupation_types.is_empty()
    }

    /// Check if a record passes every active facet
    pub fn matches(&self, record: &Record) -> bool {
        // Check major group filter (OR within groups); uncoded records never pass
        if !self.isco_major_groups.is_empty() {
            let matches_major = record
                .major_group()
                .is_some_and(|major| self.isco_major_groups.contains(major));

            if !matches_major {
                return false;
            }
        }

        // Check occupation type filter (OR within types)
        if !self.occupation_types.is_empty()
            && !self.occupation_types.contains(&record.occupation_type)
        {
            return false;
        }

        // All active facets matched (AND logic)
        true
    }

    /// Records passing the filters, in input order
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Facet values present in a corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableFilters {
    pub isco_major_groups: BTreeSet<String>,
    pub occupation_types: BTreeSet<String>,
}

impl AvailableFilters {
    /// Scan records once for major groups and occupation types
    pub fn from_records(records: &[Record]) -> Self {
        let mut available = Self::default();

        for record in records {
            // Empty codes contribute no major group
            if let Some(major) = record.major_group() {
                available.isco_major_groups.insert(major.to_string());
            }
            if !record.occupation_type.is_empty() {
                available
                    .occupation_types
                    .insert(record.occupation_type.clone());
            }
        }

        available
    }
}

/// Parse facet filter strings in the format "key=value".
/// Recognised keys are `major` (alias `isco`) and `type` (alias `occupationType`);
/// repeated keys accumulate values.
pub fn parse_facet_filters(facet_strings: &[String]) -> Result<SearchFilters, FilterError> {
    let mut filters = SearchFilters::new();

    for facet_str in facet_strings {
        let (key, value) = facet_str
            .split_once('=')
            .ok_or_else(|| FilterError::MissingSeparator(facet_str.clone()))?;

        // Values are kept verbatim apart from surrounding whitespace
        let value = value.trim();
        if value.is_empty() {
            return Err(FilterError::EmptyValue(key.trim().to_string()));
        }

        match key.trim() {
            "major" | "isco" => filters.isco_major_groups.insert(value.to_string()),
            "type" | "occupationType" => filters.occupation_types.insert(value.to_string()),
            other => return Err(FilterError::UnknownFacet(other.to_string())),
        };
    }

    Ok(filters)
}
