use tracing::{debug, trace};

use crate::breadcrumb::breadcrumb;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::filtering::{AvailableFilters, SearchFilters};
use crate::models::{Record, SearchField};

use super::fuzzy::{FoldedText, FuzzyMatcher};
use super::ranking::RelevanceRanker;
use super::types::{Candidate, SearchMatch, SearchResult};

/// Stand-in for a dissimilarity of zero so an exact hit still carries its
/// field weight into the combined score
const EXACT_MATCH_FLOOR: f64 = 1e-3;

/// Searchable view over a fixed record set.
///
/// Immutable once built; queries share it read-only and may run in parallel.
/// Rebuild the index when the records change.
#[derive(Debug)]
pub struct SearchIndex {
    records: Vec<Record>,
    /// Per record: folded text of every non-empty, positively weighted field
    fields: Vec<Vec<(SearchField, FoldedText)>>,
    matcher: FuzzyMatcher,
    config: SearchConfig,
    available: AvailableFilters,
}

impl SearchIndex {
    /// Index records with the default configuration
    pub fn new(records: Vec<Record>) -> Self {
        Self::build(records, SearchConfig::default())
    }

    /// Index records with a custom configuration, rejecting invalid settings
    pub fn with_config(records: Vec<Record>, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self::build(records, config))
    }

    fn build(records: Vec<Record>, config: SearchConfig) -> Self {
        let fields = records
            .iter()
            .map(|record| {
                SearchField::ALL
                    .iter()
                    .copied()
                    .filter(|&field| config.weights.weight(field) > 0.0)
                    .filter(|&field| !record.field(field).is_empty())
                    .map(|field| {
                        let folded = FoldedText::new(record.field(field), config.ignore_diacritics);
                        (field, folded)
                    })
                    .collect()
            })
            .collect();

        let available = AvailableFilters::from_records(&records);
        let matcher = FuzzyMatcher::new(&config);

        debug!(
            records = records.len(),
            major_groups = available.isco_major_groups.len(),
            occupation_types = available.occupation_types.len(),
            "built search index"
        );

        Self {
            records,
            fields,
            matcher,
            config,
            available,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Major groups and occupation types present in the corpus, sorted
    pub fn available_filters(&self) -> &AvailableFilters {
        &self.available
    }

    /// Ranked results for `text`, restricted by `filters`, at most `limit`.
    ///
    /// A blank query lists the filtered records in index order with score 1.0.
    pub fn query(&self, text: &str, filters: &SearchFilters, limit: usize) -> Vec<SearchResult> {
        let text = text.trim();
        if text.is_empty() {
            return self.list(filters, limit);
        }

        let wanted = limit.saturating_mul(self.config.candidate_multiplier);
        let candidates = self.raw_candidates(text, wanted);
        let fetched = candidates.len();

        let ranker = RelevanceRanker::new(text, &self.config.boosts);
        let results: Vec<SearchResult> = ranker
            .rank(&self.records, candidates, filters, limit)
            .into_iter()
            .map(|(candidate, score)| {
                let record = &self.records[candidate.index];
                SearchResult {
                    record: record.clone(),
                    score,
                    raw_score: candidate.raw_score,
                    matches: candidate.matches,
                    breadcrumb: breadcrumb(record),
                }
            })
            .collect();

        trace!(query = text, fetched, returned = results.len(), "search complete");
        results
    }

    /// Fuzzy pass only: up to `limit` candidates with raw scores in [0, 1],
    /// best first, ties in index order.
    pub fn raw_candidates(&self, text: &str, limit: usize) -> Vec<Candidate> {
        let query = FoldedText::new(text.trim(), self.config.ignore_diacritics);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let compiled = self
            .matcher
            .compile(&query, self.config.allowed_edits(query.char_len()));
        let total_weight = self.config.weights.total();

        let mut candidates: Vec<Candidate> = self
            .fields
            .iter()
            .enumerate()
            .filter_map(|(index, fields)| {
                let mut remaining = 1.0;
                let mut matches = Vec::new();

                for (field, folded) in fields {
                    let Some(found) = self.matcher.find(&compiled, folded) else {
                        continue;
                    };
                    if found.dissimilarity > self.config.threshold {
                        continue;
                    }

                    let norm = self.config.weights.weight(*field) / total_weight;
                    remaining *= found.dissimilarity.max(EXACT_MATCH_FLOOR).powf(norm);

                    let value = self.records[index].field(*field);
                    matches.push(SearchMatch {
                        field: *field,
                        matched: char_slice(value, found.best),
                        indices: found.indices,
                    });
                }

                (!matches.is_empty()).then(|| Candidate {
                    index,
                    raw_score: 1.0 - remaining,
                    matches,
                })
            })
            .collect();

        candidates.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));
        candidates.truncate(limit);
        candidates
    }

    fn list(&self, filters: &SearchFilters, limit: usize) -> Vec<SearchResult> {
        filters
            .apply(&self.records)
            .into_iter()
            .take(limit)
            .map(|record| SearchResult {
                record: record.clone(),
                score: 1.0,
                raw_score: 1.0,
                matches: Vec::new(),
                breadcrumb: breadcrumb(record),
            })
            .collect()
    }
}

/// Characters `start..=end` of `value`
fn char_slice(value: &str, (start, end): (usize, usize)) -> String {
    value.chars().skip(start).take(end + 1 - start).collect()
}
