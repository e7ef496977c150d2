use regex::Regex;
use tracing::warn;

use crate::config::BoostFactors;
use crate::filtering::SearchFilters;
use crate::models::Record;

use super::types::Candidate;

/// Post-processes raw fuzzy candidates: facet filter, literal-match boosts,
/// stable re-sort, truncation.
#[derive(Debug)]
pub struct RelevanceRanker<'a> {
    query_lower: String,
    word_boundary: Option<Regex>,
    boosts: &'a BoostFactors,
}

impl<'a> RelevanceRanker<'a> {
    pub fn new(query: &str, boosts: &'a BoostFactors) -> Self {
        let query = query.trim();
        let pattern = format!(r"(?i)\b{}", regex::escape(query));

        let word_boundary = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(%err, "word boundary boost disabled for this query");
                None
            }
        };

        Self {
            query_lower: query.to_lowercase(),
            word_boundary,
            boosts,
        }
    }

    /// Multiply a raw score by every literal-match boost the record earns
    pub fn boost(&self, record: &Record, raw_score: f64) -> f64 {
        let mut score = raw_score;

        if record.preferred_label.to_lowercase().contains(&self.query_lower) {
            score *= self.boosts.label_substring;
        }
        if record.code.to_lowercase().contains(&self.query_lower) {
            score *= self.boosts.code_substring;
        }
        if self
            .word_boundary
            .as_ref()
            .is_some_and(|re| re.is_match(&record.preferred_label))
        {
            score *= self.boosts.word_boundary;
        }

        score
    }

    /// Filter, boost, re-sort (stable) and truncate to `limit`.
    ///
    /// Returns `(candidate, boosted score)` pairs best first. Boosted scores are
    /// ranking keys only and may exceed 1.
    pub fn rank(
        &self,
        records: &[Record],
        candidates: Vec<Candidate>,
        filters: &SearchFilters,
        limit: usize,
    ) -> Vec<(Candidate, f64)> {
        let mut ranked: Vec<(Candidate, f64)> = candidates
            .into_iter()
            .filter(|candidate| filters.matches(&records[candidate.index]))
            .map(|candidate| {
                let score = self.boost(&records[candidate.index], candidate.raw_score);
                (candidate, score)
            })
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, label: &str) -> Record {
        Record {
            code: code.to_string(),
            preferred_label: label.to_string(),
            ..Default::default()
        }
    }

    fn candidate(index: usize, raw_score: f64) -> Candidate {
        Candidate {
            index,
            raw_score,
            matches: Vec::new(),
        }
    }

    #[test]
    fn test_boosts_compound() {
        let boosts = BoostFactors::default();
        let ranker = RelevanceRanker::new("Data", &boosts);

        let all_three = record("data-1", "Data scientist");
        assert!((ranker.boost(&all_three, 0.5) - 0.5 * 1.3 * 1.2 * 1.1).abs() < 1e-12);

        // substring but not at a word boundary
        let inner = record("2511", "Metadata curator");
        assert!((ranker.boost(&inner, 0.5) - 0.5 * 1.3).abs() < 1e-12);

        let none = record("2511", "Systems analyst");
        assert_eq!(ranker.boost(&none, 0.5), 0.5);
    }

    #[test]
    fn test_code_boost() {
        let boosts = BoostFactors::default();
        let ranker = RelevanceRanker::new("251", &boosts);
        let boosted = ranker.boost(&record("2512", "Software developer"), 0.8);
        assert!((boosted - 0.8 * 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let boosts = BoostFactors::default();
        let ranker = RelevanceRanker::new("c++", &boosts);
        let boosted = ranker.boost(&record("2512", "C++ developer"), 1.0);
        assert!(boosted > 1.0);
    }

    #[test]
    fn test_rank_filters_sorts_and_truncates() {
        let records = vec![
            record("1321", "Software manager"),
            record("2512", "Developer"),
            record("2512.1", "Software developer"),
            record("2513", "Web developer"),
        ];
        let candidates = vec![
            candidate(0, 0.9),
            candidate(1, 0.6),
            candidate(2, 0.5),
            candidate(3, 0.6),
        ];

        let boosts = BoostFactors::default();
        let ranker = RelevanceRanker::new("software", &boosts);
        let filters = SearchFilters::new().with_major_group("2");

        let ranked = ranker.rank(&records, candidates, &filters, 2);
        let order: Vec<_> = ranked.iter().map(|(c, _)| c.index).collect();

        // 0.5 * 1.3 * 1.1 overtakes the unboosted 0.6 entries; ties keep order
        assert_eq!(order, vec![2, 1]);
        assert!(ranked[0].1 > 0.5);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let records = vec![record("1", "a"), record("2", "b"), record("3", "c")];
        let candidates = vec![candidate(2, 0.5), candidate(0, 0.5), candidate(1, 0.5)];

        let boosts = BoostFactors::default();
        let ranked = RelevanceRanker::new("zzz", &boosts).rank(
            &records,
            candidates,
            &SearchFilters::new(),
            10,
        );

        let order: Vec<_> = ranked.iter().map(|(c, _)| c.index).collect();
        assert_eq!(order, vec![2, 0, 1]);
    }
}
