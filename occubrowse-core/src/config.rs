use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::models::SearchField;

/// Largest edit distance automaton builders may be prepared for
pub const MAX_EDIT_DISTANCE: u8 = 3;

/// Relative importance of each searchable field. Weights are normalised by
/// their sum when field scores are combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldWeights {
    pub preferred_label: f64,
    pub code: f64,
    pub alternate_designations: f64,
    pub description: f64,
    pub definition: f64,
    pub regulated_profession_note: f64,
    pub scope_note: f64,
    pub occupation_type: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            preferred_label: 0.40,
            code: 0.30,
            alternate_designations: 0.20,
            description: 0.15,
            definition: 0.10,
            regulated_profession_note: 0.08,
            scope_note: 0.05,
            occupation_type: 0.03,
        }
    }
}

impl FieldWeights {
    pub fn weight(&self, field: SearchField) -> f64 {
        match field {
            SearchField::PreferredLabel => self.preferred_label,
            SearchField::Code => self.code,
            SearchField::AlternateDesignations => self.alternate_designations,
            SearchField::Description => self.description,
            SearchField::Definition => self.definition,
            SearchField::RegulatedProfessionNote => self.regulated_profession_note,
            SearchField::ScopeNote => self.scope_note,
            SearchField::OccupationType => self.occupation_type,
        }
    }

    pub fn total(&self) -> f64 {
        SearchField::ALL.iter().map(|&field| self.weight(field)).sum()
    }
}

/// Multipliers rewarding literal matches over purely fuzzy ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoostFactors {
    /// Query is a substring of the preferred label
    pub label_substring: f64,
    /// Query is a substring of the code
    pub code_substring: f64,
    /// Query starts at a word boundary in the preferred label
    pub word_boundary: f64,
}

impl Default for BoostFactors {
    fn default() -> Self {
        Self {
            label_substring: 1.3,
            code_substring: 1.2,
            word_boundary: 1.1,
        }
    }
}

/// Tuning for the search index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub weights: FieldWeights,
    /// Highest accepted dissimilarity (edits / query length); 0 is exact
    pub threshold: f64,
    /// Shortest fragment, in characters, reported as a match
    pub min_match_char_length: usize,
    /// Largest edit budget served by a prebuilt Levenshtein automaton; longer
    /// queries fall back to an edit-distance table and stay within `threshold`
    pub max_edit_distance: u8,
    /// Match "ingenieur" against "ingénieur"
    pub ignore_diacritics: bool,
    /// Raw candidates fetched per requested result, leaving room for re-ranking
    pub candidate_multiplier: usize,
    pub boosts: BoostFactors,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            threshold: 0.4,
            min_match_char_length: 2,
            max_edit_distance: 2,
            ignore_diacritics: true,
            candidate_multiplier: 2,
            boosts: BoostFactors::default(),
        }
    }
}

impl SearchConfig {
    /// Parse a JSON configuration; absent keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, SearchError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::InvalidThreshold(self.threshold));
        }

        for field in SearchField::ALL {
            let weight = self.weights.weight(field);
            if !weight.is_finite() || weight < 0.0 {
                return Err(SearchError::InvalidWeight {
                    field: field.name(),
                    weight,
                });
            }
        }
        if self.weights.total() <= 0.0 {
            return Err(SearchError::NoPositiveWeight);
        }

        if self.min_match_char_length == 0 {
            return Err(SearchError::InvalidMinMatchLength);
        }
        if self.max_edit_distance > MAX_EDIT_DISTANCE {
            return Err(SearchError::EditDistanceTooLarge(self.max_edit_distance));
        }
        if self.candidate_multiplier == 0 {
            return Err(SearchError::InvalidCandidateMultiplier);
        }

        let boosts = [
            ("labelSubstring", self.boosts.label_substring),
            ("codeSubstring", self.boosts.code_substring),
            ("wordBoundary", self.boosts.word_boundary),
        ];
        for (name, value) in boosts {
            if !value.is_finite() || value < 1.0 {
                return Err(SearchError::InvalidBoost { name, value });
            }
        }

        Ok(())
    }

    /// Edits allowed for a query of `query_chars` characters, so that
    /// edits / length never exceeds the threshold
    pub fn allowed_edits(&self, query_chars: usize) -> usize {
        (self.threshold * query_chars as f64).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.total() - 1.31).abs() < 1e-9);
        assert_eq!(config.weights.weight(SearchField::PreferredLabel), 0.40);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SearchConfig::from_json_str(r#"{"threshold": 0.2, "weights": {"code": 0.5}}"#)
                .unwrap();

        assert_eq!(config.threshold, 0.2);
        assert_eq!(config.weights.code, 0.5);
        assert_eq!(config.weights.preferred_label, 0.40);
        assert_eq!(config.boosts.label_substring, 1.3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SearchConfig::from_json_str(r#"{"threshold": 1.5}"#),
            Err(SearchError::InvalidThreshold(_))
        ));
        assert!(matches!(
            SearchConfig::from_json_str(r#"{"weights": {"scopeNote": -1}}"#),
            Err(SearchError::InvalidWeight { field: "scopeNote", .. })
        ));
        assert!(matches!(
            SearchConfig::from_json_str(r#"{"maxEditDistance": 9}"#),
            Err(SearchError::EditDistanceTooLarge(9))
        ));
        assert!(matches!(
            SearchConfig::from_json_str(r#"{"boosts": {"wordBoundary": 0.5}}"#),
            Err(SearchError::InvalidBoost { .. })
        ));
        assert!(matches!(
            SearchConfig::from_json_str("not json"),
            Err(SearchError::Parse(_))
        ));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let config = SearchConfig {
            weights: FieldWeights {
                preferred_label: 0.0,
                code: 0.0,
                alternate_designations: 0.0,
                description: 0.0,
                definition: 0.0,
                regulated_profession_note: 0.0,
                scope_note: 0.0,
                occupation_type: 0.0,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SearchError::NoPositiveWeight)));
    }

    #[test]
    fn test_allowed_edits() {
        let config = SearchConfig::default();
        assert_eq!(config.allowed_edits(1), 0);
        assert_eq!(config.allowed_edits(3), 1);
        assert_eq!(config.allowed_edits(5), 2);
        assert_eq!(config.allowed_edits(15), 6);
        assert_eq!(config.allowed_edits(20), 8);

        let strict = SearchConfig {
            threshold: 0.0,
            ..Default::default()
        };
        assert_eq!(strict.allowed_edits(20), 0);
    }
}
