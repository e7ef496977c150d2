use thiserror::Error;

/// Rejected search configuration
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("weight for '{field}' must be a finite, non-negative number, got {weight}")]
    InvalidWeight { field: &'static str, weight: f64 },

    #[error("at least one field weight must be positive")]
    NoPositiveWeight,

    #[error("minimum match length must be at least 1")]
    InvalidMinMatchLength,

    #[error("max edit distance {0} exceeds the supported maximum of {max}", max = crate::config::MAX_EDIT_DISTANCE)]
    EditDistanceTooLarge(u8),

    #[error("boost '{name}' must be a finite number >= 1, got {value}")]
    InvalidBoost { name: &'static str, value: f64 },

    #[error("candidate multiplier must be at least 1")]
    InvalidCandidateMultiplier,

    #[error("failed to parse search configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Malformed facet filter string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid facet format '{0}', expected 'name=value'")]
    MissingSeparator(String),

    #[error("unknown facet '{0}', expected 'major' or 'type'")]
    UnknownFacet(String),

    #[error("facet '{0}' has an empty value")]
    EmptyValue(String),
}
