use serde::{Deserialize, Serialize};
use std::fmt;

/// An occupation as delivered by the loader.
///
/// Every field defaults to an empty string; a missing column is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    #[serde(alias = "key_id", alias = "id")]
    pub key_id: String,
    /// Hierarchical code, e.g. `"2512"` or the variant form `"2512.1"`.
    pub code: String,
    #[serde(alias = "preferred_label")]
    pub preferred_label: String,
    pub description: String,
    pub definition: String,
    #[serde(alias = "scope_note")]
    pub scope_note: String,
    /// Newline-delimited list of alternative labels.
    #[serde(alias = "altLabels", alias = "alternate_designations")]
    pub alternate_designations: String,
    #[serde(alias = "conceptType", alias = "occupation_type")]
    pub occupation_type: String,
    #[serde(alias = "iscoGroup", alias = "isco_group_code")]
    pub isco_group_code: String,
    #[serde(alias = "regulated_profession_note")]
    pub regulated_profession_note: String,
    pub status: String,
    #[serde(alias = "conceptUri", alias = "uri")]
    pub url: String,
}

impl Record {
    /// First character of the code, if any.
    pub fn major_group(&self) -> Option<&str> {
        let first = self.code.chars().next()?;
        Some(&self.code[..first.len_utf8()])
    }

    /// Non-empty alternative labels, trimmed
    pub fn alternate_designations(&self) -> impl Iterator<Item = &str> {
        self.alternate_designations
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// Raw value of a searchable field
    pub fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::PreferredLabel => &self.preferred_label,
            SearchField::Code => &self.code,
            SearchField::AlternateDesignations => &self.alternate_designations,
            SearchField::Description => &self.description,
            SearchField::Definition => &self.definition,
            SearchField::RegulatedProfessionNote => &self.regulated_profession_note,
            SearchField::ScopeNote => &self.scope_note,
            SearchField::OccupationType => &self.occupation_type,
        }
    }
}

/// Fields the search index scores against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    PreferredLabel,
    Code,
    AlternateDesignations,
    Description,
    Definition,
    RegulatedProfessionNote,
    ScopeNote,
    OccupationType,
}

impl SearchField {
    pub const ALL: [SearchField; 8] = [
        SearchField::PreferredLabel,
        SearchField::Code,
        SearchField::AlternateDesignations,
        SearchField::Description,
        SearchField::Definition,
        SearchField::RegulatedProfessionNote,
        SearchField::ScopeNote,
        SearchField::OccupationType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SearchField::PreferredLabel => "preferredLabel",
            SearchField::Code => "code",
            SearchField::AlternateDesignations => "alternateDesignations",
            SearchField::Description => "description",
            SearchField::Definition => "definition",
            SearchField::RegulatedProfessionNote => "regulatedProfessionNote",
            SearchField::ScopeNote => "scopeNote",
            SearchField::OccupationType => "occupationType",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
