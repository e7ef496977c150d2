// Public modules
pub mod breadcrumb;
pub mod categories;
pub mod code;
pub mod config;
pub mod error;
pub mod filtering;
pub mod models;
pub mod search;
pub mod taxonomy;

// Re-export commonly used types for convenience
pub use breadcrumb::{breadcrumb, breadcrumb_segments};
pub use categories::{display_name, group_name};
pub use code::{CodePrefixes, GroupLevel};
pub use config::{BoostFactors, FieldWeights, SearchConfig};
pub use error::{FilterError, SearchError};
pub use filtering::{parse_facet_filters, AvailableFilters, SearchFilters};
pub use models::{Record, SearchField};
pub use search::{Candidate, RelevanceRanker, SearchIndex, SearchMatch, SearchResult};
pub use taxonomy::{build_taxonomy, find_group, GroupNode, TaxonomyChild};
