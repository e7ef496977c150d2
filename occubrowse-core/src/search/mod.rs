mod fuzzy;
mod index;
mod ranking;
mod types;

pub use index::SearchIndex;
pub use ranking::RelevanceRanker;
pub use types::{Candidate, SearchMatch, SearchResult};
