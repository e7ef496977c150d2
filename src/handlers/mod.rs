pub mod browse_handlers;
pub mod filter_handlers;
pub mod record_handlers;
pub mod search_handlers;

pub use browse_handlers::handle_browse;
pub use filter_handlers::{build_filters, handle_filters};
pub use record_handlers::handle_show;
pub use search_handlers::{handle_search, SearchRequest};
