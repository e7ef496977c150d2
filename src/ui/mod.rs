pub mod formatting;

pub use formatting::{
    format_available_filters, format_filters, format_record_details, format_result, format_tree,
};
