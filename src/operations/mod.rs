pub mod file_ops;
pub mod validation;

pub use file_ops::{load_config, load_records, LoadError};
