pub mod error_mapper;

pub use error_mapper::{map_config_error, map_file_load_error};
