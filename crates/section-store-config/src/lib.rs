//! Configuration and file management for section-store
//!
//! This crate provides:
//! - Configuration file loading (TOML)
//! - Store configuration (StoreConfig) and the duplicate registration policy
//! - Cache directory lookup for log files

pub mod config_file;
pub mod paths;
pub mod store_config;

pub use config_file::{config_search_paths, load_config_file, CONFIG_FILE};
pub use paths::cache_dir;
pub use store_config::{DuplicatePolicy, StoreConfig};

/// Channel the store answers requests on unless configured otherwise
pub const DEFAULT_CHANNEL: &str = "store";
