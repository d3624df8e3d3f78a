//! Configuration module for EFTA-Locator
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default pointing at the public catalog, so an empty file is
//! a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use efta_locator::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("locator.toml")).unwrap();
//! println!("Index database: {}", config.index.database_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FingerprintConfig, IndexConfig, RemoteConfig, SearchConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
