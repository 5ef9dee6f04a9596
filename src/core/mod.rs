//! Core module
//!
//! Contains the repository configuration and cache statistics

mod config;
mod stats;

pub use config::{ConfigError, RepositoryConfig};
pub use stats::CacheStats;
