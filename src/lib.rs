//! A typed resource cache and a type-erased attribute table
//!
//! This crate provides:
//! - A repository that loads each (type, name) resource once and reference-counts it
//! - Pluggable per-type loaders
//! - String-keyed attribute tables with checked typed reads

pub mod attributes;
pub mod core;
pub mod demo;
pub mod resources;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::attributes::{AttributeError, AttributeTable, TypedValueBox};
    pub use crate::core::{CacheStats, RepositoryConfig};
    pub use crate::resources::{
        LoadError, Loadable, Resource, ResourceError, ResourceHandle, ResourceRepository,
    };
}
