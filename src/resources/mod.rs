//! Resource cache
//!
//! Provides a typed, name-keyed resource cache with:
//! - One bucket per registered resource type
//! - At most one load per (type, name) pair
//! - Reference counting per cached resource

mod error;
mod handle;
mod repository;
mod resource;

pub use error::{LoadError, ResourceError};
pub use handle::ResourceHandle;
pub use repository::{Loadable, ResourceRepository};
pub use resource::Resource;
