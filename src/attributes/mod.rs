//! Attribute tables
//!
//! String-keyed storage for values whose types are only known at the call
//! site. Every read checks the stored type tag.

mod boxed;
mod table;

pub use boxed::TypedValueBox;
pub use table::{AttributeError, AttributeTable};
