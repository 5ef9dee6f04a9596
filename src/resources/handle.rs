//! Resource handle implementation
//!
//! A handle is the typed view of a cached payload that the repository hands
//! out. Handles for the same (type, name) pair point at the same allocation.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A shared, typed handle to a cached resource of type `T`.
///
/// Cloning a handle is cheap and does not touch the repository's ref-count;
/// only `ResourceRepository::get` and `release` do.
#[derive(Debug)]
pub struct ResourceHandle<T> {
    /// Name the resource was requested under
    name: Rc<str>,
    /// Shared pointer to the payload
    inner: Rc<T>,
}

impl<T> ResourceHandle<T> {
    pub(crate) fn new(name: Rc<str>, inner: Rc<T>) -> Self {
        Self { name, inner }
    }

    /// Get the name this resource is cached under
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a reference to the underlying resource
    #[must_use]
    pub fn get(&self) -> &T {
        &self.inner
    }

    /// Check whether two handles point at the same cached payload
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live `Rc` owners of the payload, the cache entry included
    #[must_use]
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for ResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for ResourceHandle<T> {}

impl<T> Hash for ResourceHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.inner), state);
    }
}

impl<T> std::ops::Deref for ResourceHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
