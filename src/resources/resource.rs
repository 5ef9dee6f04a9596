//! A single cached resource: an erased payload plus a reference count

use std::any::{Any, type_name};
use std::rc::Rc;

use super::error::{LoadError, ResourceError};

/// Type-erased, reference-counted resource payload.
///
/// The payload is set at most once. Reads go through a checked downcast, so
/// asking for a different type than the one that was loaded is reported as
/// [`ResourceError::TypeMismatch`] instead of reinterpreting the data.
pub struct Resource {
    /// The loaded object, unset until `load` succeeds
    payload: Option<Rc<dyn Any>>,
    /// Name of the payload's concrete type
    type_name: &'static str,
    /// Number of outstanding requests for this resource
    ref_count: usize,
}

impl Resource {
    /// Create an empty resource with a ref-count of one
    #[must_use]
    pub fn new() -> Self {
        Self {
            payload: None,
            type_name: "<unloaded>",
            ref_count: 1,
        }
    }

    /// Load the payload by running `loader` on `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AlreadyLoaded`] if the payload is already set
    /// (the loader is not invoked), or [`ResourceError::Load`] if the loader
    /// fails, in which case the payload stays unset.
    pub fn load<T: Any>(
        &mut self,
        name: &str,
        loader: impl FnOnce(&str) -> Result<T, LoadError>,
    ) -> Result<(), ResourceError> {
        self.load_erased(name, type_name::<T>(), |name| {
            loader(name).map(|value| Rc::new(value) as Rc<dyn Any>)
        })
    }

    pub(crate) fn load_erased(
        &mut self,
        name: &str,
        type_name: &'static str,
        loader: impl FnOnce(&str) -> Result<Rc<dyn Any>, LoadError>,
    ) -> Result<(), ResourceError> {
        if self.payload.is_some() {
            return Err(ResourceError::AlreadyLoaded {
                name: name.to_string(),
            });
        }

        let payload = loader(name).map_err(|source| ResourceError::Load {
            type_name,
            name: name.to_string(),
            source,
        })?;

        self.payload = Some(payload);
        self.type_name = type_name;
        Ok(())
    }

    /// Get the payload as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotLoaded`] if nothing was loaded yet, or
    /// [`ResourceError::TypeMismatch`] if the payload is not a `T`.
    pub fn get<T: Any>(&self) -> Result<Rc<T>, ResourceError> {
        let payload = self.payload.as_ref().ok_or(ResourceError::NotLoaded)?;
        Rc::clone(payload)
            .downcast::<T>()
            .map_err(|_| ResourceError::TypeMismatch {
                expected: type_name::<T>(),
                found: self.type_name,
            })
    }

    /// Check whether the payload has been set
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.payload.is_some()
    }

    /// Name of the payload's concrete type
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Current reference count
    #[must_use]
    pub fn ref_count(&self) -> usize {
        self.ref_count
    }

    /// Increment the reference count and return the new value
    pub fn add_ref(&mut self) -> usize {
        self.ref_count += 1;
        self.ref_count
    }

    /// Decrement the reference count and return the new value.
    ///
    /// Reaching zero does not free anything; the payload stays cached until
    /// the repository is dropped. The count saturates at zero.
    pub fn remove_ref(&mut self) -> usize {
        if self.ref_count == 0 {
            log::warn!("remove_ref on {} with a count of zero", self.type_name);
            return 0;
        }

        self.ref_count -= 1;
        if self.ref_count == 0 {
            log::debug!("{} reached zero references (eviction not implemented)", self.type_name);
        }
        self.ref_count
    }
}

impl Default for Resource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("type_name", &self.type_name)
            .field("loaded", &self.is_loaded())
            .field("ref_count", &self.ref_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resource_is_unloaded() {
        let resource = Resource::new();
        assert!(!resource.is_loaded());
        assert_eq!(resource.ref_count(), 1);
        assert_eq!(resource.type_name(), "<unloaded>");
        assert_eq!(resource.get::<u32>(), Err(ResourceError::NotLoaded));
    }

    #[test]
    fn test_load_and_get() {
        let mut resource = Resource::new();
        resource.load("n", |_| Ok(99_u32)).unwrap();

        assert!(resource.is_loaded());
        assert_eq!(*resource.get::<u32>().unwrap(), 99);
        assert_eq!(resource.type_name(), "u32");
    }

    #[test]
    fn test_double_load_is_rejected() {
        let mut resource = Resource::new();
        resource.load("n", |_| Ok(1_u8)).unwrap();

        let mut called = false;
        let result = resource.load("n", |_| {
            called = true;
            Ok(2_u8)
        });

        assert!(matches!(result, Err(ResourceError::AlreadyLoaded { .. })));
        assert!(!called, "Loader must not run for a loaded resource");
        assert_eq!(*resource.get::<u8>().unwrap(), 1);
    }

    #[test]
    fn test_failed_load_leaves_payload_unset() {
        let mut resource = Resource::new();
        let result = resource.load::<String>("gone", |name| {
            Err(LoadError::NotFound(name.to_string()))
        });

        assert!(matches!(result, Err(ResourceError::Load { .. })));
        assert!(!resource.is_loaded());
        assert_eq!(resource.type_name(), "<unloaded>");
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let mut resource = Resource::new();
        resource.load("n", |_| Ok(1.5_f32)).unwrap();

        let err = resource.get::<u64>().unwrap_err();
        assert_eq!(
            err,
            ResourceError::TypeMismatch {
                expected: "u64",
                found: "f32",
            }
        );
    }

    #[test]
    fn test_ref_counting_saturates() {
        let mut resource = Resource::new();
        assert_eq!(resource.add_ref(), 2);
        assert_eq!(resource.remove_ref(), 1);
        assert_eq!(resource.remove_ref(), 0);
        assert_eq!(resource.remove_ref(), 0);
    }
}
