//! Type-erased value box

use std::any::{Any, TypeId, type_name};

/// A single value of any `'static` type, tagged with its runtime type.
///
/// Typed reads check the tag first and return `None` for the wrong type.
pub struct TypedValueBox {
    /// The boxed value
    value: Box<dyn Any>,
    /// Type tag of the boxed value
    type_id: TypeId,
    /// Readable name of the boxed type
    type_name: &'static str,
}

impl TypedValueBox {
    /// Box a value
    #[must_use]
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Check whether the box holds a `T`
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Get the readable name of the boxed type
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the value as `T`, or `None` if it is another type
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        if !self.is::<T>() {
            return None;
        }
        self.value.downcast_ref::<T>()
    }

    /// Mutably borrow the value as `T`, or `None` if it is another type
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        if !self.is::<T>() {
            return None;
        }
        self.value.downcast_mut::<T>()
    }

    /// Take the value out as `T`, handing the box back if it is another type
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if the box does not hold a `T`
    pub fn into_inner<T: Any>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        let Self {
            value,
            type_id,
            type_name,
        } = self;
        value.downcast::<T>().map(|value| *value).map_err(|value| Self {
            value,
            type_id,
            type_name,
        })
    }
}

impl std::fmt::Debug for TypedValueBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedValueBox")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
