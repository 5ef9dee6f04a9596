//! Attribute table
//!
//! Maps string keys to values of arbitrary type for ad-hoc object properties.

use std::any::{Any, type_name};

use rustc_hash::FxHashMap;

use super::boxed::TypedValueBox;

/// Table of named values of mixed types.
///
/// The table owns every value. Overwriting or removing a key drops the old
/// value, and dropping the table drops them all.
#[derive(Debug, Default)]
pub struct AttributeTable {
    /// Boxed values keyed by name
    entries: FxHashMap<String, TypedValueBox>,
}

impl AttributeTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing whatever was there.
    ///
    /// The previous value may have any type; it is returned so the caller can
    /// inspect it, and dropped otherwise.
    pub fn add<T: Any>(&mut self, key: impl Into<String>, value: T) -> Option<TypedValueBox> {
        let key = key.into();
        let previous = self.entries.insert(key, TypedValueBox::new(value));
        if let Some(previous) = &previous {
            log::trace!("Replaced attribute of type {}", previous.type_name());
        }
        previous
    }

    /// Borrow the value under `key` as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::TypeMismatch`] if the stored value is not a `T`
    pub fn get<T: Any>(&self, key: &str) -> Result<Option<&T>, AttributeError> {
        let Some(boxed) = self.entries.get(key) else {
            return Ok(None);
        };
        boxed
            .get::<T>()
            .map(Some)
            .ok_or_else(|| mismatch::<T>(key, boxed))
    }

    /// Mutably borrow the value under `key` as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::TypeMismatch`] if the stored value is not a `T`
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Result<Option<&mut T>, AttributeError> {
        let Some(boxed) = self.entries.get_mut(key) else {
            return Ok(None);
        };
        if !boxed.is::<T>() {
            return Err(mismatch::<T>(key, boxed));
        }
        Ok(boxed.get_mut::<T>())
    }

    /// Copy the value under `key` into `out`.
    ///
    /// Returns `Ok(false)` and leaves `out` untouched if `key` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::TypeMismatch`] if the stored value is not a
    /// `T`; `out` is left untouched.
    pub fn get_into<T: Any + Clone>(
        &self,
        key: &str,
        out: &mut T,
    ) -> Result<bool, AttributeError> {
        match self.get::<T>(key)? {
            Some(value) => {
                out.clone_from(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove and drop the value under `key`.
    ///
    /// Returns true if a value was removed
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Check if a value is stored under `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the type name of the value under `key`
    #[must_use]
    pub fn type_name_of(&self, key: &str) -> Option<&'static str> {
        self.entries.get(key).map(TypedValueBox::type_name)
    }

    /// Iterate over all keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Get the number of stored values
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all values
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn mismatch<T: Any>(key: &str, boxed: &TypedValueBox) -> AttributeError {
    AttributeError::TypeMismatch {
        key: key.to_string(),
        expected: type_name::<T>(),
        found: boxed.type_name(),
    }
}

/// Errors that can occur when reading attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The value was read as a different type than it was stored as
    TypeMismatch {
        /// Attribute key
        key: String,
        /// Type the caller asked for
        expected: &'static str,
        /// Type the value was stored as
        found: &'static str,
    },
}

impl std::fmt::Display for AttributeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "Attribute '{key}' has type {found}, requested as {expected}"
            ),
        }
    }
}

impl std::error::Error for AttributeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::rc::Rc;

    #[test]
    fn test_round_trip() {
        let mut table = AttributeTable::new();
        table.add("health", 5.0_f32);
        table.add("position", Vec3::new(1.0, 2.0, 3.0));

        let mut health = 0.0_f32;
        assert_eq!(table.get_into("health", &mut health), Ok(true));
        assert!((health - 5.0).abs() < f32::EPSILON);

        let mut position = Vec3::ZERO;
        assert_eq!(table.get_into("position", &mut position), Ok(true));
        assert_eq!(position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_absent_key_leaves_output() {
        let table = AttributeTable::new();

        let mut mana = 6.0_f32;
        assert_eq!(table.get_into("mana", &mut mana), Ok(false));
        assert!((mana - 6.0).abs() < f32::EPSILON);
        assert_eq!(table.get::<f32>("mana"), Ok(None));
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let mut table = AttributeTable::new();
        table.add("position", Vec3::ZERO);

        let mut value = 1.0_f32;
        let err = table.get_into("position", &mut value).unwrap_err();

        assert!(matches!(err, AttributeError::TypeMismatch { ref key, .. } if key == "position"));
        assert!((value - 1.0).abs() < f32::EPSILON, "Output must be untouched");
        assert!(table.get_mut::<u32>("position").is_err());
    }

    #[test]
    fn test_overwrite_drops_previous_value() {
        let mut table = AttributeTable::new();
        let first = Rc::new(1_u32);

        table.add("value", Rc::clone(&first));
        assert_eq!(Rc::strong_count(&first), 2);

        table.add("value", Rc::new(2_u32));
        assert_eq!(Rc::strong_count(&first), 1, "Old box must be released");

        let mut out = Rc::new(0_u32);
        assert_eq!(table.get_into("value", &mut out), Ok(true));
        assert_eq!(*out, 2);
    }

    #[test]
    fn test_overwrite_with_other_type() {
        let mut table = AttributeTable::new();
        table.add("slot", 3_i32);

        let previous = table.add("slot", String::from("sword")).unwrap();
        assert_eq!(previous.get::<i32>(), Some(&3));
        assert_eq!(table.type_name_of("slot"), Some(type_name::<String>()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut table = AttributeTable::new();
        let tracked = Rc::new("mana");
        table.add("mana", Rc::clone(&tracked));

        assert!(table.remove("mana"));
        assert!(!table.remove("mana"));
        assert!(!table.contains("mana"));
        assert_eq!(Rc::strong_count(&tracked), 1);
    }

    #[test]
    fn test_drop_releases_all_values() {
        let tracked = Rc::new(0_u8);
        {
            let mut table = AttributeTable::new();
            table.add("a", Rc::clone(&tracked));
            table.add("b", Rc::clone(&tracked));
            assert_eq!(Rc::strong_count(&tracked), 3);
        }
        assert_eq!(Rc::strong_count(&tracked), 1);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut table = AttributeTable::new();
        table.add("score", 10_u32);

        if let Ok(Some(score)) = table.get_mut::<u32>("score") {
            *score += 5;
        }

        assert_eq!(table.get::<u32>("score"), Ok(Some(&15)));
    }

    #[test]
    fn test_keys_and_clear() {
        let mut table = AttributeTable::new();
        table.add("a", 1_u8);
        table.add("b", 2_u8);

        let mut keys: Vec<_> = table.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, ["a", "b"]);

        table.clear();
        assert!(table.is_empty());
    }
}
