//! Resource repository
//!
//! Caches loaded resources per type and name so every (type, name) pair is
//! loaded at most once.

use std::any::{Any, TypeId, type_name};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::error::{LoadError, ResourceError};
use super::handle::ResourceHandle;
use super::resource::Resource;
use crate::core::{CacheStats, RepositoryConfig};

/// A resource type with a default loader.
///
/// Types implementing this can be registered with
/// [`ResourceRepository::register`]; other types go through
/// [`ResourceRepository::register_with`] and an explicit loader.
pub trait Loadable: Sized + 'static {
    /// Produce the resource stored under `name`
    ///
    /// # Errors
    ///
    /// Returns an error if nothing usable exists under `name`
    fn load(name: &str) -> Result<Self, LoadError>;
}

type ErasedLoader = Box<dyn Fn(&str) -> Result<Rc<dyn Any>, LoadError>>;

/// All cached resources of one type
struct Bucket {
    /// Name of the bucket's resource type
    type_name: &'static str,
    /// Resources keyed by name
    entries: FxHashMap<String, Resource>,
    /// Loader invoked on a cache miss
    loader: ErasedLoader,
}

fn unregistered<T: Any>() -> ResourceError {
    ResourceError::Unregistered {
        type_name: type_name::<T>(),
    }
}

/// Cache of loaded resources, bucketed by type.
///
/// Each type must be registered once before it is requested. Payloads are
/// held in `Rc`, so the repository and its handles stay on one thread.
pub struct ResourceRepository {
    /// One bucket per registered type
    buckets: FxHashMap<TypeId, Bucket>,
    /// Repository settings
    config: RepositoryConfig,
    /// Lookup counters
    stats: CacheStats,
}

impl ResourceRepository {
    /// Create an empty repository with the default config
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RepositoryConfig::default())
    }

    /// Create an empty repository with the given config
    #[must_use]
    pub fn with_config(config: RepositoryConfig) -> Self {
        Self {
            buckets: FxHashMap::default(),
            config,
            stats: CacheStats::new(),
        }
    }

    /// Register `T` using its [`Loadable`] implementation
    ///
    /// # Errors
    ///
    /// See [`ResourceRepository::register_with`]
    pub fn register<T: Loadable>(&mut self) -> Result<(), ResourceError> {
        self.register_with::<T>(T::load)
    }

    /// Register `T` with an explicit loader.
    ///
    /// Registering a type that already has a bucket clears that bucket,
    /// dropping everything cached for it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AlreadyRegistered`] if `T` is already
    /// registered and the config rejects reregistration, or
    /// [`ResourceError::CapacityOverflow`] if the configured bucket capacity
    /// cannot be allocated. On error any existing bucket is left intact.
    pub fn register_with<T: Any>(
        &mut self,
        loader: impl Fn(&str) -> Result<T, LoadError> + 'static,
    ) -> Result<(), ResourceError> {
        let type_id = TypeId::of::<T>();
        let type_name = type_name::<T>();

        if let Some(existing) = self.buckets.get(&type_id) {
            if self.config.reject_reregistration {
                return Err(ResourceError::AlreadyRegistered { type_name });
            }
            log::warn!(
                "Re-registering {type_name}, dropping {} cached resource(s)",
                existing.entries.len()
            );
        }

        let mut entries: FxHashMap<String, Resource> = FxHashMap::default();
        entries
            .try_reserve(self.config.initial_capacity)
            .map_err(|_| ResourceError::CapacityOverflow {
                type_name,
                capacity: self.config.initial_capacity,
            })?;

        let bucket = Bucket {
            type_name,
            entries,
            loader: Box::new(move |name: &str| {
                loader(name).map(|value| Rc::new(value) as Rc<dyn Any>)
            }),
        };
        self.buckets.insert(type_id, bucket);

        log::debug!("Registered resource type {type_name}");
        Ok(())
    }

    /// Get the resource of type `T` named `name`, loading it on first request.
    ///
    /// Every successful call counts as one reference. An empty name is a
    /// no-op and returns `Ok(None)` without loading anything.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unregistered`] if `T` was never registered,
    /// or [`ResourceError::Load`] if the loader fails. A failed load caches
    /// nothing, so a later request runs the loader again.
    pub fn get<T: Any>(
        &mut self,
        name: &str,
    ) -> Result<Option<ResourceHandle<T>>, ResourceError> {
        if name.is_empty() {
            self.stats.record_empty_request();
            return Ok(None);
        }

        let bucket = self
            .buckets
            .get_mut(&TypeId::of::<T>())
            .ok_or_else(unregistered::<T>)?;

        if let Some(resource) = bucket.entries.get_mut(name) {
            let payload = resource.get::<T>()?;
            let count = resource.add_ref();
            self.stats.record_hit();
            if self.config.log_hits {
                log::trace!("Cache hit: {} '{name}' (refs: {count})", bucket.type_name);
            }
            return Ok(Some(ResourceHandle::new(Rc::from(name), payload)));
        }

        let mut resource = Resource::new();
        let loader = &bucket.loader;
        if let Err(err) = resource.load_erased(name, bucket.type_name, |name| loader(name)) {
            self.stats.record_failed_load();
            log::warn!("{err}");
            return Err(err);
        }

        let payload = resource.get::<T>()?;
        bucket.entries.insert(name.to_string(), resource);
        self.stats.record_load();
        log::debug!("Loaded {} '{name}'", bucket.type_name);

        Ok(Some(ResourceHandle::new(Rc::from(name), payload)))
    }

    /// Drop one reference to the resource of type `T` named `name`.
    ///
    /// Returns the remaining count. A count of zero is logged but the
    /// resource stays cached.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unregistered`] if `T` was never registered,
    /// or [`ResourceError::NotCached`] if nothing is cached under `name`.
    pub fn release<T: Any>(&mut self, name: &str) -> Result<usize, ResourceError> {
        let bucket = self
            .buckets
            .get_mut(&TypeId::of::<T>())
            .ok_or_else(unregistered::<T>)?;

        let type_name = bucket.type_name;
        let resource = bucket
            .entries
            .get_mut(name)
            .ok_or_else(|| ResourceError::NotCached {
                type_name,
                name: name.to_string(),
            })?;

        Ok(resource.remove_ref())
    }

    /// Get the reference count of a cached resource
    #[must_use]
    pub fn ref_count<T: Any>(&self, name: &str) -> Option<usize> {
        self.buckets
            .get(&TypeId::of::<T>())
            .and_then(|bucket| bucket.entries.get(name))
            .map(Resource::ref_count)
    }

    /// Check if a resource is cached
    #[must_use]
    pub fn contains<T: Any>(&self, name: &str) -> bool {
        self.ref_count::<T>(name).is_some()
    }

    /// Check if `T` has been registered
    #[must_use]
    pub fn is_registered<T: Any>(&self) -> bool {
        self.buckets.contains_key(&TypeId::of::<T>())
    }

    /// Get the number of cached resources of type `T`
    #[must_use]
    pub fn len<T: Any>(&self) -> usize {
        self.buckets
            .get(&TypeId::of::<T>())
            .map_or(0, |bucket| bucket.entries.len())
    }

    /// Iterate over the names of all registered types
    pub fn registered_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.buckets.values().map(|bucket| bucket.type_name)
    }

    /// Get the lookup counters
    #[must_use]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get the repository config
    #[must_use]
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }
}

impl Default for ResourceRepository {
    fn default() -> Self {
        Self::new()
    }
}
