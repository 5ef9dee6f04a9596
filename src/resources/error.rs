//! Error types for the resource cache

/// Errors a loader can report for a single resource name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Nothing exists under the requested name
    NotFound(String),
    /// Data exists but could not be turned into the resource type
    Malformed(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(e) => write!(f, "Not found: {e}"),
            Self::Malformed(e) => write!(f, "Malformed data: {e}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Errors returned by the resource repository
///
/// Every variant except [`ResourceError::Load`] and
/// [`ResourceError::CapacityOverflow`] is a contract violation: the caller
/// used the API in a way it does not allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// `get` or `release` was called for a type that was never registered
    Unregistered {
        /// Name of the requested type
        type_name: &'static str,
    },
    /// `register` was called twice for a type while reregistration is rejected
    AlreadyRegistered {
        /// Name of the registered type
        type_name: &'static str,
    },
    /// The configured bucket capacity could not be allocated
    CapacityOverflow {
        /// Name of the type being registered
        type_name: &'static str,
        /// Requested capacity
        capacity: usize,
    },
    /// A resource's payload was loaded a second time
    AlreadyLoaded {
        /// Name of the resource
        name: String,
    },
    /// A resource was read before its payload was set
    NotLoaded,
    /// A payload was read as a different type than it was loaded as
    TypeMismatch {
        /// Type the caller asked for
        expected: &'static str,
        /// Type the payload was loaded as
        found: &'static str,
    },
    /// `release` named a resource that is not in the bucket
    NotCached {
        /// Name of the requested type
        type_name: &'static str,
        /// Name of the resource
        name: String,
    },
    /// The loader could not produce the resource
    Load {
        /// Name of the requested type
        type_name: &'static str,
        /// Name of the resource
        name: String,
        /// Loader failure
        source: LoadError,
    },
}

impl ResourceError {
    /// Whether this error is a programming error rather than a load failure
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        !matches!(self, Self::Load { .. } | Self::CapacityOverflow { .. })
    }
}

impl std::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unregistered { type_name } => {
                write!(f, "Resource type not registered: {type_name}")
            }
            Self::AlreadyRegistered { type_name } => {
                write!(f, "Resource type already registered: {type_name}")
            }
            Self::CapacityOverflow {
                type_name,
                capacity,
            } => write!(f, "Cannot reserve {capacity} slots for {type_name}"),
            Self::AlreadyLoaded { name } => write!(f, "Resource already loaded: {name}"),
            Self::NotLoaded => write!(f, "Resource payload not loaded"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {expected}, found {found}")
            }
            Self::NotCached { type_name, name } => {
                write!(f, "Resource not cached: {type_name} '{name}'")
            }
            Self::Load {
                type_name,
                name,
                source,
            } => write!(f, "Failed to load {type_name} '{name}': {source}"),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load { source, .. } => Some(source),
            _ => None,
        }
    }
}
