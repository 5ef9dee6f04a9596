//! Cache statistics

/// Counters for repository lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache
    hits: u64,
    /// Lookups that ran a loader and cached the result
    loads: u64,
    /// Lookups whose loader failed
    failed_loads: u64,
    /// Lookups with an empty name
    empty_requests: u64,
}

impl CacheStats {
    /// Create zeroed stats
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_load(&mut self) {
        self.loads += 1;
    }

    pub(crate) fn record_failed_load(&mut self) {
        self.failed_loads += 1;
    }

    pub(crate) fn record_empty_request(&mut self) {
        self.empty_requests += 1;
    }

    /// Get the number of cache hits
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Get the number of successful loads
    pub fn loads(&self) -> u64 {
        self.loads
    }

    /// Get the number of failed loads
    pub fn failed_loads(&self) -> u64 {
        self.failed_loads
    }

    /// Get the number of empty-name requests
    pub fn empty_requests(&self) -> u64 {
        self.empty_requests
    }

    /// Lookups that missed the cache, whether the load succeeded or not
    pub fn misses(&self) -> u64 {
        self.loads + self.failed_loads
    }

    /// Fraction of non-empty lookups served from the cache
    pub fn hit_ratio(&self) -> f32 {
        let total = self.hits + self.misses();
        // Guard against division by zero
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    /// Get a formatted stats string
    pub fn format_stats(&self) -> String {
        format!(
            "Hits: {} | Loads: {} (failed: {}) | Empty: {} | Hit ratio: {:.1}%",
            self.hits,
            self.loads,
            self.failed_loads,
            self.empty_requests,
            self.hit_ratio() * 100.0
        )
    }
}
