//! Cache statistics tracking and reporting.

use std::time::{Duration, Instant};

/// Counters kept by the CRS registry.
#[derive(Debug, Clone)]
pub struct CrsCacheStats {
    // Identifier cache
    pub identifier_hits: u64,
    pub identifier_misses: u64,
    pub identifier_entries: usize,

    // Projection-string cache
    pub proj_hits: u64,
    pub proj_misses: u64,
    pub proj_entries: usize,

    /// Lookups whose parse failed and was stored as an invalid definition
    pub parse_failures: u64,

    // Explicit updates
    pub updates: u64,
    pub update_failures: u64,

    pub created_at: Instant,
}

impl Default for CrsCacheStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CrsCacheStats {
    pub fn new() -> Self {
        Self {
            identifier_hits: 0,
            identifier_misses: 0,
            identifier_entries: 0,
            proj_hits: 0,
            proj_misses: 0,
            proj_entries: 0,
            parse_failures: 0,
            updates: 0,
            update_failures: 0,
            created_at: Instant::now(),
        }
    }

    /// Identifier cache hit rate (0.0 to 1.0).
    pub fn identifier_hit_rate(&self) -> f64 {
        hit_rate(self.identifier_hits, self.identifier_misses)
    }

    /// Projection-string cache hit rate (0.0 to 1.0).
    pub fn proj_hit_rate(&self) -> f64 {
        hit_rate(self.proj_hits, self.proj_misses)
    }

    pub fn uptime(&self) -> Duration {
        self.created_at.elapsed()
    }

    pub fn record_identifier_hit(&mut self) {
        self.identifier_hits += 1;
    }

    pub fn record_identifier_miss(&mut self) {
        self.identifier_misses += 1;
    }

    pub fn record_proj_hit(&mut self) {
        self.proj_hits += 1;
    }

    pub fn record_proj_miss(&mut self) {
        self.proj_misses += 1;
    }

    pub fn record_parse_failure(&mut self) {
        self.parse_failures += 1;
    }

    /// Record an explicit update and whether its re-parse succeeded.
    pub fn record_update(&mut self, succeeded: bool) {
        self.updates += 1;
        if !succeeded {
            self.update_failures += 1;
        }
    }

    pub fn update_entry_counts(&mut self, identifier_entries: usize, proj_entries: usize) {
        self.identifier_entries = identifier_entries;
        self.proj_entries = proj_entries;
    }
}

/// Counters kept by the transform registry.
#[derive(Debug, Clone)]
pub struct TransformCacheStats {
    pub hits: u64,
    /// Misses; every miss builds exactly one transform
    pub misses: u64,
    pub entries: usize,
    /// Calls to `invalidate`, whether or not anything matched
    pub invalidations: u64,
    /// Transforms dropped by invalidation or teardown
    pub released: u64,
    pub created_at: Instant,
}

impl Default for TransformCacheStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformCacheStats {
    pub fn new() -> Self {
        Self {
            hits: 0,
            misses: 0,
            entries: 0,
            invalidations: 0,
            released: 0,
            created_at: Instant::now(),
        }
    }

    /// Transform cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_invalidation(&mut self, released: usize) {
        self.invalidations += 1;
        self.released += released as u64;
    }

    pub fn record_release(&mut self, released: usize) {
        self.released += released as u64;
    }

    pub fn update_entry_count(&mut self, entries: usize) {
        self.entries = entries;
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// Snapshot of both registries' statistics for reporting.
#[derive(Debug, Clone)]
pub struct CacheStatistics {
    pub crs: CrsCacheStats,
    pub transforms: TransformCacheStats,
    pub identifier_hit_rate_percent: f64,
    pub proj_hit_rate_percent: f64,
    pub transform_hit_rate_percent: f64,
    pub uptime_secs: u64,
}

impl CacheStatistics {
    pub fn from_stats(crs: &CrsCacheStats, transforms: &TransformCacheStats) -> Self {
        Self {
            crs: crs.clone(),
            transforms: transforms.clone(),
            identifier_hit_rate_percent: crs.identifier_hit_rate() * 100.0,
            proj_hit_rate_percent: crs.proj_hit_rate() * 100.0,
            transform_hit_rate_percent: transforms.hit_rate() * 100.0,
            uptime_secs: crs.uptime().as_secs(),
        }
    }

    /// Format statistics as a human-readable report.
    pub fn format(&self) -> String {
        let crs = &self.crs;
        let tr = &self.transforms;

        format!(
            r#"CRS Cache Statistics

CRS BY IDENTIFIER
  Entries:     {}
  Hits:        {}
  Misses:      {}
  Hit Rate:    {:.1}%

CRS BY PROJ STRING
  Entries:     {}
  Hits:        {}
  Misses:      {}
  Hit Rate:    {:.1}%

PARSING
  Failures:    {}
  Updates:     {}
  Failed:      {}

TRANSFORMS
  Entries:     {}
  Hits:        {}
  Built:       {}
  Hit Rate:    {:.1}%
  Invalidated: {}
  Released:    {}

Uptime:        {}s
"#,
            crs.identifier_entries,
            crs.identifier_hits,
            crs.identifier_misses,
            self.identifier_hit_rate_percent,
            crs.proj_entries,
            crs.proj_hits,
            crs.proj_misses,
            self.proj_hit_rate_percent,
            crs.parse_failures,
            crs.updates,
            crs.update_failures,
            tr.entries,
            tr.hits,
            tr.misses,
            self.transform_hit_rate_percent,
            tr.invalidations,
            tr.released,
            self.uptime_secs,
        )
    }
}
