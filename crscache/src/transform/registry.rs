//! Cache of transforms keyed by CRS identifier pair and datum selectors.

use crate::crs::{CrsInvalidation, CrsParser, CrsRegistry};
use crate::log::Logger;
use crate::stats::TransformCacheStats;
use crate::transform::types::{CrsPair, DatumTransforms, TransformBuilder, TransformEntry};
use crate::{log_debug, log_trace};
use std::collections::HashMap;
use std::sync::Arc;

/// Cache of constructed coordinate transforms.
///
/// Keyed by `(source id, destination id)`; each key holds every transform
/// built for that pair, one per distinct [`DatumTransforms`]. Endpoints are
/// referenced by identifier only, so invalidating an identifier is a scan
/// over keys.
///
/// A cached transform is served until an invalidation touches one of its
/// endpoints or the registry is cleared or dropped. There is no
/// stale-but-served state.
pub struct TransformRegistry<B: TransformBuilder> {
    builder: B,
    transforms: HashMap<CrsPair, Vec<TransformEntry<B::Transform>>>,
    stats: TransformCacheStats,
    logger: Arc<dyn Logger>,
}

impl<B: TransformBuilder> TransformRegistry<B> {
    pub fn new(builder: B, logger: Arc<dyn Logger>) -> Self {
        Self::with_capacity(builder, 0, logger)
    }

    /// Create a registry with room for `capacity` CRS pairs.
    pub fn with_capacity(builder: B, capacity: usize, logger: Arc<dyn Logger>) -> Self {
        Self {
            builder,
            transforms: HashMap::with_capacity(capacity),
            stats: TransformCacheStats::new(),
            logger,
        }
    }

    /// Get the transform from `source` to `destination` built with `datum`.
    ///
    /// On a miss both endpoints are resolved through `crs` (each served from
    /// its cache when possible), a transform is built and stored next to any
    /// siblings already cached for the same pair.
    pub fn resolve_transform<P: CrsParser>(
        &mut self,
        crs: &mut CrsRegistry<P>,
        source: &str,
        destination: &str,
        datum: DatumTransforms,
    ) -> Arc<B::Transform> {
        let pair = CrsPair::new(source, destination);

        if let Some(entry) = self
            .transforms
            .get(&pair)
            .and_then(|entries| entries.iter().find(|e| e.matches(datum)))
        {
            self.stats.record_hit();
            log_trace!(self.logger, "Transform cache hit for {} ({})", pair, datum);
            return entry.transform();
        }

        self.stats.record_miss();
        let source_crs = crs.resolve_by_identifier(source);
        let destination_crs = crs.resolve_by_identifier(destination);
        let entry = TransformEntry::new(
            self.builder
                .build_transform(&source_crs, &destination_crs, datum),
            datum,
        );
        let transform = entry.transform();

        log_debug!(
            self.logger,
            "Built transform {} ({}), source valid: {}, destination valid: {}",
            pair,
            datum,
            source_crs.is_valid(),
            destination_crs.is_valid()
        );
        self.transforms.entry(pair).or_default().push(entry);
        let count = self.transform_count();
        self.stats.update_entry_count(count);

        transform
    }

    /// Drop every transform whose source or destination is `crs_id`,
    /// regardless of datum selectors.
    ///
    /// Matching keys are collected first and removed afterwards.
    /// Returns the number of transforms released.
    pub fn invalidate(&mut self, crs_id: &str) -> usize {
        let stale: Vec<CrsPair> = self
            .transforms
            .keys()
            .filter(|pair| pair.involves(crs_id))
            .cloned()
            .collect();

        let released: usize = stale
            .iter()
            .filter_map(|pair| self.transforms.remove(pair))
            .map(|entries| entries.len())
            .sum();

        let count = self.transform_count();
        self.stats.record_invalidation(released);
        self.stats.update_entry_count(count);
        if released > 0 {
            log_debug!(
                self.logger,
                "Invalidated {} transforms across {} pairs for {}",
                released,
                stale.len(),
                crs_id
            );
        }
        released
    }

    /// Release every cached transform. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let released = self.transform_count();
        self.transforms.clear();
        self.stats.record_release(released);
        self.stats.update_entry_count(0);
        log_debug!(self.logger, "Cleared {} cached transforms", released);
        released
    }

    /// Check for a cached transform without building one.
    pub fn contains(&self, source: &str, destination: &str, datum: DatumTransforms) -> bool {
        self.transforms
            .get(&CrsPair::new(source, destination))
            .is_some_and(|entries| entries.iter().any(|e| e.matches(datum)))
    }

    /// Total cached transforms across all pairs.
    pub fn transform_count(&self) -> usize {
        self.transforms.values().map(Vec::len).sum()
    }

    /// Number of distinct CRS pairs with at least one cached transform.
    pub fn pair_count(&self) -> usize {
        self.transforms.len()
    }

    pub fn stats(&self) -> &TransformCacheStats {
        &self.stats
    }
}

impl<B: TransformBuilder> CrsInvalidation for TransformRegistry<B> {
    fn invalidate_crs(&mut self, crs_id: &str) -> usize {
        self.invalidate(crs_id)
    }
}
