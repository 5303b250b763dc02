//! Shared CRS and transform cache.
//!
//! [`CrsCacheSystem`] owns both registries behind one lock. The application
//! constructs it once at startup and shares it (usually as
//! `Arc<CrsCacheSystem<_, _>>`) with every caller that needs a CRS or a
//! transform; dropping it releases every cached transform.
//!
//! # Locking
//!
//! A single `parking_lot::Mutex` guards both registries. Lookups, lazy
//! inserts, updates and invalidations each run to completion under it,
//! including the collaborator parse/build call on a miss. An update and the
//! invalidation it triggers happen in one critical section, so no transform
//! built from the old definition can be inserted after the update returns.

use crate::config::{ConfigError, RegistryConfig};
use crate::crs::{CrsDefinition, CrsParser, CrsRegistry};
use crate::log::{Logger, TracingLogger};
use crate::stats::CacheStatistics;
use crate::transform::{DatumTransforms, TransformBuilder, TransformRegistry};
use crate::{log_debug, log_info};
use parking_lot::Mutex;
use std::sync::Arc;

struct Registries<P, B: TransformBuilder> {
    crs: CrsRegistry<P>,
    transforms: TransformRegistry<B>,
}

/// Thread-safe facade over a [`CrsRegistry`] and a [`TransformRegistry`].
///
/// # Example
///
/// ```
/// use crscache::crs::{CrsDefinition, CrsParseError, CrsParser};
/// use crscache::transform::{DatumTransforms, TransformBuilder};
/// use crscache::system::CrsCacheSystem;
///
/// struct Parser;
/// impl CrsParser for Parser {
///     fn parse_identifier(&self, id: &str) -> Result<CrsDefinition, CrsParseError> {
///         Ok(CrsDefinition::new(id, format!("+init={}", id)))
///     }
///     fn parse_proj_string(&self, proj: &str) -> Result<CrsDefinition, CrsParseError> {
///         Ok(CrsDefinition::new("", proj))
///     }
/// }
///
/// struct Builder;
/// impl TransformBuilder for Builder {
///     type Transform = (String, String);
///     fn build_transform(
///         &self,
///         src: &CrsDefinition,
///         dst: &CrsDefinition,
///         _datum: DatumTransforms,
///     ) -> (String, String) {
///         (src.auth_id().to_string(), dst.auth_id().to_string())
///     }
/// }
///
/// let cache = CrsCacheSystem::with_defaults(Parser, Builder);
/// let wgs84 = cache.resolve_by_epsg_code(4326);
/// assert_eq!(wgs84.auth_id(), "EPSG:4326");
///
/// let t = cache.resolve_transform("EPSG:4326", "EPSG:3857", DatumTransforms::default());
/// assert_eq!(t.1, "EPSG:3857");
/// ```
pub struct CrsCacheSystem<P, B: TransformBuilder> {
    registries: Mutex<Registries<P, B>>,
    logger: Arc<dyn Logger>,
}

impl<P: CrsParser, B: TransformBuilder> CrsCacheSystem<P, B> {
    /// Create a cache system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(
        parser: P,
        builder: B,
        config: RegistryConfig,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(parser, builder, config, logger))
    }

    /// Create a cache system with the default configuration, logging via `tracing`.
    pub fn with_defaults(parser: P, builder: B) -> Self {
        Self::build(
            parser,
            builder,
            RegistryConfig::default(),
            Arc::new(TracingLogger::new()),
        )
    }

    fn build(parser: P, builder: B, config: RegistryConfig, logger: Arc<dyn Logger>) -> Self {
        log_debug!(
            logger,
            "Creating CRS cache (EPSG authority: {}, capacity: {})",
            config.epsg_authority,
            config.initial_capacity
        );
        let capacity = config.initial_capacity;
        Self {
            registries: Mutex::new(Registries {
                crs: CrsRegistry::new(parser, config, Arc::clone(&logger)),
                transforms: TransformRegistry::with_capacity(
                    builder,
                    capacity,
                    Arc::clone(&logger),
                ),
            }),
            logger,
        }
    }

    /// See [`CrsRegistry::resolve_by_identifier`].
    pub fn resolve_by_identifier(&self, id: &str) -> CrsDefinition {
        self.registries.lock().crs.resolve_by_identifier(id)
    }

    /// See [`CrsRegistry::resolve_by_auth_id`].
    pub fn resolve_by_auth_id(&self, auth_id: &str) -> CrsDefinition {
        self.registries.lock().crs.resolve_by_auth_id(auth_id)
    }

    /// See [`CrsRegistry::resolve_by_epsg_code`].
    pub fn resolve_by_epsg_code(&self, code: u32) -> CrsDefinition {
        self.registries.lock().crs.resolve_by_epsg_code(code)
    }

    /// See [`CrsRegistry::resolve_by_proj_string`].
    pub fn resolve_by_proj_string(&self, proj: &str) -> CrsDefinition {
        self.registries.lock().crs.resolve_by_proj_string(proj)
    }

    /// Re-parse `id` and drop every cached transform that has it as an endpoint.
    ///
    /// See [`CrsRegistry::update_definition`]. Cached projection-string
    /// definitions are left alone.
    pub fn update_definition(&self, id: &str) -> bool {
        let mut guard = self.registries.lock();
        let Registries { crs, transforms } = &mut *guard;
        crs.update_definition(id, transforms)
    }

    /// See [`TransformRegistry::resolve_transform`].
    pub fn resolve_transform(
        &self,
        source: &str,
        destination: &str,
        datum: DatumTransforms,
    ) -> Arc<B::Transform> {
        let mut guard = self.registries.lock();
        let Registries { crs, transforms } = &mut *guard;
        transforms.resolve_transform(crs, source, destination, datum)
    }

    /// See [`TransformRegistry::invalidate`].
    pub fn invalidate(&self, crs_id: &str) -> usize {
        self.registries.lock().transforms.invalidate(crs_id)
    }

    /// Release every cached transform. CRS definitions stay cached.
    pub fn clear_transforms(&self) -> usize {
        self.registries.lock().transforms.clear()
    }

    pub fn contains_transform(
        &self,
        source: &str,
        destination: &str,
        datum: DatumTransforms,
    ) -> bool {
        self.registries
            .lock()
            .transforms
            .contains(source, destination, datum)
    }

    pub fn transform_count(&self) -> usize {
        self.registries.lock().transforms.transform_count()
    }

    /// Number of cached identifier and projection-string definitions.
    pub fn crs_count(&self) -> (usize, usize) {
        let guard = self.registries.lock();
        (guard.crs.identifier_count(), guard.crs.proj_string_count())
    }

    /// Snapshot both registries' counters.
    pub fn statistics(&self) -> CacheStatistics {
        let guard = self.registries.lock();
        CacheStatistics::from_stats(guard.crs.stats(), guard.transforms.stats())
    }

    /// Write a one-line summary of the current statistics at info level.
    pub fn log_statistics(&self) {
        let stats = self.statistics();
        log_info!(
            self.logger,
            "[CRS CACHE] CRS: {} ids ({:.1}% hits), {} proj strings ({:.1}% hits), {} parse failures; \
             transforms: {} ({:.1}% hits), {} released",
            stats.crs.identifier_entries,
            stats.identifier_hit_rate_percent,
            stats.crs.proj_entries,
            stats.proj_hit_rate_percent,
            stats.crs.parse_failures,
            stats.transforms.entries,
            stats.transform_hit_rate_percent,
            stats.transforms.released
        );
    }
}
