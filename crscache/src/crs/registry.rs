//! Identifier-keyed and projection-string-keyed CRS cache.

use crate::config::RegistryConfig;
use crate::crs::types::{CrsDefinition, CrsParser};
use crate::log::Logger;
use crate::stats::CrsCacheStats;
use crate::{log_debug, log_trace};
use std::collections::HashMap;
use std::sync::Arc;

/// Receives the signal that a CRS definition changed.
///
/// [`CrsRegistry::update_definition`] calls this for every update so that
/// anything built from the old definition can be dropped.
pub trait CrsInvalidation {
    /// Drop everything derived from `crs_id`. Returns how many items were released.
    fn invalidate_crs(&mut self, crs_id: &str) -> usize;
}

/// Cache of parsed CRS definitions.
///
/// Two independent maps: one keyed by authority identifier, one keyed by
/// raw projection string. A CRS reachable through both is cached twice and
/// the two entries are never reconciled.
///
/// Failed parses are cached as [`CrsDefinition::invalid`], so a malformed
/// input costs one parse attempt until it is explicitly updated.
///
/// Not synchronized; [`CrsCacheSystem`](crate::system::CrsCacheSystem)
/// provides the shared, locked form.
pub struct CrsRegistry<P> {
    parser: P,
    config: RegistryConfig,
    by_auth_id: HashMap<String, CrsDefinition>,
    by_proj_string: HashMap<String, CrsDefinition>,
    stats: CrsCacheStats,
    logger: Arc<dyn Logger>,
}

impl<P: CrsParser> CrsRegistry<P> {
    /// Create an empty registry.
    ///
    /// The configuration is taken as-is; callers that accept user input
    /// should run [`RegistryConfig::validate`] first.
    pub fn new(parser: P, config: RegistryConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            parser,
            by_auth_id: HashMap::with_capacity(config.initial_capacity),
            by_proj_string: HashMap::with_capacity(config.initial_capacity),
            config,
            stats: CrsCacheStats::new(),
            logger,
        }
    }

    /// Resolve a CRS by authority identifier, parsing it on first use.
    ///
    /// Never fails: a failed parse yields (and caches) an invalid definition.
    pub fn resolve_by_identifier(&mut self, id: &str) -> CrsDefinition {
        if let Some(crs) = self.by_auth_id.get(id) {
            self.stats.record_identifier_hit();
            log_trace!(self.logger, "CRS cache hit for {}", id);
            return crs.clone();
        }

        self.stats.record_identifier_miss();
        let crs = match self.parser.parse_identifier(id) {
            Ok(crs) => {
                log_debug!(self.logger, "Parsed CRS {}", id);
                crs
            }
            Err(e) => {
                self.stats.record_parse_failure();
                log_debug!(self.logger, "Caching invalid CRS for {}: {}", id, e);
                CrsDefinition::invalid()
            }
        };

        self.by_auth_id.insert(id.to_string(), crs.clone());
        self.refresh_entry_counts();
        crs
    }

    /// Same as [`resolve_by_identifier`](Self::resolve_by_identifier).
    pub fn resolve_by_auth_id(&mut self, auth_id: &str) -> CrsDefinition {
        self.resolve_by_identifier(auth_id)
    }

    /// Resolve a CRS by numeric EPSG code.
    ///
    /// The code is formatted with the configured authority (`EPSG:4326` by
    /// default) and shares the identifier cache.
    pub fn resolve_by_epsg_code(&mut self, code: u32) -> CrsDefinition {
        let id = self.config.epsg_identifier(code);
        self.resolve_by_identifier(&id)
    }

    /// Resolve a CRS from a raw projection string, parsing it on first use.
    ///
    /// Uses its own map: a projection string and an equivalent authority
    /// identifier are cached separately.
    pub fn resolve_by_proj_string(&mut self, proj: &str) -> CrsDefinition {
        if let Some(crs) = self.by_proj_string.get(proj) {
            self.stats.record_proj_hit();
            log_trace!(self.logger, "CRS cache hit for projection '{}'", proj);
            return crs.clone();
        }

        self.stats.record_proj_miss();
        let crs = match self.parser.parse_proj_string(proj) {
            Ok(crs) => {
                log_debug!(self.logger, "Parsed CRS from projection '{}'", proj);
                crs
            }
            Err(e) => {
                self.stats.record_parse_failure();
                log_debug!(
                    self.logger,
                    "Caching invalid CRS for projection '{}': {}",
                    proj,
                    e
                );
                CrsDefinition::invalid()
            }
        };

        self.by_proj_string.insert(proj.to_string(), crs.clone());
        self.refresh_entry_counts();
        crs
    }

    /// Re-parse `id` after its definition changed.
    ///
    /// On success the cached entry is replaced (or inserted). On failure any
    /// cached entry is removed, so the next lookup parses again instead of
    /// serving stale data. Either way `dependents` is told to drop everything
    /// built from `id`.
    ///
    /// Only the identifier cache is touched. Projection-string entries are
    /// never invalidated here, even if they describe the same CRS.
    ///
    /// Returns whether the new definition is valid.
    pub fn update_definition(&mut self, id: &str, dependents: &mut dyn CrsInvalidation) -> bool {
        let valid = match self.parser.parse_identifier(id) {
            Ok(crs) => {
                log_debug!(self.logger, "Updated CRS definition for {}", id);
                self.by_auth_id.insert(id.to_string(), crs);
                true
            }
            Err(e) => {
                let had_entry = self.by_auth_id.remove(id).is_some();
                log_debug!(
                    self.logger,
                    "CRS update for {} failed ({}), cached entry removed: {}",
                    id,
                    e,
                    had_entry
                );
                false
            }
        };
        self.stats.record_update(valid);
        self.refresh_entry_counts();

        dependents.invalidate_crs(id);
        valid
    }

    pub fn contains_identifier(&self, id: &str) -> bool {
        self.by_auth_id.contains_key(id)
    }

    pub fn contains_proj_string(&self, proj: &str) -> bool {
        self.by_proj_string.contains_key(proj)
    }

    /// Number of cached identifier entries, invalid ones included.
    pub fn identifier_count(&self) -> usize {
        self.by_auth_id.len()
    }

    /// Number of cached projection-string entries, invalid ones included.
    pub fn proj_string_count(&self) -> usize {
        self.by_proj_string.len()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn stats(&self) -> &CrsCacheStats {
        &self.stats
    }

    fn refresh_entry_counts(&mut self) {
        self.stats
            .update_entry_counts(self.by_auth_id.len(), self.by_proj_string.len());
    }
}
