//! Transform cache keys, entries, and the builder collaborator contract.

use crate::crs::CrsDefinition;
use std::fmt;
use std::sync::Arc;

/// The pair of datum-transform selectors a transform is built with.
///
/// Each selector picks one of the datum-shift strategies available between
/// two datums. [`DatumTransforms::UNSPECIFIED`] leaves the choice to the
/// transform engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatumTransforms {
    pub source: i32,
    pub destination: i32,
}

impl DatumTransforms {
    /// Selector value meaning "no datum transform chosen".
    pub const UNSPECIFIED: i32 = -1;

    pub fn new(source: i32, destination: i32) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Both selectors left to the engine.
    pub fn unspecified() -> Self {
        Self::new(Self::UNSPECIFIED, Self::UNSPECIFIED)
    }
}

impl Default for DatumTransforms {
    fn default() -> Self {
        Self::unspecified()
    }
}

impl fmt::Display for DatumTransforms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.destination)
    }
}

/// Source and destination CRS identifiers of a cached transform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrsPair {
    pub source: String,
    pub destination: String,
}

impl CrsPair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// True if `crs_id` is the source or the destination.
    pub fn involves(&self, crs_id: &str) -> bool {
        self.source == crs_id || self.destination == crs_id
    }
}

impl fmt::Display for CrsPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// Builds coordinate transforms between two CRS definitions.
///
/// Construction is the expensive step the transform registry caches. The
/// returned transform must already be initialised. The registry never
/// inspects it: a transform built from invalid definitions, or one that
/// failed to initialise, is cached like any other.
pub trait TransformBuilder: Send {
    /// The transform object produced by this builder.
    type Transform: Send + Sync;

    fn build_transform(
        &self,
        source: &CrsDefinition,
        destination: &CrsDefinition,
        datum: DatumTransforms,
    ) -> Self::Transform;
}

/// A cached transform together with the selectors it was built with.
#[derive(Debug)]
pub struct TransformEntry<T> {
    transform: Arc<T>,
    datum: DatumTransforms,
}

impl<T> TransformEntry<T> {
    pub fn new(transform: T, datum: DatumTransforms) -> Self {
        Self {
            transform: Arc::new(transform),
            datum,
        }
    }

    pub fn datum(&self) -> DatumTransforms {
        self.datum
    }

    /// Hand out a shared handle to the transform.
    pub fn transform(&self) -> Arc<T> {
        Arc::clone(&self.transform)
    }

    pub fn matches(&self, datum: DatumTransforms) -> bool {
        self.datum == datum
    }
}
