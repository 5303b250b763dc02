//! Cached coordinate transforms between pairs of CRS identifiers.
//!
//! A transform is keyed by the identifiers of its endpoints and refined by
//! the [`DatumTransforms`] it was built with, so several transforms can share
//! one `(source, destination)` pair. The [`TransformRegistry`] resolves
//! endpoints through a [`CrsRegistry`](crate::crs::CrsRegistry) on a miss and
//! drops transforms when one of their endpoints is invalidated.

mod registry;
mod types;

pub use registry::TransformRegistry;
pub use types::{CrsPair, DatumTransforms, TransformBuilder, TransformEntry};
