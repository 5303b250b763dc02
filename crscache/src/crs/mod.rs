//! Coordinate reference system definitions and their cache.
//!
//! [`CrsRegistry`] sits in front of a [`CrsParser`] and keeps every parse
//! result, failed ones included, until the definition is explicitly updated.
//! An update tells a [`CrsInvalidation`] receiver (normally the
//! [`TransformRegistry`](crate::transform::TransformRegistry)) to drop
//! anything built from the old definition.

mod registry;
mod types;

pub use registry::{CrsInvalidation, CrsRegistry};
pub use types::{CrsDefinition, CrsParseError, CrsParser};
