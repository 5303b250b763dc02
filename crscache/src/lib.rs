//! crscache - caching of coordinate reference systems and transforms
//!
//! Parsing a CRS from an authority code or a projection string, and building
//! a transform between two CRSs, are expensive. This crate keeps the results:
//!
//! - [`crs::CrsRegistry`] caches definitions by authority identifier and,
//!   separately, by projection string, including failed parses
//! - [`transform::TransformRegistry`] caches transforms per identifier pair
//!   and datum-transform selectors, and drops them when an endpoint's
//!   definition is updated
//! - [`system::CrsCacheSystem`] owns both behind one lock for shared use
//!
//! The parsing and transform engines are supplied by the caller through
//! [`crs::CrsParser`] and [`transform::TransformBuilder`].
//!
//! ```ignore
//! use crscache::system::CrsCacheSystem;
//! use crscache::transform::DatumTransforms;
//!
//! let cache = CrsCacheSystem::with_defaults(MyParser::new(), MyBuilder::new());
//! let transform = cache.resolve_transform("EPSG:4326", "EPSG:3857", DatumTransforms::default());
//!
//! // The definition of EPSG:4326 changed: transforms using it are dropped
//! cache.update_definition("EPSG:4326");
//! ```

pub mod config;
pub mod crs;
pub mod log;
pub mod logging;
pub mod stats;
pub mod system;
pub mod transform;

/// Version of the crscache library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
