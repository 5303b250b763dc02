//! CRS definition types and the parser collaborator contract.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Why a CRS could not be parsed.
///
/// Produced by [`CrsParser`] implementations. The registry never returns
/// this to its callers; a failed parse is cached as an invalid
/// [`CrsDefinition`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrsParseError {
    /// Input was empty
    #[error("Empty CRS definition")]
    EmptyDefinition,

    /// Identifier is well-formed but unknown to the engine
    #[error("Unknown CRS identifier: {0}")]
    UnknownIdentifier(String),

    /// Input could not be parsed at all
    #[error("Malformed CRS definition '{input}': {reason}")]
    Malformed { input: String, reason: String },

    /// Engine-level failure (missing database, projection library error, ...)
    #[error("CRS engine error: {0}")]
    Engine(String),
}

/// Parses identifiers and projection strings into CRS definitions.
///
/// This is the parsing engine the registry caches in front of. Both methods
/// are assumed to be expensive; the registry calls each at most once per
/// distinct input until that input is explicitly updated.
pub trait CrsParser: Send {
    /// Parse an authority identifier such as `EPSG:4326`.
    fn parse_identifier(&self, id: &str) -> Result<CrsDefinition, CrsParseError>;

    /// Parse a raw projection definition string such as
    /// `+proj=longlat +datum=WGS84 +no_defs`.
    fn parse_proj_string(&self, proj: &str) -> Result<CrsDefinition, CrsParseError>;
}

#[derive(Debug)]
struct CrsData {
    auth_id: String,
    proj_definition: String,
    description: String,
    valid: bool,
}

/// A resolved coordinate reference system.
///
/// Cheap to clone: clones share one allocation, which is what lets callers
/// tell a cache hit (same instance) from a fresh parse.
///
/// Validity is an explicit flag. An invalid definition is an ordinary value
/// the registries cache like any other.
#[derive(Clone)]
pub struct CrsDefinition {
    inner: Arc<CrsData>,
}

impl CrsDefinition {
    /// Create a valid definition.
    ///
    /// # Arguments
    ///
    /// * `auth_id` - Authority identifier, e.g. `EPSG:3857`. May be empty for
    ///   definitions built from a projection string with no known authority.
    /// * `proj_definition` - Projection parameters handed to the transform engine
    pub fn new(auth_id: impl Into<String>, proj_definition: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(CrsData {
                auth_id: auth_id.into(),
                proj_definition: proj_definition.into(),
                description: String::new(),
                valid: true,
            }),
        }
    }

    /// Create the value that stands for "parsing failed".
    pub fn invalid() -> Self {
        Self {
            inner: Arc::new(CrsData {
                auth_id: String::new(),
                proj_definition: String::new(),
                description: String::new(),
                valid: false,
            }),
        }
    }

    /// Attach a human-readable description.
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(CrsData {
                auth_id: self.inner.auth_id.clone(),
                proj_definition: self.inner.proj_definition.clone(),
                description: description.into(),
                valid: self.inner.valid,
            }),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.inner.valid
    }

    pub fn auth_id(&self) -> &str {
        &self.inner.auth_id
    }

    pub fn proj_definition(&self) -> &str {
        &self.inner.proj_definition
    }

    pub fn description(&self) -> &str {
        &self.inner.description
    }

    /// True when both values were produced by the same parse.
    pub fn same_instance(&self, other: &CrsDefinition) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Coordinate-system identity: validity, authority and projection parameters.
/// The description does not take part.
impl PartialEq for CrsDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.inner.valid == other.inner.valid
            && self.inner.auth_id == other.inner.auth_id
            && self.inner.proj_definition == other.inner.proj_definition
    }
}

impl Eq for CrsDefinition {}

impl fmt::Debug for CrsDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.inner.valid {
            return f.write_str("CrsDefinition(invalid)");
        }
        f.debug_struct("CrsDefinition")
            .field("auth_id", &self.inner.auth_id)
            .field("proj_definition", &self.inner.proj_definition)
            .finish()
    }
}

impl fmt::Display for CrsDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.inner.valid {
            f.write_str("<invalid CRS>")
        } else if !self.inner.auth_id.is_empty() {
            f.write_str(&self.inner.auth_id)
        } else {
            f.write_str(&self.inner.proj_definition)
        }
    }
}
