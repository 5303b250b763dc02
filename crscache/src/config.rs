//! Registry configuration.

use thiserror::Error;

/// Authority used by [`resolve_by_epsg_code`] when none is configured.
///
/// [`resolve_by_epsg_code`]: crate::crs::CrsRegistry::resolve_by_epsg_code
pub const DEFAULT_EPSG_AUTHORITY: &str = "EPSG";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The EPSG authority prefix is empty
    #[error("EPSG authority must not be empty")]
    EmptyAuthority,

    /// The EPSG authority prefix cannot form an `AUTHORITY:CODE` identifier
    #[error("Invalid EPSG authority '{0}': must not contain ':' or whitespace")]
    InvalidAuthority(String),
}

/// Configuration shared by the CRS and transform registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Authority prefix used to turn a bare EPSG code into an identifier
    /// (`EPSG` gives `EPSG:4326`)
    pub epsg_authority: String,
    /// Number of entries each map pre-allocates room for (default: 0)
    pub initial_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            epsg_authority: DEFAULT_EPSG_AUTHORITY.to_string(),
            initial_capacity: 0,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authority prefix for EPSG code lookups.
    pub fn with_epsg_authority(mut self, authority: impl Into<String>) -> Self {
        self.epsg_authority = authority.into();
        self
    }

    /// Set the number of entries each map pre-allocates.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Check that the configuration can build well-formed identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epsg_authority.is_empty() {
            return Err(ConfigError::EmptyAuthority);
        }
        if self
            .epsg_authority
            .chars()
            .any(|c| c == ':' || c.is_whitespace())
        {
            return Err(ConfigError::InvalidAuthority(self.epsg_authority.clone()));
        }
        Ok(())
    }

    /// Format an EPSG code as an authority-qualified identifier.
    pub fn epsg_identifier(&self, code: u32) -> String {
        format!("{}:{}", self.epsg_authority, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.epsg_authority, "EPSG");
        assert_eq!(config.initial_capacity, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = RegistryConfig::new()
            .with_epsg_authority("IGNF")
            .with_initial_capacity(64);

        assert_eq!(config.epsg_authority, "IGNF");
        assert_eq!(config.initial_capacity, 64);
    }

    #[test]
    fn test_epsg_identifier() {
        let config = RegistryConfig::default();
        assert_eq!(config.epsg_identifier(4326), "EPSG:4326");
        assert_eq!(config.epsg_identifier(0), "EPSG:0");
    }

    #[test]
    fn test_empty_authority_rejected() {
        let config = RegistryConfig::new().with_epsg_authority("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyAuthority));
    }

    #[test]
    fn test_authority_with_separator_rejected() {
        for bad in ["EPSG:", "EP SG", "EPSG\t"] {
            let config = RegistryConfig::new().with_epsg_authority(bad);
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidAuthority(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::EmptyAuthority.to_string(),
            "EPSG authority must not be empty"
        );
        assert_eq!(
            ConfigError::InvalidAuthority("A:B".into()).to_string(),
            "Invalid EPSG authority 'A:B': must not contain ':' or whitespace"
        );
    }
}
