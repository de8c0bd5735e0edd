use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dns::enums::DNSResourceClass;
use crate::dns::name::Name;
use crate::error::ConfigError;

/// Largest TTL RFC 2181 allows
pub const MAX_TTL: u32 = 0x7fff_ffff;

/// What the zone loader does with an entry that fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop loading and report the entry
    #[default]
    Abort,
    /// Log the entry, drop it and continue with the next line
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            _ => Err(ConfigError::InvalidErrorPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Abort => f.write_str("abort"),
            ErrorPolicy::Skip => f.write_str("skip"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// TTL for entries that give none and follow no `$TTL`
    pub default_ttl: u32,

    /// Class for entries that give none
    pub default_class: DNSResourceClass,

    /// Initial origin for relative names (must be absolute)
    pub origin: Option<String>,

    /// Zone loader policy for entries that fail to parse
    pub on_error: ErrorPolicy,

    /// Largest zone file the loader will read, in bytes
    pub max_zone_file_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_ttl: 3600, // 1 hour
            default_class: DNSResourceClass::IN,
            origin: None,
            on_error: ErrorPolicy::Abort,
            max_zone_file_size: 10 * 1024 * 1024,
        }
    }
}

impl CodecConfig {
    /// Defaults overridden by `RRCODEC_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::ParseError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Apply environment overrides on top of the current values
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(default_ttl) = std::env::var("RRCODEC_DEFAULT_TTL") {
            self.default_ttl = default_ttl
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidTtl(default_ttl))?;
        }

        if let Ok(default_class) = std::env::var("RRCODEC_DEFAULT_CLASS") {
            self.default_class = default_class
                .parse()
                .map_err(|_| ConfigError::InvalidClass(default_class))?;
        }

        if let Ok(origin) = std::env::var("RRCODEC_ORIGIN") {
            self.origin = if origin.is_empty() { None } else { Some(origin) };
        }

        if let Ok(on_error) = std::env::var("RRCODEC_ON_ERROR") {
            self.on_error = on_error.parse()?;
        }

        if let Ok(max_size) = std::env::var("RRCODEC_MAX_ZONE_FILE_SIZE") {
            self.max_zone_file_size = max_size
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidFileSize(max_size))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_ttl > MAX_TTL {
            return Err(ConfigError::InvalidTtl(format!(
                "{} exceeds the maximum of {}",
                self.default_ttl, MAX_TTL
            )));
        }

        if self.origin_name()?.is_some_and(|origin| !origin.is_absolute()) {
            return Err(ConfigError::InvalidOrigin(format!(
                "{} is not absolute",
                self.origin.as_deref().unwrap_or_default()
            )));
        }

        if self.max_zone_file_size == 0 {
            return Err(ConfigError::InvalidFileSize(
                "Zone file size limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured origin as a name
    pub fn origin_name(&self) -> Result<Option<Name>, ConfigError> {
        self.origin
            .as_deref()
            .map(|origin| {
                origin
                    .parse::<Name>()
                    .map_err(|e| ConfigError::InvalidOrigin(format!("{}: {}", origin, e)))
            })
            .transpose()
    }
}
