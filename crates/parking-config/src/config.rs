// crates/parking-config/src/config.rs
// ============================================================================
// Module: Parking Lot Configuration
// Description: Configuration loading and validation for the parking lot.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: parking-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The file describes the lot name and fit policy, the rate card, the audit
//! sink, and the floor/slot layout. Missing or invalid configuration fails
//! closed: a lot is never built from a config that did not validate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use parking_core::Clock;
use parking_core::FileAuditSink;
use parking_core::FitPolicy;
use parking_core::FloorLayout;
use parking_core::LotAuditSink;
use parking_core::LotLayout;
use parking_core::LotPolicy;
use parking_core::NoopAuditSink;
use parking_core::ParkingLot;
use parking_core::RateCard;
use parking_core::StderrAuditSink;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "parking-lot.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "PARKING_LOT_CONFIG";
/// Maximum size of a config file in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of the lot name.
pub(crate) const MAX_LOT_NAME_LENGTH: usize = 128;
/// Maximum number of floors.
pub(crate) const MAX_FLOORS: usize = 256;
/// Maximum number of slots on one floor.
pub(crate) const MAX_SLOTS_PER_FLOOR: usize = 10_000;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Parking lot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParkingConfig {
    /// Lot identity and selection policy.
    pub lot: LotConfig,
    /// Hourly rate card.
    #[serde(default)]
    pub pricing: RateCard,
    /// Audit sink configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Floor layouts.
    #[serde(default)]
    pub floors: Vec<FloorLayout>,
}

/// Lot identity and selection policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LotConfig {
    /// Lot display name.
    pub name: String,
    /// Slot selection policy within a floor.
    #[serde(default)]
    pub fit_policy: FitPolicy,
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
    /// Discard audit events.
    None,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path (JSON lines); required for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl ParkingConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, `PARKING_LOT_CONFIG`, then
    /// `parking-lot.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lot.validate()?;
        if self.floors.len() > MAX_FLOORS {
            return Err(ConfigError::Invalid(format!("floors exceeds max of {MAX_FLOORS}")));
        }
        for floor in &self.floors {
            if floor.slots.len() > MAX_SLOTS_PER_FLOOR {
                return Err(ConfigError::Invalid(format!(
                    "floor {} slots exceeds max of {MAX_SLOTS_PER_FLOOR}",
                    floor.id
                )));
            }
        }
        self.layout().validate().map_err(|err| ConfigError::Invalid(format!("floors: {err}")))?;
        self.pricing.validate().map_err(|err| ConfigError::Invalid(format!("pricing: {err}")))?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the lot layout described by this config.
    #[must_use]
    pub fn layout(&self) -> LotLayout {
        LotLayout {
            name: self.lot.name.clone(),
            floors: self.floors.clone(),
        }
    }

    /// Returns the pricing and selection policy.
    #[must_use]
    pub const fn lot_policy(&self) -> LotPolicy {
        LotPolicy {
            rates: self.pricing,
            fit_policy: self.lot.fit_policy,
        }
    }

    /// Builds a configured lot using `clock` and the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened and
    /// [`ConfigError::Invalid`] when the lot rejects the layout.
    pub fn build_lot(&self, clock: Arc<dyn Clock>) -> Result<ParkingLot, ConfigError> {
        let audit = self.audit.build_sink()?;
        ParkingLot::configure(&self.layout(), self.lot_policy(), clock, audit)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }
}

impl LotConfig {
    /// Validates lot identity settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid("lot.name must be non-empty".to_string()));
        }
        if name.len() > MAX_LOT_NAME_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "lot.name exceeds max length of {MAX_LOT_NAME_LENGTH}"
            )));
        }
        Ok(())
    }
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (_, Some(path)) => validate_path_string("audit.path", path),
            (_, None) => Ok(()),
        }
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file sink cannot be opened.
    pub fn build_sink(&self) -> Result<Arc<dyn LotAuditSink>, ConfigError> {
        match self.sink {
            AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
            AuditSinkKind::File => {
                let path = self.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("audit.path is required for the file sink".to_string())
                })?;
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI input or environment.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
