// crates/parking-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for parking-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::io::Write;

use parking_config::ConfigError;
use parking_config::ParkingConfig;
use tempfile::NamedTempFile;

/// Smallest valid config: one floor with one small slot.
pub const MINIMAL_TOML: &str = r#"
[lot]
name = "Minimal"

[[floors]]
id = 1

[[floors.slots]]
id = "A"
size_class = "small"
distances = { Gate = 1.0 }
"#;

/// Parses TOML into a config without running validation.
pub fn config_from_toml(toml_str: &str) -> Result<ParkingConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns the minimal config, unvalidated.
pub fn minimal_config() -> Result<ParkingConfig, String> {
    config_from_toml(MINIMAL_TOML).map_err(|err| err.to_string())
}

/// Writes `contents` to a temp file that lives as long as the handle.
pub fn write_config(contents: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(contents.as_bytes()).map_err(|err| err.to_string())?;
    file.flush().map_err(|err| err.to_string())?;
    Ok(file)
}

/// Asserts that a result is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
