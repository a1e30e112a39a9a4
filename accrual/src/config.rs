//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use accrue_types::{
    CheckpointMode, LedgerParams, Rate, RatePolicy, TransferCheckpoint, DEFAULT_GLOBAL_RATE,
};

use crate::logging::LogFormat;
use crate::AccrualError;

/// Configuration for a ledger instance.
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field is optional in TOML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Global rate at creation, scaled per second (TOML integers are 64-bit).
    #[serde(default = "default_initial_rate")]
    pub initial_rate: u64,

    /// "decrease_only" or "increase_only".
    #[serde(default)]
    pub rate_policy: RatePolicy,

    /// "materialize" or "clock_only".
    #[serde(default)]
    pub checkpoint_mode: CheckpointMode,

    /// "both_parties" or "disabled".
    #[serde(default)]
    pub transfer_checkpoint: TransferCheckpoint,

    /// "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_initial_rate() -> u64 {
    DEFAULT_GLOBAL_RATE.raw() as u64
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, AccrualError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AccrualError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, AccrualError> {
        toml::from_str(s).map_err(|e| AccrualError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, AccrualError> {
        toml::to_string_pretty(self).map_err(|e| AccrualError::Config(e.to_string()))
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> bool {
        crate::logging::init_logging(self.log_format, &self.log_level)
    }

    pub fn params(&self) -> LedgerParams {
        LedgerParams {
            initial_rate: Rate::new(u128::from(self.initial_rate)),
            rate_policy: self.rate_policy,
            checkpoint_mode: self.checkpoint_mode,
            transfer_checkpoint: self.transfer_checkpoint,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_rate: default_initial_rate(),
            rate_policy: RatePolicy::default(),
            checkpoint_mode: CheckpointMode::default(),
            transfer_checkpoint: TransferCheckpoint::default(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl From<LedgerConfig> for LedgerParams {
    fn from(config: LedgerConfig) -> Self {
        config.params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = LedgerConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = LedgerConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.initial_rate, 50_000_000_000);
        assert_eq!(config.rate_policy, RatePolicy::DecreaseOnly);
        assert_eq!(config.checkpoint_mode, CheckpointMode::Materialize);
        assert_eq!(config.params(), LedgerParams::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            rate_policy = "increase_only"
            checkpoint_mode = "clock_only"
        "#;
        let config = LedgerConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.rate_policy, RatePolicy::IncreaseOnly);
        assert_eq!(config.checkpoint_mode, CheckpointMode::ClockOnly);
        assert_eq!(config.transfer_checkpoint, TransferCheckpoint::BothParties);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn logging_section_parses() {
        let toml = r#"
            log_format = "json"
            log_level = "debug,accrue_accrual=trace"
        "#;
        let config = LedgerConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "debug,accrue_accrual=trace");
        assert_eq!(config.params(), LedgerParams::default());
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let err = LedgerConfig::from_toml_str(r#"rate_policy = "sideways""#).unwrap_err();
        assert!(matches!(err, AccrualError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "initial_rate = 40000000000").unwrap();
        writeln!(file, r#"transfer_checkpoint = "disabled""#).unwrap();
        let config = LedgerConfig::from_toml_file(file.path()).unwrap();
        let params = config.params();
        assert_eq!(params.initial_rate, Rate::new(40_000_000_000));
        assert_eq!(params.transfer_checkpoint, TransferCheckpoint::Disabled);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LedgerConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, AccrualError::Config(_)));
    }
}
