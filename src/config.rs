//! Environment configuration loading and validation.
//!
//! Everything is read once at startup and validated into an immutable
//! [`Config`]; missing required values fail fast with a descriptive
//! [`ConfigError`] before the loop starts. Nothing reads the environment
//! afterwards.

use std::fmt;
use std::time::Duration;

use alloy_primitives::{address, utils::parse_ether, Address, U256};
use serde::Deserialize;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

use crate::actor::ActorConfig;
use crate::error::ConfigError;

/// L2 standard bridge predeploy, identical across derived networks.
pub const L2_STANDARD_BRIDGE_PREDEPLOY: Address =
    address!("4200000000000000000000000000000000000010");

const DEFAULT_DERIVED_RPC_URL: &str = "http://localhost:8545";
const DEFAULT_AMOUNT: &str = "0.001";
const DEFAULT_LOOP_INTERVAL_MS: u64 = 120_000;

/// Full actor configuration, loaded from the environment.
pub struct Config {
    pub private_key: String,
    pub base_rpc_url: String,
    pub derived_rpc_url: String,
    pub bridge: BridgeAddresses,
    /// Amount moved per operation, in wei.
    pub amount: U256,
    /// Derived-network account receiving plain transfers.
    pub recipient: Address,
    pub loop_interval: Duration,
    pub logging: LoggingConfig,
}

/// Bridge contract address set.
///
/// The base-network side comes from a deployment-specific JSON file; the
/// derived side defaults to the compiled-in predeploy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BridgeAddresses {
    pub l1_standard_bridge: Address,
    #[serde(default = "default_l2_standard_bridge")]
    pub l2_standard_bridge: Address,
}

fn default_l2_standard_bridge() -> Address {
    L2_STANDARD_BRIDGE_PREDEPLOY
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                tracing_fmt().json().with_env_filter(filter).init();
            }
            _ => {
                tracing_fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load and validate configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let private_key = require(&get, "PRIVATE_KEY")?;
        let base_rpc_url = require(&get, "L1_RPC_URL")?;
        let derived_rpc_url =
            get("L2_RPC_URL").unwrap_or_else(|| DEFAULT_DERIVED_RPC_URL.to_string());

        let bridge_path = require(&get, "BRIDGE_ADDRESSES")?;
        let bridge = BridgeAddresses::load(&bridge_path)?;

        let amount_str = get("AMOUNT").unwrap_or_else(|| DEFAULT_AMOUNT.to_string());
        let amount = parse_ether(&amount_str).map_err(|e| ConfigError::InvalidValue {
            name: "AMOUNT",
            reason: e.to_string(),
        })?;

        let recipient = require(&get, "SEND_RECIPIENT")?
            .parse::<Address>()
            .map_err(|e| ConfigError::InvalidValue {
                name: "SEND_RECIPIENT",
                reason: e.to_string(),
            })?;

        let loop_interval_ms = match get("LOOP_INTERVAL_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                name: "LOOP_INTERVAL_MS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_LOOP_INTERVAL_MS,
        };
        if loop_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LOOP_INTERVAL_MS",
                reason: "must be a positive number of milliseconds".into(),
            });
        }

        let logging = LoggingConfig {
            level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            format: get("LOG_FORMAT").unwrap_or_else(|| "pretty".into()),
        };

        Ok(Self {
            private_key,
            base_rpc_url,
            derived_rpc_url,
            bridge,
            amount,
            recipient,
            loop_interval: Duration::from_millis(loop_interval_ms),
            logging,
        })
    }

    /// The slice of configuration owned by the actor loop.
    #[must_use]
    pub fn actor(&self) -> ActorConfig {
        ActorConfig {
            amount: self.amount,
            recipient: self.recipient,
            loop_interval: self.loop_interval,
        }
    }
}

impl BridgeAddresses {
    /// Load the address set from a deployment JSON file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(ConfigError::ReadAddressFile)?;
        serde_json::from_str(&data).map_err(ConfigError::ParseAddressFile)
    }
}

fn require(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match get(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv { name }),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("private_key", &"<redacted>")
            .field("base_rpc_url", &self.base_rpc_url)
            .field("derived_rpc_url", &self.derived_rpc_url)
            .field("bridge", &self.bridge)
            .field("amount", &self.amount)
            .field("recipient", &self.recipient)
            .field("loop_interval", &self.loop_interval)
            .field("logging", &self.logging)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn bridge_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"L1StandardBridge": "0x1111111111111111111111111111111111111111"}}"#
        )
        .unwrap();
        file
    }

    fn base_env(bridge_path: &str) -> HashMap<&'static str, String> {
        HashMap::from([
            (
                "PRIVATE_KEY",
                "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318".to_string(),
            ),
            ("L1_RPC_URL", "http://localhost:9545".to_string()),
            ("BRIDGE_ADDRESSES", bridge_path.to_string()),
            (
                "SEND_RECIPIENT",
                "0x2222222222222222222222222222222222222222".to_string(),
            ),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn applies_defaults() {
        let file = bridge_file();
        let config = load(&base_env(file.path().to_str().unwrap())).unwrap();

        assert_eq!(config.derived_rpc_url, "http://localhost:8545");
        assert_eq!(config.amount, parse_ether("0.001").unwrap());
        assert_eq!(config.loop_interval, Duration::from_millis(120_000));
        assert_eq!(
            config.bridge.l2_standard_bridge,
            L2_STANDARD_BRIDGE_PREDEPLOY
        );
    }

    #[test]
    fn missing_private_key_is_fatal() {
        let file = bridge_file();
        let mut env = base_env(file.path().to_str().unwrap());
        env.remove("PRIVATE_KEY");

        let err = load(&env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEnv {
                name: "PRIVATE_KEY"
            }
        ));
    }

    #[test]
    fn missing_recipient_is_fatal() {
        let file = bridge_file();
        let mut env = base_env(file.path().to_str().unwrap());
        env.remove("SEND_RECIPIENT");

        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::MissingEnv {
                name: "SEND_RECIPIENT"
            }
        ));
    }

    #[test]
    fn rejects_malformed_recipient() {
        let file = bridge_file();
        let mut env = base_env(file.path().to_str().unwrap());
        env.insert("SEND_RECIPIENT", "not-an-address".to_string());

        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::InvalidValue {
                name: "SEND_RECIPIENT",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_loop_interval() {
        let file = bridge_file();
        let mut env = base_env(file.path().to_str().unwrap());
        env.insert("LOOP_INTERVAL_MS", "0".to_string());

        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::InvalidValue {
                name: "LOOP_INTERVAL_MS",
                ..
            }
        ));
    }

    #[test]
    fn parses_overrides() {
        let file = bridge_file();
        let mut env = base_env(file.path().to_str().unwrap());
        env.insert("AMOUNT", "1.5".to_string());
        env.insert("LOOP_INTERVAL_MS", "5000".to_string());
        env.insert("L2_RPC_URL", "http://localhost:7545".to_string());

        let config = load(&env).unwrap();
        assert_eq!(config.amount, parse_ether("1.5").unwrap());
        assert_eq!(config.loop_interval, Duration::from_millis(5000));
        assert_eq!(config.derived_rpc_url, "http://localhost:7545");
    }

    #[test]
    fn reads_bridge_address_file() {
        let file = bridge_file();
        let config = load(&base_env(file.path().to_str().unwrap())).unwrap();

        assert_eq!(
            config.bridge.l1_standard_bridge,
            "0x1111111111111111111111111111111111111111"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn missing_bridge_address_file_is_fatal() {
        let mut env = base_env("/nonexistent/addresses.json");
        env.insert("BRIDGE_ADDRESSES", "/nonexistent/addresses.json".to_string());

        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::ReadAddressFile(_)
        ));
    }

    #[test]
    fn debug_redacts_private_key() {
        let file = bridge_file();
        let config = load(&base_env(file.path().to_str().unwrap())).unwrap();
        let rendered = format!("{config:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("4c0883a6"));
    }
}
