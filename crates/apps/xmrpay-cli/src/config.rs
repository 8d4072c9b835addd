//! CLI configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use xmrpay_rpc::TransportConfig;

use crate::error::CliResult;

/// CLI configuration loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Wallet daemon endpoint.
    pub wallet: WalletSection,
    /// Payment policy.
    pub payment: PaymentSection,
    /// HTTP transport options.
    pub transport: TransportConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            wallet: WalletSection::default(),
            payment: PaymentSection::default(),
            transport: TransportConfig::default(),
        }
    }
}

/// Wallet endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletSection {
    /// Host the wallet-rpc listens on
    pub host: String,
    /// Port the wallet-rpc listens on
    pub port: u16,
    /// Account to derive receiving addresses under
    pub account_index: u32,
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 18083,
            account_index: 0,
        }
    }
}

/// Payment policy configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSection {
    /// Confirmations required before a payment counts as final
    pub num_confirmations: u64,
    /// Seconds between polls in watch mode
    pub poll_interval_secs: u64,
}

impl Default for PaymentSection {
    fn default() -> Self {
        Self {
            num_confirmations: 10,
            poll_interval_secs: 30,
        }
    }
}

impl CliConfig {
    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load configuration from the default location.
    pub fn load_default() -> CliResult<Self> {
        Self::load(&default_config_path())
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::error::CliError::config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Default configuration file path (`~/.config/xmrpay/config.toml` or the
/// platform equivalent).
pub fn default_config_path() -> PathBuf {
    match ProjectDirs::from("", "", "xmrpay") {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("xmrpay.toml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.wallet.host, "127.0.0.1");
        assert_eq!(config.wallet.port, 18083);
        assert_eq!(config.payment.num_confirmations, 10);
        assert_eq!(config.payment.poll_interval_secs, 30);
        assert_eq!(config.transport.timeout, Duration::from_secs(8));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [wallet]
            host = "10.0.0.5"
            port = 28083

            [payment]
            num_confirmations = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.wallet.host, "10.0.0.5");
        assert_eq!(config.wallet.port, 28083);
        assert_eq!(config.wallet.account_index, 0);
        assert_eq!(config.payment.num_confirmations, 0);
        assert_eq!(config.payment.poll_interval_secs, 30);
    }

    #[test]
    fn test_transport_timeouts_in_millis() {
        let config: CliConfig = toml::from_str(
            r#"
            [transport]
            connect_timeout = 2000
            timeout = 15000
            "#,
        )
        .unwrap();
        assert_eq!(config.transport.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.transport.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = CliConfig::default();
        let encoded = toml::to_string_pretty(&config).unwrap();
        let decoded: CliConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.wallet.port, config.wallet.port);
        assert_eq!(decoded.transport.timeout, config.transport.timeout);
    }
}
