//! Ledger configuration with TOML file support.

use crate::engine::TokenLedger;
use crate::error::TokenError;
use crate::metadata::{TokenMetadata, DEFAULT_DECIMALS};
use crate::policy::{FaucetConfig, MintPolicy, DEFAULT_FAUCET_INTERVAL_SECS};
use fungible_types::{parse_units, AccountId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to deploy a ledger.
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Quantities are human-readable
/// and scaled by `decimals` when the ledger is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Whole tokens credited to the deployer, e.g. `"1000000"`.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: String,

    /// Account that deploys the ledger and becomes its administrator.
    #[serde(default = "default_deployer")]
    pub deployer: AccountId,

    #[serde(default)]
    pub mint_policy: MintPolicy,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Faucet settings; absent means no faucet.
    #[serde(default)]
    pub faucet: Option<FaucetSettings>,
}

/// Faucet section of the config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetSettings {
    /// Whole tokens per claim.
    pub amount: String,

    #[serde(default = "default_faucet_interval")]
    pub interval_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_name() -> String {
    "Token".to_string()
}

fn default_symbol() -> String {
    "TKN".to_string()
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

fn default_initial_supply() -> String {
    "0".to_string()
}

fn default_deployer() -> AccountId {
    AccountId::from_low_u64(1)
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_faucet_interval() -> u64 {
    DEFAULT_FAUCET_INTERVAL_SECS
}

// ── Impl ───────────────────────────────────────────────────────────────

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, TokenError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TokenError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, TokenError> {
        toml::from_str(s).map_err(|e| TokenError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, TokenError> {
        toml::to_string_pretty(self).map_err(|e| TokenError::Config(e.to_string()))
    }

    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata::new(self.name.clone(), self.symbol.clone(), self.decimals)
    }

    /// Deploy a ledger as described by this configuration.
    pub fn build(&self) -> Result<TokenLedger, TokenError> {
        let metadata = self.metadata();
        let supply = parse_units(&self.initial_supply, self.decimals)
            .map_err(|e| TokenError::Config(format!("initial_supply: {e}")))?;
        let mut ledger = TokenLedger::new(self.deployer, metadata, supply)?
            .with_mint_policy(self.mint_policy);
        if let Some(faucet) = &self.faucet {
            let amount = parse_units(&faucet.amount, self.decimals)
                .map_err(|e| TokenError::Config(format!("faucet.amount: {e}")))?;
            ledger = ledger.with_faucet(FaucetConfig {
                amount,
                interval_secs: faucet.interval_secs,
            });
        }
        Ok(ledger)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
            initial_supply: default_initial_supply(),
            deployer: default_deployer(),
            mint_policy: MintPolicy::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            faucet: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fungible_types::TokenAmount;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = LedgerConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = LedgerConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.decimals, 18);
        assert_eq!(config.mint_policy, MintPolicy::Open);
        assert_eq!(config.log_format, "human");
        assert!(config.faucet.is_none());
    }

    #[test]
    fn full_toml_builds_scaled_ledger() {
        let toml = r#"
            name = "Alpha"
            symbol = "ALPHA"
            decimals = 2
            initial_supply = "100000"
            deployer = "0x00000000000000000000000000000000000000aa"
            mint_policy = "admin_only"

            [faucet]
            amount = "1.5"
        "#;
        let config = LedgerConfig::from_toml_str(toml).expect("should parse");
        let ledger = config.build().unwrap();
        let deployer = AccountId::from_low_u64(0xaa);
        assert_eq!(ledger.symbol(), "ALPHA");
        assert_eq!(ledger.balance_of(&deployer), TokenAmount::from(10_000_000u64));
        assert_eq!(ledger.mint_policy(), MintPolicy::AdminOnly);
        let faucet = ledger.faucet().config().unwrap();
        assert_eq!(faucet.amount, TokenAmount::from(150u64));
        assert_eq!(faucet.interval_secs, 3600);
    }

    #[test]
    fn bad_supply_is_a_config_error() {
        let config = LedgerConfig {
            initial_supply: "lots".into(),
            ..LedgerConfig::default()
        };
        assert!(matches!(config.build(), Err(TokenError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"FileToken\"\ninitial_supply = \"7\"\ndecimals = 0").unwrap();
        let config = LedgerConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.name, "FileToken");
        assert_eq!(config.build().unwrap().total_supply(), &TokenAmount::from(7u64));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        assert!(matches!(
            LedgerConfig::from_toml_file("/nonexistent/ledger.toml"),
            Err(TokenError::Config(_))
        ));
    }
}
