//! Coordinator settings with layered loading.
//!
//! Later layers override earlier ones:
//!
//! 1. Compiled defaults from [`CoordinatorConfig::default`]
//! 2. Optional TOML file
//! 3. `CHAIN_SWITCH__*` environment variables, e.g.
//!    `CHAIN_SWITCH__OPEN_WALLET_REDIRECT=false`
//!
//! ```toml
//! open_wallet_redirect = true
//! success_route = "profile"
//!
//! [[extra_chains]]
//! reference = "100"
//! name = "Gnosis"
//! rpc_url = "https://rpc.gnosischain.com"
//! explorer_url = "https://gnosisscan.io"
//! icon = "gnosis"
//! token = { name = "xDAI", symbol = "XDAI", decimals = 18 }
//! ```

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{chain::Chain, error::Error, router::Route};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Open the wallet's deep link after sending a switch request.
    #[serde(default = "default_open_wallet_redirect")]
    pub open_wallet_redirect: bool,

    /// Where to send the user once the wallet is on the target chain.
    #[serde(default)]
    pub success_route: Route,

    /// Chains merged into the presets, replacing built-ins with the same reference.
    #[serde(default)]
    pub extra_chains: Vec<Chain>,
}

fn default_open_wallet_redirect() -> bool {
    true
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            open_wallet_redirect: default_open_wallet_redirect(),
            success_route: Route::default(),
            extra_chains: Vec::new(),
        }
    }
}

impl CoordinatorConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, Error> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder.add_source(env).build()?;

        Ok(config.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CHAIN_SWITCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;
    use config::Map;

    use super::*;

    fn temp_config(name: &str, contents: &str) -> Result<std::path::PathBuf> {
        let path = std::env::temp_dir().join(format!(
            "chain_switch_{name}_{}.toml",
            std::process::id()
        ));
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn test_defaults() {
        let config = CoordinatorConfig::default();
        assert!(config.open_wallet_redirect);
        assert_eq!(config.success_route, Route::Profile);
        assert!(config.extra_chains.is_empty());
    }

    #[test]
    fn test_load_from_toml_file() -> Result<()> {
        let path = temp_config(
            "config",
            r#"
open_wallet_redirect = false
success_route = "chains"

[[extra_chains]]
reference = "100"
name = "Gnosis"
rpc_url = "https://rpc.gnosischain.com"
explorer_url = "https://gnosisscan.io"
icon = "gnosis"
token = { name = "xDAI", symbol = "XDAI", decimals = 18 }
"#,
        )?;

        let loaded = CoordinatorConfig::load(Some(&path));
        fs::remove_file(&path)?;
        let config = loaded?;

        assert!(!config.open_wallet_redirect);
        assert_eq!(config.success_route, Route::Chains);
        assert_eq!(config.extra_chains.len(), 1);
        assert_eq!(config.extra_chains[0].id(), "eip155:100");
        assert_eq!(config.extra_chains[0].token.symbol, "XDAI");

        Ok(())
    }

    /// Tests that `CHAIN_SWITCH__*` variables win over both the file and the defaults.
    #[test]
    fn test_env_overrides_file() -> Result<()> {
        let path = temp_config(
            "env_override",
            r#"
open_wallet_redirect = true
success_route = "profile"
"#,
        )?;
        let vars = Map::from([
            (
                "CHAIN_SWITCH__OPEN_WALLET_REDIRECT".to_owned(),
                "false".to_owned(),
            ),
            (
                "CHAIN_SWITCH__SUCCESS_ROUTE".to_owned(),
                "chains".to_owned(),
            ),
        ]);

        let loaded =
            CoordinatorConfig::load_with_env(Some(&path), environment().source(Some(vars)));
        fs::remove_file(&path)?;
        let config = loaded?;

        assert!(!config.open_wallet_redirect);
        assert_eq!(config.success_route, Route::Chains);
        assert!(config.extra_chains.is_empty());

        let defaults_only = CoordinatorConfig::load_with_env(
            None,
            environment().source(Some(Map::from([(
                "CHAIN_SWITCH__SUCCESS_ROUTE".to_owned(),
                "chains".to_owned(),
            )]))),
        )?;
        assert!(defaults_only.open_wallet_redirect);
        assert_eq!(defaults_only.success_route, Route::Chains);

        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("chain_switch_config_does_not_exist.toml");
        assert!(matches!(
            CoordinatorConfig::load(Some(&path)),
            Err(Error::Config(_))
        ));
    }
}
