//! EIP-3326 / EIP-3085 wallet methods, sent inside `wc_sessionRequest`.

use serde::{Deserialize, Serialize};

use crate::chain::{Chain, NativeCurrency};

/// Asks the wallet to make a chain it already knows the active one.
pub const WALLET_SWITCH_ETHEREUM_CHAIN: &str = "wallet_switchEthereumChain";

/// Asks the wallet to register a chain (and usually switch to it).
pub const WALLET_ADD_ETHEREUM_CHAIN: &str = "wallet_addEthereumChain";

/// `0x`-prefixed uppercase hex of a numeric chain reference.
pub fn hex_chain_id(reference: u64) -> String {
    format!("0x{reference:X}")
}

#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChainSwitchParams {
    pub chain_id: String,
}

impl ChainSwitchParams {
    /// `None` when the chain reference is not a decimal integer.
    pub fn for_chain(chain: &Chain) -> Option<Self> {
        Some(Self {
            chain_id: hex_chain_id(chain.numeric_reference()?),
        })
    }
}

#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChainAddParams {
    pub chain_id: String,
    pub block_explorer_urls: Vec<String>,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub icon_urls: Vec<String>,
}

impl ChainAddParams {
    /// `None` when the chain reference is not a decimal integer.
    pub fn for_chain(chain: &Chain) -> Option<Self> {
        Some(Self {
            chain_id: hex_chain_id(chain.numeric_reference()?),
            block_explorer_urls: vec![chain.explorer_url.clone()],
            chain_name: chain.name.clone(),
            native_currency: chain.token.clone(),
            rpc_urls: vec![chain.rpc_url.clone()],
            icon_urls: vec![chain.icon.clone()],
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use super::*;
    use crate::chain::ChainPresets;

    #[test]
    fn test_hex_chain_id() {
        assert_eq!(hex_chain_id(1), "0x1");
        assert_eq!(hex_chain_id(137), "0x89");
        assert_eq!(hex_chain_id(42161), "0xA4B1");
        assert_eq!(hex_chain_id(43114), "0xA86A");
    }

    #[test]
    fn test_switch_params_for_polygon() -> Result<()> {
        let presets = ChainPresets::builtin();
        let polygon = presets
            .find("137")
            .ok_or_else(|| anyhow::anyhow!("polygon preset missing"))?;

        let params = ChainSwitchParams::for_chain(polygon)
            .ok_or_else(|| anyhow::anyhow!("polygon reference is numeric"))?;
        assert_eq!(serde_json::to_value(params)?, json!({ "chainId": "0x89" }));

        Ok(())
    }

    #[test]
    fn test_add_params_wire_shape() -> Result<()> {
        let presets = ChainPresets::builtin();
        let arbitrum = presets
            .find("42161")
            .ok_or_else(|| anyhow::anyhow!("arbitrum preset missing"))?;

        let params = ChainAddParams::for_chain(arbitrum)
            .ok_or_else(|| anyhow::anyhow!("arbitrum reference is numeric"))?;
        assert_eq!(
            serde_json::to_value(params)?,
            json!({
                "chainId": "0xA4B1",
                "blockExplorerUrls": [arbitrum.explorer_url],
                "chainName": "Arbitrum One",
                "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
                "rpcUrls": [arbitrum.rpc_url],
                "iconUrls": [arbitrum.icon],
            })
        );

        Ok(())
    }

    #[test]
    fn test_non_numeric_reference_builds_nothing() {
        let mut chain = ChainPresets::builtin().chains()[0].clone();
        chain.reference = "mainnet".to_owned();

        assert_eq!(ChainSwitchParams::for_chain(&chain), None);
        assert_eq!(ChainAddParams::for_chain(&chain), None);
    }
}
