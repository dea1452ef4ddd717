//! Chain descriptors and the table of chains the app knows about.

use serde::{Deserialize, Serialize};

/// Namespace of EVM chains in CAIP-2 ids.
pub const EIP155_NAMESPACE: &str = "eip155";

#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// A blockchain the user can be switched to.
#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Decimal chain reference, e.g. `"137"`.
    pub reference: String,
    pub name: String,
    #[serde(alias = "rpc_url")]
    pub rpc_url: String,
    #[serde(alias = "explorer_url")]
    pub explorer_url: String,
    pub token: NativeCurrency,
    pub icon: String,
}

fn default_namespace() -> String {
    EIP155_NAMESPACE.to_owned()
}

impl Chain {
    /// CAIP-2 chain id, `<namespace>:<reference>`.
    pub fn id(&self) -> String {
        format!("{}:{}", self.namespace, self.reference)
    }

    pub fn numeric_reference(&self) -> Option<u64> {
        self.reference.parse().ok()
    }
}

/// Lookup table of known chains keyed by chain reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainPresets {
    chains: Vec<Chain>,
}

impl ChainPresets {
    pub fn new(chains: Vec<Chain>) -> Self {
        let mut presets = Self::default();
        presets.extend(chains);
        presets
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            evm(
                "1",
                "Ethereum",
                "https://cloudflare-eth.com",
                "https://etherscan.io",
                ether(),
                "ethereum",
            ),
            evm(
                "10",
                "Optimism",
                "https://mainnet.optimism.io",
                "https://optimistic.etherscan.io",
                ether(),
                "optimism",
            ),
            evm(
                "56",
                "BNB Smart Chain",
                "https://bsc-dataseed.binance.org",
                "https://bscscan.com",
                currency("BNB", "BNB", 18),
                "binance",
            ),
            evm(
                "137",
                "Polygon",
                "https://polygon-rpc.com",
                "https://polygonscan.com",
                currency("MATIC", "MATIC", 18),
                "polygon",
            ),
            evm(
                "8453",
                "Base",
                "https://mainnet.base.org",
                "https://basescan.org",
                ether(),
                "base",
            ),
            evm(
                "42161",
                "Arbitrum One",
                "https://arb1.arbitrum.io/rpc",
                "https://arbiscan.io",
                ether(),
                "arbitrum",
            ),
            evm(
                "42220",
                "Celo",
                "https://forno.celo.org",
                "https://explorer.celo.org/mainnet",
                currency("CELO", "CELO", 18),
                "celo",
            ),
            evm(
                "43114",
                "Avalanche C-Chain",
                "https://api.avax.network/ext/bc/C/rpc",
                "https://snowtrace.io",
                currency("Avalanche", "AVAX", 18),
                "avalanche",
            ),
        ])
    }

    /// Adds chains, replacing any preset with the same reference.
    pub fn extend(&mut self, chains: impl IntoIterator<Item = Chain>) {
        for chain in chains {
            match self
                .chains
                .iter_mut()
                .find(|known| known.reference == chain.reference)
            {
                Some(known) => *known = chain,
                None => self.chains.push(chain),
            }
        }
    }

    pub fn find(&self, reference: &str) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.reference == reference)
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }
}

fn evm(
    reference: &str,
    name: &str,
    rpc_url: &str,
    explorer_url: &str,
    token: NativeCurrency,
    icon: &str,
) -> Chain {
    Chain {
        namespace: default_namespace(),
        reference: reference.to_owned(),
        name: name.to_owned(),
        rpc_url: rpc_url.to_owned(),
        explorer_url: explorer_url.to_owned(),
        token,
        icon: icon.to_owned(),
    }
}

fn currency(name: &str, symbol: &str, decimals: u8) -> NativeCurrency {
    NativeCurrency {
        name: name.to_owned(),
        symbol: symbol.to_owned(),
        decimals,
    }
}

fn ether() -> NativeCurrency {
    currency("Ether", "ETH", 18)
}
