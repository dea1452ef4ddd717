use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::IrnMetadata;

pub(super) const IRN_REQUEST_METADATA: IrnMetadata = IrnMetadata {
    tag: 1108,
    ttl: 300,
    prompt: true,
};

pub(super) const IRN_RESPONSE_METADATA: IrnMetadata = IrnMetadata {
    tag: 1109,
    ttl: 300,
    prompt: false,
};

/// Wallet-level RPC call carried inside a session request.
#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletRequest {
    pub method: String,
    /// Always a JSON array for the `wallet_*` methods.
    pub params: Value,
}

#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequestRequest {
    pub request: WalletRequest,
    /// CAIP-2 id of the chain the request is scoped to.
    pub chain_id: String,
}
