use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::IrnMetadata;

pub(super) const IRN_REQUEST_METADATA: IrnMetadata = IrnMetadata {
    tag: 1110,
    ttl: 300,
    prompt: true,
};

pub(super) const IRN_RESPONSE_METADATA: IrnMetadata = IrnMetadata {
    tag: 1111,
    ttl: 300,
    prompt: false,
};

/// Emitted by the wallet when its active chain changes.
pub const CHAIN_CHANGED_EVENT: &str = "chainChanged";

#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub name: String,
    pub data: Value,
}

#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionEventRequest {
    pub event: Event,
    pub chain_id: String,
}
