pub(super) mod session_event;
pub(super) mod session_request;
pub(super) mod shared_types;
pub(super) mod wallet;

pub use session_event::*;
pub use session_request::*;
pub use shared_types::*;
pub use wallet::*;

use anyhow::Result;
use paste::paste;
pub use serde::{Deserialize, Serialize};
use serde_json::Value;

pub trait RelayProtocolMetadata {
    /// Metadata for publishing the request itself.
    fn irn_metadata(&self) -> IrnMetadata;

    /// Metadata for publishing the reply to the request.
    fn irn_response_metadata(&self) -> IrnMetadata;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrnMetadata {
    pub tag: u32,
    pub ttl: u64,
    pub prompt: bool,
}

macro_rules! irn_metadata_fn {
    ($fn_name:ident, $meta:ident) => {
        paste! {
            fn $fn_name(&self) -> IrnMetadata {
                match self {
                    Self::SessionRequest(_) => session_request::[<IRN_ $meta:upper _METADATA>],
                    Self::SessionEvent(_) => session_event::[<IRN_ $meta:upper _METADATA>],
                }
            }
        }
    };
}

macro_rules! impl_relay_protocol_metadata {
    ($param_type:ty) => {
        impl RelayProtocolMetadata for $param_type {
            irn_metadata_fn!(irn_metadata, request);
            irn_metadata_fn!(irn_response_metadata, response);
        }
    };
}

#[derive(Debug, Serialize, Eq, Deserialize, Clone, PartialEq)]
#[serde(tag = "method", content = "params")]
pub enum RequestParam {
    #[serde(rename = "wc_sessionRequest")]
    SessionRequest(SessionRequestRequest),
    #[serde(rename = "wc_sessionEvent")]
    SessionEvent(SessionEventRequest),
}
impl_relay_protocol_metadata!(RequestParam);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseParam {
    /// A response with a result.
    #[serde(rename = "result")]
    Success(Value),

    /// A response for a failed request.
    #[serde(rename = "error")]
    Err(Value),
}

impl ResponseParam {
    /// Decodes the error object of a failed response, `None` for successes.
    pub fn error_params(&self) -> Result<Option<ErrorParams>> {
        match self {
            Self::Success(_) => Ok(None),
            Self::Err(value) => Ok(Some(serde_json::from_value(value.clone())?)),
        }
    }
}

/// Wallets are not consistent here: some send both fields, some reject with
/// an empty error object.
#[derive(Debug, Clone, Eq, Serialize, Deserialize, PartialEq)]
pub struct ErrorParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub message: Option<String>,
}

impl TryFrom<ErrorParams> for ResponseParam {
    type Error = anyhow::Error;

    fn try_from(value: ErrorParams) -> Result<Self, Self::Error> {
        Ok(Self::Err(serde_json::to_value(value)?))
    }
}
