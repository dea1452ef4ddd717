//! The sign session as seen by the chain switch flow: the outbound request
//! call and the single inbound stream of wallet signals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::SwitchError,
    rpc::{Metadata, Payload, Request, RequestParam, ResponseParam, CHAIN_CHANGED_EVENT},
};

/// An established pairing with a wallet.
#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub topic: String,
    pub peer: Metadata,
}

impl Session {
    /// Deep link into the wallet app, native URI first.
    pub fn redirect_url(&self) -> Option<&str> {
        self.peer.redirect.as_ref()?.preferred()
    }
}

/// Publishes requests to the wallet on a session topic.
///
/// Implementations own encryption and relay delivery; the outcome of the
/// request arrives later as a [`SessionSignal::Response`].
#[async_trait]
pub trait SessionTransport: Send + Sync {
    async fn request(&self, topic: &str, request: Request) -> Result<(), SwitchError>;
}

/// Everything the wallet can tell the coordinator, on one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSignal {
    Event {
        name: String,
        data: Value,
        chain_id: Option<String>,
    },
    Response {
        /// JSON-RPC id of the request being answered, if the transport knows it.
        id: Option<u64>,
        outcome: Result<Value, SwitchError>,
    },
}

impl SessionSignal {
    /// Maps a decrypted relay payload to a signal. Requests other than
    /// session events are not signals.
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        match payload {
            Payload::Request(Request {
                params: RequestParam::SessionEvent(event),
                ..
            }) => Some(Self::Event {
                name: event.event.name.clone(),
                data: event.event.data.clone(),
                chain_id: Some(event.chain_id.clone()),
            }),
            Payload::Request(_) => None,
            Payload::Response(response) => {
                let outcome = match &response.param {
                    ResponseParam::Success(value) => Ok(value.clone()),
                    ResponseParam::Err(_) => Err(match response.param.error_params() {
                        Ok(Some(params)) => params.into(),
                        _ => SwitchError::Rejected {
                            code: None,
                            message: None,
                        },
                    }),
                };
                Some(Self::Response {
                    id: Some(response.id),
                    outcome,
                })
            }
        }
    }

    /// Chain reference carried by a `chainChanged` event.
    ///
    /// Accepts a JSON integer, a decimal string or an EIP-1193 style hex
    /// string. Returns `None` for any other event or payload.
    pub fn changed_chain_reference(&self) -> Option<u64> {
        let Self::Event { name, data, .. } = self else {
            return None;
        };
        if name != CHAIN_CHANGED_EVENT {
            return None;
        }

        match data {
            Value::Number(number) => number.as_u64(),
            Value::String(text) => match text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
            {
                Some(hex) => u64::from_str_radix(hex, 16).ok(),
                None => text.parse().ok(),
            },
            _ => None,
        }
    }
}
