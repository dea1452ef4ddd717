//! JSON-RPC envelope exchanged with the wallet over a sign session.
//!
//! Only the parts of the sign protocol the chain switch flow needs are
//! modelled: outbound session requests and inbound session events/responses.

use {
    serde::{Deserialize, Serialize},
    std::{fmt::Debug, sync::Arc},
};

mod params;

use chrono::Utc;
pub use params::*;

/// Version of the JSON RPC protocol spoken over the relay.
pub const JSON_RPC_VERSION_STR: &str = "2.0";

pub static JSON_RPC_VERSION: once_cell::sync::Lazy<Arc<str>> =
    once_cell::sync::Lazy::new(|| Arc::from(JSON_RPC_VERSION_STR));

/// Errors covering payload validation problems.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid request ID")]
    RequestId,

    #[error("Invalid JSON RPC version")]
    JsonRpcVersion,
}

/// Enum representing a JSON RPC payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Request(Request),
    Response(Response),
}

impl From<Request> for Payload {
    fn from(value: Request) -> Self {
        Payload::Request(value)
    }
}

impl From<Response> for Payload {
    fn from(value: Response) -> Self {
        Payload::Response(value)
    }
}

impl Payload {
    /// Returns the message ID contained within the payload.
    pub fn id(&self) -> u64 {
        match self {
            Self::Request(req) => req.id,
            Self::Response(res) => res.id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Request(request) => request.validate(),
            Self::Response(response) => response.validate(),
        }
    }
}

/// Data structure representing a JSON RPC request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// ID this message corresponds to.
    pub id: u64,

    /// The JSON RPC version.
    pub jsonrpc: Arc<str>,

    /// The parameters required to fulfill this request.
    #[serde(flatten)]
    pub params: RequestParam,
}

impl Request {
    /// Create a new instance.
    pub fn new(params: RequestParam) -> Self {
        Self {
            id: Utc::now().timestamp_micros() as u64,
            jsonrpc: JSON_RPC_VERSION.clone(),
            params,
        }
    }

    /// Validates the request payload.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id == 0 {
            return Err(ValidationError::RequestId);
        }

        if self.jsonrpc.as_ref() != JSON_RPC_VERSION_STR {
            return Err(ValidationError::JsonRpcVersion);
        }

        Ok(())
    }
}

/// Data structure representing a JSON RPC response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// ID this message corresponds to.
    pub id: u64,

    /// RPC version.
    pub jsonrpc: Arc<str>,

    /// The result or error of the request.
    #[serde(flatten)]
    pub param: ResponseParam,
}

impl Response {
    /// Create a new instance.
    pub fn new(id: u64, param: ResponseParam) -> Self {
        Self {
            id,
            jsonrpc: JSON_RPC_VERSION.clone(),
            param,
        }
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jsonrpc.as_ref() != JSON_RPC_VERSION_STR {
            return Err(ValidationError::JsonRpcVersion);
        }

        Ok(())
    }
}
