use crate::rpc::ErrorParams;

/// Why a wallet request did not go through.
///
/// `Transport` means the request never reached the wallet (or the relay
/// failed), `Rejected` means the wallet answered with a JSON-RPC error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SwitchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Wallet rejected request: code={code:?}, message={message:?}")]
    Rejected {
        code: Option<i64>,
        message: Option<String>,
    },
}

impl From<ErrorParams> for SwitchError {
    fn from(value: ErrorParams) -> Self {
        Self::Rejected {
            code: value.code,
            message: value.message,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Coordinator is no longer running")]
    CoordinatorClosed,
}
