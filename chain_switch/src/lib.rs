//! Dapp-side chain switching over a WalletConnect sign session.
//!
//! [`ChainSwitchCoordinator`] asks the connected wallet to switch to a target
//! chain, falls back to `wallet_addEthereumChain` once, and reflects the
//! outcome into the shared [`AppStore`] and the host app's [`Router`].

pub mod chain;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod router;
pub mod rpc;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;

pub use crate::{
    chain::{Chain, ChainPresets, NativeCurrency},
    config::CoordinatorConfig,
    coordinator::{
        ChainSwitchCoordinator, CoordinatorHandle, RetryState, SwitchPhase, SwitchStatus, UiEvent,
    },
    error::{Error, SwitchError},
    router::{Route, Router},
    session::{Session, SessionSignal, SessionTransport},
    store::AppStore,
};
