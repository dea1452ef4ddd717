//! Drives a wallet onto a target chain: switch first, add-then-switch once
//! if the wallet refuses, and report the outcome.
//!
//! ```text
//! Idle --OnAppear/DidTapRetry--> Switching
//! Switching --success--> Succeeded
//! Switching --failure--> Adding (one add request)
//! Adding --chainChanged(known) | success--> Succeeded
//! Adding --failure--> Failed (switch_failed)
//! Failed --DidTapRetry--> Switching
//! ```
//!
//! All state lives on one task; the UI talks to it through
//! [`CoordinatorHandle`] and observes [`SwitchStatus`] over a watch channel.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::{
    sync::{broadcast, mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    chain::{Chain, ChainPresets},
    config::CoordinatorConfig,
    error::{Error, SwitchError},
    router::Router,
    rpc::{
        ChainAddParams, ChainSwitchParams, Request, RequestParam, SessionRequestRequest,
        WalletRequest, WALLET_ADD_ETHEREUM_CHAIN, WALLET_SWITCH_ETHEREUM_CHAIN,
    },
    session::{Session, SessionSignal, SessionTransport},
    store::AppStore,
};

const UI_EVENT_BUFFER: usize = 16;

/// Actions originating from the chain switch screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    OnAppear,
    DidTapRetry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchPhase {
    #[default]
    Idle,
    Switching,
    Adding,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryState {
    /// An add-chain request was already sent in this switch cycle.
    pub tried_adding_chain: bool,
    /// Both the switch and the add attempt failed.
    pub switch_failed: bool,
}

/// Snapshot published to observers after every state change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwitchStatus {
    pub phase: SwitchPhase,
    pub retry: RetryState,
    pub last_error: Option<SwitchError>,
}

impl SwitchStatus {
    pub fn switch_failed(&self) -> bool {
        self.retry.switch_failed
    }
}

pub struct ChainSwitchCoordinator {
    target: Chain,
    store: Arc<AppStore>,
    transport: Arc<dyn SessionTransport>,
    router: Arc<dyn Router>,
    presets: ChainPresets,
    config: CoordinatorConfig,
    status: SwitchStatus,
    /// Ids of the wallet requests sent since the last retry, oldest first.
    cycle_requests: Vec<u64>,
    status_tx: watch::Sender<SwitchStatus>,
}

impl ChainSwitchCoordinator {
    pub fn new(
        target: Chain,
        store: Arc<AppStore>,
        transport: Arc<dyn SessionTransport>,
        router: Arc<dyn Router>,
    ) -> Self {
        let (status_tx, _) = watch::channel(SwitchStatus::default());
        Self {
            target,
            store,
            transport,
            router,
            presets: ChainPresets::builtin(),
            config: CoordinatorConfig::default(),
            status: SwitchStatus::default(),
            cycle_requests: Vec::new(),
            status_tx,
        }
    }

    #[must_use]
    pub fn with_presets(mut self, presets: ChainPresets) -> Self {
        self.presets = presets;
        self.presets.extend(self.config.extra_chains.iter().cloned());
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: CoordinatorConfig) -> Self {
        self.presets.extend(config.extra_chains.iter().cloned());
        self.config = config;
        self
    }

    pub fn target(&self) -> &Chain {
        &self.target
    }

    pub fn status(&self) -> &SwitchStatus {
        &self.status
    }

    pub fn subscribe(&self) -> watch::Receiver<SwitchStatus> {
        self.status_tx.subscribe()
    }

    /// Moves the coordinator onto its own task, consuming wallet signals
    /// until the returned handle is shut down or dropped.
    pub fn spawn(mut self, mut signals: mpsc::Receiver<SessionSignal>) -> CoordinatorHandle {
        let (events_tx, mut events_rx) = mpsc::channel(UI_EVENT_BUFFER);
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let status = self.subscribe();

        let task = tokio::spawn(async move {
            let mut signals_open = true;
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!(chain_id = %self.target.id(), "Chain switch coordinator shutting down");
                        break;
                    }
                    event = events_rx.recv() => match event {
                        Some(event) => self.handle(event).await,
                        None => break,
                    },
                    signal = signals.recv(), if signals_open => match signal {
                        Some(signal) => self.handle_signal(signal).await,
                        None => {
                            debug!("Session signal stream closed");
                            signals_open = false;
                        }
                    },
                }
            }
        });

        CoordinatorHandle {
            events: events_tx,
            status,
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }

    pub async fn handle(&mut self, event: UiEvent) {
        debug!(?event, phase = ?self.status.phase, "Handling UI event");
        if event == UiEvent::DidTapRetry {
            self.status = SwitchStatus::default();
            self.cycle_requests.clear();
            self.publish();
        }

        let target = self.target.clone();
        self.switch_chain(&target).await;
    }

    /// Sends the switch request and nudges the user into the wallet app.
    ///
    /// Does nothing without a selected chain and an active session.
    pub async fn switch_chain(&mut self, to: &Chain) {
        let (Some(from), Some(session)) = (self.store.selected_chain(), self.store.session())
        else {
            debug!(chain_id = %to.id(), "No selected chain or session, not switching");
            return;
        };

        match self.switch_eth_chain(&from, to).await {
            Ok(Some(_)) => self.set_phase(SwitchPhase::Switching),
            Ok(None) => {}
            Err(error) => {
                warn!(%error, chain_id = %to.id(), "Switch request failed");
                self.set_phase(SwitchPhase::Switching);
                self.on_failure(error).await;
            }
        }

        self.open_wallet(&session);
    }

    /// Returns the id of the sent request, `None` when nothing was sent.
    pub async fn switch_eth_chain(
        &mut self,
        from: &Chain,
        to: &Chain,
    ) -> Result<Option<u64>, SwitchError> {
        let Some(session) = self.store.session() else {
            return Ok(None);
        };
        let Some(params) = ChainSwitchParams::for_chain(to) else {
            debug!(reference = %to.reference, "Chain reference is not numeric, skipping switch");
            return Ok(None);
        };

        self.send(&session, from, WALLET_SWITCH_ETHEREUM_CHAIN, json!([params]))
            .await
            .map(Some)
    }

    /// Returns the id of the sent request, `None` when nothing was sent.
    pub async fn add_eth_chain(
        &mut self,
        from: &Chain,
        to: &Chain,
    ) -> Result<Option<u64>, SwitchError> {
        let Some(session) = self.store.session() else {
            return Ok(None);
        };
        let Some(params) = ChainAddParams::for_chain(to) else {
            debug!(reference = %to.reference, "Chain reference is not numeric, skipping add");
            return Ok(None);
        };

        self.send(&session, from, WALLET_ADD_ETHEREUM_CHAIN, json!([params]))
            .await
            .map(Some)
    }

    pub async fn handle_signal(&mut self, signal: SessionSignal) {
        if let Some(reference) = signal.changed_chain_reference() {
            self.on_chain_changed(reference);
            return;
        }

        match signal {
            SessionSignal::Event { name, .. } => {
                debug!(%name, "Ignoring session event");
            }
            SessionSignal::Response { id, outcome } => {
                if self.status.phase == SwitchPhase::Idle {
                    debug!(?id, "Ignoring response, no request in flight");
                    return;
                }
                if let Some(id) = id {
                    if !self.belongs_to_cycle(id, outcome.is_ok()) {
                        debug!(request_id = id, "Ignoring stale response");
                        return;
                    }
                }

                match outcome {
                    Ok(_) => self.on_success(),
                    Err(error) => self.on_failure(error).await,
                }
            }
        }
    }

    /// A success for any request of the cycle counts. A failure only counts
    /// for the latest one, earlier failures were already escalated.
    fn belongs_to_cycle(&self, id: u64, success: bool) -> bool {
        match self.cycle_requests.last() {
            None => true,
            Some(&latest) if !success => id == latest,
            Some(_) => self.cycle_requests.contains(&id),
        }
    }

    /// The id is recorded before publishing: a transport error does not mean
    /// the wallet never saw the request.
    async fn send(
        &mut self,
        session: &Session,
        from: &Chain,
        method: &str,
        params: Value,
    ) -> Result<u64, SwitchError> {
        let request = Request::new(RequestParam::SessionRequest(SessionRequestRequest {
            request: WalletRequest {
                method: method.to_owned(),
                params,
            },
            chain_id: from.id(),
        }));
        let id = request.id;
        self.cycle_requests.push(id);

        info!(
            topic = %session.topic,
            chain_id = %from.id(),
            request_id = id,
            method,
            "Sending wallet request"
        );
        self.transport.request(&session.topic, request).await?;

        Ok(id)
    }

    fn on_chain_changed(&mut self, reference: u64) {
        let Some(chain) = self.presets.find(&reference.to_string()).cloned() else {
            debug!(reference, "Wallet changed to an unknown chain");
            return;
        };

        info!(chain_id = %chain.id(), "Wallet changed chain");
        self.store.set_selected_chain(Some(chain));
        self.resolve();
    }

    fn on_success(&mut self) {
        self.store.set_selected_chain(Some(self.target.clone()));
        self.resolve();
    }

    async fn on_failure(&mut self, error: SwitchError) {
        if !matches!(
            self.status.phase,
            SwitchPhase::Switching | SwitchPhase::Adding
        ) {
            debug!(%error, phase = ?self.status.phase, "Ignoring failure");
            return;
        }

        self.status.last_error = Some(error);
        if self.status.retry.tried_adding_chain {
            self.fail();
            return;
        }

        self.status.retry.tried_adding_chain = true;
        self.set_phase(SwitchPhase::Adding);

        let Some(from) = self.store.selected_chain() else {
            debug!("No selected chain, not adding");
            return;
        };
        let target = self.target.clone();
        if let Err(error) = self.add_eth_chain(&from, &target).await {
            warn!(%error, chain_id = %target.id(), "Add chain request failed");
            self.status.last_error = Some(error);
            self.fail();
        }
    }

    fn fail(&mut self) {
        warn!(
            chain_id = %self.target.id(),
            error = ?self.status.last_error,
            "Wallet could not switch chain"
        );
        self.status.retry.switch_failed = true;
        self.set_phase(SwitchPhase::Failed);
    }

    /// Routes away exactly once per switch cycle.
    fn resolve(&mut self) {
        if self.status.phase == SwitchPhase::Succeeded {
            return;
        }

        self.set_phase(SwitchPhase::Succeeded);
        self.router.set_route(self.config.success_route);
    }

    fn open_wallet(&self, session: &Session) {
        if !self.config.open_wallet_redirect {
            return;
        }
        let Some(redirect) = session.redirect_url() else {
            return;
        };

        match Url::parse(redirect) {
            Ok(url) => self.router.open_url(&url),
            Err(error) => debug!(%error, redirect, "Peer redirect is not a valid URL"),
        }
    }

    fn set_phase(&mut self, phase: SwitchPhase) {
        self.status.phase = phase;
        self.publish();
    }

    fn publish(&self) {
        self.status_tx.send_replace(self.status.clone());
    }
}

/// UI-side handle to a spawned [`ChainSwitchCoordinator`].
///
/// Dropping the handle stops the coordinator task.
pub struct CoordinatorHandle {
    events: mpsc::Sender<UiEvent>,
    status: watch::Receiver<SwitchStatus>,
    shutdown: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl CoordinatorHandle {
    pub async fn handle(&self, event: UiEvent) -> Result<(), Error> {
        self.events
            .send(event)
            .await
            .map_err(|_| Error::CoordinatorClosed)
    }

    pub fn status(&self) -> watch::Receiver<SwitchStatus> {
        self.status.clone()
    }

    pub fn switch_failed(&self) -> bool {
        self.status.borrow().switch_failed()
    }

    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for CoordinatorHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(());
    }
}
