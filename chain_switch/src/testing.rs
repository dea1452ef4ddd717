//! Recording doubles for the session transport and the router.

use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use url::Url;

use crate::{
    chain::{Chain, ChainPresets},
    error::SwitchError,
    router::{Route, Router},
    rpc::{Metadata, Redirect, Request, RequestParam, WalletRequest},
    session::{Session, SessionTransport},
    store::AppStore,
};

#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Mutex<Vec<(String, Request)>>,
    failures: Mutex<VecDeque<SwitchError>>,
}

impl MockTransport {
    /// Makes the next `request` call fail with `error`.
    pub fn fail_next(&self, error: SwitchError) {
        self.failures.lock().push_back(error);
    }

    pub fn sent(&self) -> Vec<(String, Request)> {
        self.sent.lock().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|(_, request)| wallet_request(&request).map(|r| r.method.clone()))
            .collect()
    }

    pub fn last_id(&self) -> Option<u64> {
        self.sent.lock().last().map(|(_, request)| request.id)
    }
}

#[async_trait]
impl SessionTransport for MockTransport {
    async fn request(&self, topic: &str, request: Request) -> Result<(), SwitchError> {
        self.sent.lock().push((topic.to_owned(), request));
        match self.failures.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

pub fn wallet_request(request: &Request) -> Option<&WalletRequest> {
    match &request.params {
        RequestParam::SessionRequest(params) => Some(&params.request),
        RequestParam::SessionEvent(_) => None,
    }
}

/// First element of the wallet call's `params` array.
pub fn wallet_params(request: &Request) -> Option<&Value> {
    wallet_request(request)?.params.get(0)
}

#[derive(Debug, Default)]
pub struct MockRouter {
    routes: Mutex<Vec<Route>>,
    opened: Mutex<Vec<Url>>,
}

impl MockRouter {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().iter().map(Url::to_string).collect()
    }
}

impl Router for MockRouter {
    fn set_route(&self, route: Route) {
        self.routes.lock().push(route);
    }

    fn open_url(&self, url: &Url) {
        self.opened.lock().push(url.clone());
    }
}

pub fn preset(reference: &str) -> Chain {
    ChainPresets::builtin()
        .find(reference)
        .cloned()
        .unwrap_or_else(|| panic!("no preset for {reference}"))
}

pub fn session(redirect: Option<Redirect>) -> Session {
    Session {
        topic: "a1b2c3".to_owned(),
        peer: Metadata {
            description: "Test wallet".to_owned(),
            url: "https://wallet.example.com".to_owned(),
            icons: Vec::new(),
            name: "Wallet".to_owned(),
            redirect,
        },
    }
}

/// Store connected to Ethereum mainnet with a live session.
pub fn connected_store(redirect: Option<Redirect>) -> Arc<AppStore> {
    Arc::new(AppStore::new(Some(preset("1")), Some(session(redirect))))
}
