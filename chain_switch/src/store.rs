use parking_lot::RwLock;

use crate::{chain::Chain, session::Session};

/// Presentation state shared between the coordinator and the rest of the app.
///
/// Passed to each coordinator explicitly; there is no process-wide instance.
#[derive(Debug, Default)]
pub struct AppStore {
    selected_chain: RwLock<Option<Chain>>,
    session: RwLock<Option<Session>>,
}

impl AppStore {
    pub fn new(selected_chain: Option<Chain>, session: Option<Session>) -> Self {
        Self {
            selected_chain: RwLock::new(selected_chain),
            session: RwLock::new(session),
        }
    }

    pub fn selected_chain(&self) -> Option<Chain> {
        self.selected_chain.read().clone()
    }

    pub fn set_selected_chain(&self, chain: Option<Chain>) {
        *self.selected_chain.write() = chain;
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    pub fn set_session(&self, session: Option<Session>) {
        *self.session.write() = session;
    }
}
