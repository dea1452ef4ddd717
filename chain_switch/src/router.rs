use serde::{Deserialize, Serialize};
use url::Url;

/// Screens the coordinator can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Account overview of the connected wallet.
    #[default]
    Profile,
    /// Chain picker.
    Chains,
}

/// Navigation surface of the host app.
pub trait Router: Send + Sync {
    fn set_route(&self, route: Route);

    /// Opens a deep link or web URL outside the app.
    fn open_url(&self, url: &Url);
}
