use serde::{Deserialize, Serialize};

/// Deep links a peer advertises for bringing its app to the foreground.
#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub native: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub universal: Option<String>,
}

impl Redirect {
    /// Native app URI when present, otherwise the universal link.
    pub fn preferred(&self) -> Option<&str> {
        self.native
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .or_else(|| self.universal.as_deref().filter(|url| !url.is_empty()))
    }
}

#[derive(Debug, Serialize, PartialEq, Eq, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub description: String,
    pub url: String,
    pub icons: Vec<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub redirect: Option<Redirect>,
}
