//! Proxy wire types and the create/update form.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A proxy configuration as returned by the backend. The id is
/// server-assigned; the console never fabricates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    pub id: i64,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Create/update body for a proxy. Name and uri are required; everything
/// beyond shape (uniqueness, URI reachability) is the backend's concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProxyForm {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "uri must not be empty"))]
    pub uri: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProxyForm {
    /// Populate an edit form from an existing proxy
    pub fn from_proxy(proxy: &Proxy) -> Self {
        Self {
            name: proxy.name.clone(),
            uri: proxy.uri.clone(),
            description: proxy.description.clone(),
        }
    }
}
