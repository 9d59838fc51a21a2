use super::array_items;
use crate::json::JsonValueExt;
use crate::models::{ApiKey, CreatedApiKey};
use crate::{Client, Result};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// API key management endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeys<'a> {
    client: &'a Client,
}

impl<'a> ApiKeys<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List every API key on the account.
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<ApiKey>> {
        let response = self.client.get(&["api_keys"], &[], cancel).await?;
        let result = response.property("result").unwrap_or(&response);
        array_items(result)?.iter().map(ApiKey::from_json).collect()
    }

    /// Create a key. When `scopes` is empty the API grants full access.
    ///
    /// The returned secret cannot be retrieved again later.
    pub async fn create(
        &self,
        name: &str,
        scopes: &[&str],
        cancel: &CancellationToken,
    ) -> Result<CreatedApiKey> {
        let mut body = json!({ "name": name });
        if !scopes.is_empty() {
            body["scopes"] = json!(scopes);
        }
        let response = self.client.post(&["api_keys"], &body, cancel).await?;
        CreatedApiKey::from_json(&response)
    }

    /// Revoke a key.
    ///
    /// The id is sent as a single encoded path segment.
    pub async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        self.client.delete(&["api_keys", id], cancel).await
    }
}
