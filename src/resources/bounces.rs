use super::array_items;
use crate::extensions::to_unix_time;
use crate::models::Bounce;
use crate::{Client, Result};
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

/// Bounce suppression list endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Bounces<'a> {
    client: &'a Client,
}

impl<'a> Bounces<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List bounces recorded between `start` and `end`, both optional.
    pub async fn list(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Bounce>> {
        let query: Vec<(&str, String)> = [("start_time", start), ("end_time", end)]
            .into_iter()
            .filter_map(|(name, time)| time.map(|t| (name, to_unix_time(&t).to_string())))
            .collect();

        let response = self
            .client
            .get(&["suppression", "bounces"], &query, cancel)
            .await?;
        array_items(&response)?.iter().map(Bounce::from_json).collect()
    }

    /// Remove an address from the bounce list.
    ///
    /// The address is sent as a single encoded path segment, so characters
    /// such as `#` or `?` in the local part are preserved.
    pub async fn delete(&self, email: &str, cancel: &CancellationToken) -> Result<()> {
        self.client
            .delete(&["suppression", "bounces", email], cancel)
            .await
    }
}
