use crate::models::MailMessage;
use crate::{Client, Result};
use tokio_util::sync::CancellationToken;

/// Mail send endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Mail<'a> {
    client: &'a Client,
}

impl<'a> Mail<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Queue a message for delivery.
    ///
    /// The API accepts the message asynchronously; success only means it was
    /// queued.
    pub async fn send(&self, message: &MailMessage, cancel: &CancellationToken) -> Result<()> {
        let body = serde_json::to_value(message)?;
        self.client.post(&["mail", "send"], &body, cancel).await?;
        Ok(())
    }
}
