use crate::models::{Account, UserProfile, UserProfileUpdate};
use crate::{Client, Result};
use tokio_util::sync::CancellationToken;

/// User profile and account endpoints.
#[derive(Debug, Clone, Copy)]
pub struct User<'a> {
    client: &'a Client,
}

impl<'a> User<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch the profile of the account owner.
    pub async fn get_profile(&self, cancel: &CancellationToken) -> Result<UserProfile> {
        let response = self.client.get(&["user", "profile"], &[], cancel).await?;
        UserProfile::from_json(&response)
    }

    /// Change some profile fields and return the updated profile.
    pub async fn update_profile(
        &self,
        update: &UserProfileUpdate,
        cancel: &CancellationToken,
    ) -> Result<UserProfile> {
        let body = serde_json::to_value(update)?;
        let response = self.client.patch(&["user", "profile"], &body, cancel).await?;
        UserProfile::from_json(&response)
    }

    /// Fetch the account tier and sender reputation.
    pub async fn get_account(&self, cancel: &CancellationToken) -> Result<Account> {
        let response = self.client.get(&["user", "account"], &[], cancel).await?;
        Account::from_json(&response)
    }
}
