//! Request and response types for the mail API.

use crate::Result;
use crate::json::{JsonValueExt, Value};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Profile of the account owner.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
}

impl UserProfile {
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self {
            first_name: value.property_value("first_name")?,
            last_name: value.property_value("last_name")?,
            company: value.property_value_or("company", None)?,
            phone: value.property_value_or("phone", None)?,
            city: value.property_value_or("city", None)?,
            country: value.property_value_or("country", None)?,
            website: value.property_value_or("website", None)?,
        })
    }
}

/// Partial profile update. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

crate::json_enum! {
    /// Billing tier of an account.
    pub enum AccountType {
        Free = 0 => "free",
        Paid = 1 => "paid",
    }
}

/// Account tier and sender reputation.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_type: AccountType,
    /// Sender reputation, 0 to 100.
    pub reputation: f64,
}

impl Account {
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self {
            account_type: value.property_value("type")?,
            reputation: value.property_value("reputation")?,
        })
    }
}

/// An API key as listed by the API. The secret is never included.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    /// `None` when the listing omits scopes, which is not the same as a key
    /// with no scopes.
    pub scopes: Option<Vec<String>>,
}

impl ApiKey {
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self {
            id: value.first_property_value(&["api_key_id", "id"])?,
            name: value.property_value("name")?,
            scopes: value.property_value_or("scopes", None)?,
        })
    }
}

/// A freshly created API key, including its secret.
///
/// The secret is only returned once, at creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedApiKey {
    pub key: ApiKey,
    pub secret: String,
}

impl CreatedApiKey {
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self {
            key: ApiKey::from_json(value)?,
            secret: value.property_value("api_key")?,
        })
    }
}

/// An address on the bounce suppression list.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounce {
    pub email: String,
    pub created: DateTime<Utc>,
    pub reason: String,
    pub status: String,
}

impl Bounce {
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self {
            email: value.property_value("email")?,
            created: value.property_value("created")?,
            reason: value.property_value_or("reason", String::new())?,
            status: value.property_value_or("status", String::new())?,
        })
    }
}

/// A mailbox, optionally with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// Recipients sharing one envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Personalization {
    pub to: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailAddress>,
    /// Overrides the message subject for these recipients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Personalization {
    pub fn to(recipients: impl IntoIterator<Item = EmailAddress>) -> Self {
        Self {
            to: recipients.into_iter().collect(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: None,
        }
    }
}

/// One body part of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub mime_type: String,
    pub value: String,
}

impl Content {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            mime_type: "text/plain".to_string(),
            value: value.into(),
        }
    }

    pub fn html(value: impl Into<String>) -> Self {
        Self {
            mime_type: "text/html".to_string(),
            value: value.into(),
        }
    }
}

/// Message accepted by the mail send endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailMessage {
    pub personalizations: Vec<Personalization>,
    pub from: EmailAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub content: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Scheduled delivery time, sent as Unix seconds.
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub send_at: Option<DateTime<Utc>>,
}

impl MailMessage {
    /// Message to a single recipient with no body yet.
    pub fn new(from: EmailAddress, to: EmailAddress, subject: impl Into<String>) -> Self {
        Self {
            personalizations: vec![Personalization::to([to])],
            from,
            reply_to: None,
            subject: subject.into(),
            content: Vec::new(),
            categories: Vec::new(),
            send_at: None,
        }
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.content.push(Content::text(body));
        self
    }

    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.content.push(Content::html(body));
        self
    }

    pub fn send_at(mut self, when: DateTime<Utc>) -> Self {
        self.send_at = Some(when);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::extensions::from_unix_time;
    use serde_json::json;

    #[test]
    fn test_user_profile_with_nulls_and_missing_fields() {
        let value = json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "company": null,
            "city": "London"
        });
        let profile = UserProfile::from_json(&value).unwrap();
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.company, None);
        assert_eq!(profile.city.as_deref(), Some("London"));
        assert_eq!(profile.website, None);
    }

    #[test]
    fn test_user_profile_requires_names() {
        let err = UserProfile::from_json(&json!({"first_name": "Ada"})).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = UserProfileUpdate {
            city: Some("Paris".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"city": "Paris"}));
    }

    #[test]
    fn test_account_type_by_name_or_ordinal() {
        let by_name = Account::from_json(&json!({"type": "paid", "reputation": 99.7})).unwrap();
        assert_eq!(by_name.account_type, AccountType::Paid);
        assert_eq!(by_name.reputation, 99.7);

        let by_ordinal = Account::from_json(&json!({"type": 0, "reputation": 100})).unwrap();
        assert_eq!(by_ordinal.account_type, AccountType::Free);
        assert_eq!(by_ordinal.reputation, 100.0);
    }

    #[test]
    fn test_unknown_account_type() {
        let err = Account::from_json(&json!({"type": "enterprise", "reputation": 1})).unwrap_err();
        assert!(matches!(err, Error::TypeCoercion { ref path, .. } if path == "type"));
    }

    #[test]
    fn test_api_key_id_aliases() {
        let listed = ApiKey::from_json(&json!({"api_key_id": "abc", "name": "ci"})).unwrap();
        let legacy = ApiKey::from_json(&json!({"id": "abc", "name": "ci"})).unwrap();
        assert_eq!(listed, legacy);
        assert_eq!(listed.scopes, None);
    }

    #[test]
    fn test_created_api_key() {
        let value = json!({
            "api_key": "SG.secret",
            "api_key_id": "abc",
            "name": "ci",
            "scopes": ["mail.send"]
        });
        let created = CreatedApiKey::from_json(&value).unwrap();
        assert_eq!(created.secret, "SG.secret");
        assert_eq!(created.key.scopes, Some(vec!["mail.send".to_string()]));
    }

    #[test]
    fn test_bounce_created_from_unix_seconds() {
        let value = json!({"email": "a@example.com", "created": 1_443_651_125, "reason": "550"});
        let bounce = Bounce::from_json(&value).unwrap();
        assert_eq!(bounce.created.timestamp(), 1_443_651_125);
        assert_eq!(bounce.reason, "550");
        assert_eq!(bounce.status, "");
    }

    #[test]
    fn test_mail_message_serialization() {
        let message = MailMessage::new(
            EmailAddress::with_name("sender@example.com", "Sender"),
            EmailAddress::new("to@example.com"),
            "Hello",
        )
        .text("Hi there")
        .send_at(from_unix_time(1_700_000_000).unwrap());

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "personalizations": [{"to": [{"email": "to@example.com"}]}],
                "from": {"email": "sender@example.com", "name": "Sender"},
                "subject": "Hello",
                "content": [{"type": "text/plain", "value": "Hi there"}],
                "send_at": 1_700_000_000
            })
        );
    }
}
