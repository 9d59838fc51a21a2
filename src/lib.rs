//! # Mailgrid Client
//! Asynchronous wrapper around a SendGrid-style transactional email REST API, with typed models for profiles, API keys, bounces and outgoing mail built on [`Client`] and [`ClientBuilder`].
//!
//! ## Reading responses
//! Responses are read through the [`json`] module: a small property accessor that walks `/`-delimited paths through a [`serde_json::Value`], converts the node to the requested Rust type and can fall back to a default or to alternative field names. It is usable on its own for any JSON document.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. Every request takes a [`CancellationToken`]; cancelling it abandons the in-flight request.
//!
//! ## Out of scope
//! No retries, rate limiting, pagination or authentication flows. The API key is sent as a bearer token and nothing more.
//!
//! ## Errors
//! Transport failures surface as [`Error::Request`] and non-2xx statuses as [`Error::RequestFailed`]. A missing response field is [`Error::PropertyNotFound`]; a field of the wrong shape is [`Error::TypeCoercion`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Requests are traced with the `tracing` crate at debug level. Install a subscriber in your application to see them.
//!
//! ## Example
//! ```no_run
//! use mailgrid_client::{CancellationToken, Client, EmailAddress, MailMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailgrid_client::Error> {
//!     let client = Client::new("SG.my-api-key")?;
//!     let cancel = CancellationToken::new();
//!
//!     let profile = client.user().get_profile(&cancel).await?;
//!     println!("Signed in as {} {}", profile.first_name, profile.last_name);
//!
//!     let message = MailMessage::new(
//!         EmailAddress::new("noreply@example.com"),
//!         EmailAddress::new("someone@example.com"),
//!         "Hello",
//!     )
//!     .text("Sent from Rust");
//!     client.mail().send(&message, &cancel).await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod extensions;
pub mod json;
mod models;
pub mod resources;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::{
    Account, AccountType, ApiKey, Bounce, Content, CreatedApiKey, EmailAddress, MailMessage,
    Personalization, UserProfile, UserProfileUpdate,
};
pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;

/// Result type alias for mail API operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
