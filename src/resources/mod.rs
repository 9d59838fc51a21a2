//! Typed wrappers over the API's endpoint groups.
//!
//! Each resource borrows the [`Client`](crate::Client) it was created from
//! and is cheap to create on demand.

mod api_keys;
mod bounces;
mod mail;
mod user;

pub use api_keys::ApiKeys;
pub use bounces::Bounces;
pub use mail::Mail;
pub use user::User;

use crate::json::{JsonKind, Value};
use crate::{Error, Result};

/// Elements of a response whose top level must be an array.
fn array_items(value: &Value) -> Result<&[Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::TypeCoercion {
            path: String::new(),
            found: JsonKind::of(value),
            target: "array",
        })
}
