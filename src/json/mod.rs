//! Typed access to nested properties of a parsed JSON document.
//!
//! A property path is a `/`-delimited list of object keys: `"Child/Name"`
//! descends into `Child` and then reads `Name`. Lookups are case-sensitive
//! and never modify the document. Traversal stops as soon as a key is
//! missing or an intermediate node is not an object, and the property is then
//! considered absent.
//!
//! A property that is present but `null` is *not* absent: reading it as
//! `Option<T>` yields `None` even when a default was supplied.
//!
//! ```
//! use mailgrid_client::json::JsonValueExt;
//! use serde_json::json;
//!
//! let doc = json!({ "Name": "John", "Child": { "Name": "Bob" } });
//! let child: String = doc.property_value("Child/Name")?;
//! assert_eq!(child, "Bob");
//!
//! let city: String = doc.property_value_or("City", "Atlanta".to_string())?;
//! assert_eq!(city, "Atlanta");
//! # Ok::<(), mailgrid_client::Error>(())
//! ```

mod coerce;

pub use coerce::{FromJsonValue, JsonKind, Mismatch};
#[doc(hidden)]
pub use coerce::coerce_enum;
pub use serde_json::Value;

use crate::{Error, Result};

/// Separator between keys in a property path.
pub const PATH_SEPARATOR: char = '/';

fn find<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split(PATH_SEPARATOR)
        .try_fold(root, |node, key| node.as_object()?.get(key))
}

fn coerce<T: FromJsonValue>(value: &Value, path: &str) -> Result<T> {
    T::from_json_value(value).map_err(|mismatch| {
        let mut path = path.to_string();
        for index in &mismatch.indices {
            path.push(PATH_SEPARATOR);
            path.push_str(&index.to_string());
        }
        Error::TypeCoercion {
            path,
            found: mismatch.found,
            target: std::any::type_name::<T>(),
        }
    })
}

/// Locate the node at `path`.
///
/// Returns `Ok(None)` when the path does not resolve, unless
/// `throw_if_missing` is set, in which case [`Error::PropertyNotFound`] is
/// returned instead.
pub fn get_property<'a>(
    root: &'a Value,
    path: &str,
    throw_if_missing: bool,
) -> Result<Option<&'a Value>> {
    match find(root, path) {
        Some(value) => Ok(Some(value)),
        None if throw_if_missing => Err(Error::not_found(&[path], root)),
        None => Ok(None),
    }
}

/// Read the property at `path` as `T`.
///
/// When the path is absent the `default` is returned if there is one;
/// otherwise the call fails with [`Error::PropertyNotFound`]. A present value
/// that cannot be converted fails with [`Error::TypeCoercion`].
pub fn get_property_value<T: FromJsonValue>(
    root: &Value,
    path: &str,
    default: Option<T>,
) -> Result<T> {
    match get_property(root, path, default.is_none())? {
        Some(value) => coerce(value, path),
        None => default.ok_or_else(|| Error::not_found(&[path], root)),
    }
}

/// Read the first of several candidate paths that is present, as `T`.
///
/// Candidates are tried left to right, which lets callers follow renamed or
/// aliased fields. If none resolve, `default` is returned or
/// [`Error::PropertyNotFound`] lists every attempted path.
pub fn get_first_property_value<T: FromJsonValue>(
    root: &Value,
    paths: &[&str],
    default: Option<T>,
) -> Result<T> {
    for path in paths {
        if let Some(value) = get_property(root, path, false)? {
            return coerce(value, path);
        }
    }
    default.ok_or_else(|| Error::not_found(paths, root))
}

/// Method-style access to the functions of this module.
pub trait JsonValueExt {
    /// Node at `path`, if present.
    fn property(&self, path: &str) -> Option<&Value>;

    /// Required property converted to `T`.
    fn property_value<T: FromJsonValue>(&self, path: &str) -> Result<T>;

    /// Property converted to `T`, or `default` when absent.
    fn property_value_or<T: FromJsonValue>(&self, path: &str, default: T) -> Result<T>;

    /// First present candidate path converted to `T`.
    fn first_property_value<T: FromJsonValue>(&self, paths: &[&str]) -> Result<T>;
}

impl JsonValueExt for Value {
    fn property(&self, path: &str) -> Option<&Value> {
        find(self, path)
    }

    fn property_value<T: FromJsonValue>(&self, path: &str) -> Result<T> {
        get_property_value(self, path, None)
    }

    fn property_value_or<T: FromJsonValue>(&self, path: &str, default: T) -> Result<T> {
        get_property_value(self, path, Some(default))
    }

    fn first_property_value<T: FromJsonValue>(&self, paths: &[&str]) -> Result<T> {
        get_first_property_value(self, paths, None)
    }
}
