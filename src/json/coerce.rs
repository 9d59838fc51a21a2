//! Conversion of raw JSON nodes into typed Rust values.

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};
use std::fmt;

use crate::extensions::from_unix_time;

/// Shape tag of a JSON node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl JsonKind {
    /// Shape tag of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => JsonKind::Object,
            Value::Array(_) => JsonKind::Array,
            Value::String(_) => JsonKind::String,
            Value::Number(_) => JsonKind::Number,
            Value::Bool(_) => JsonKind::Bool,
            Value::Null => JsonKind::Null,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Object => "an object",
            JsonKind::Array => "an array",
            JsonKind::String => "a string",
            JsonKind::Number => "a number",
            JsonKind::Bool => "a boolean",
            JsonKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// A JSON node that does not fit the requested type.
///
/// For arrays this describes the offending element, not the array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Shape of the offending node.
    pub found: JsonKind,
    /// Array indices leading from the converted node to the offending one,
    /// outermost first. Empty when the node itself did not fit.
    pub indices: Vec<usize>,
}

impl Mismatch {
    /// Mismatch reported for `value` itself.
    pub fn of(value: &Value) -> Self {
        Self {
            found: JsonKind::of(value),
            indices: Vec::new(),
        }
    }

    /// The same mismatch seen from the array holding it at `index`.
    pub fn within(mut self, index: usize) -> Self {
        self.indices.insert(0, index);
        self
    }
}

/// Types that can be built from a borrowed JSON node.
///
/// Implemented for strings, booleans, every primitive number, `Option<T>`
/// (where `null` is `None`), `Vec<T>`, `DateTime<Utc>` (Unix seconds), raw
/// [`Value`] and enums declared with [`json_enum!`](crate::json_enum).
pub trait FromJsonValue: Sized {
    fn from_json_value(value: &Value) -> Result<Self, Mismatch>;
}

impl FromJsonValue for String {
    fn from_json_value(value: &Value) -> Result<Self, Mismatch> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| Mismatch::of(value))
    }
}

impl FromJsonValue for bool {
    fn from_json_value(value: &Value) -> Result<Self, Mismatch> {
        value.as_bool().ok_or_else(|| Mismatch::of(value))
    }
}

/// Whole value of a JSON number, accepting floats with no fractional part.
fn integral(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= u64::MAX as f64)
                .map(|f| f as i128)
        })
}

macro_rules! impl_integer {
    ($($ty:ty),+) => {
        $(
            impl FromJsonValue for $ty {
                fn from_json_value(value: &Value) -> Result<Self, Mismatch> {
                    match value {
                        Value::Number(n) => integral(n).and_then(|i| <$ty>::try_from(i).ok()),
                        _ => None,
                    }
                    .ok_or_else(|| Mismatch::of(value))
                }
            }
        )+
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromJsonValue for f64 {
    fn from_json_value(value: &Value) -> Result<Self, Mismatch> {
        value.as_f64().ok_or_else(|| Mismatch::of(value))
    }
}

impl FromJsonValue for f32 {
    fn from_json_value(value: &Value) -> Result<Self, Mismatch> {
        value
            .as_f64()
            .filter(|f| f.abs() <= f32::MAX as f64)
            .map(|f| f as f32)
            .ok_or_else(|| Mismatch::of(value))
    }
}

impl FromJsonValue for Value {
    fn from_json_value(value: &Value) -> Result<Self, Mismatch> {
        Ok(value.clone())
    }
}

impl FromJsonValue for DateTime<Utc> {
    fn from_json_value(value: &Value) -> Result<Self, Mismatch> {
        let seconds = i64::from_json_value(value)?;
        from_unix_time(seconds).ok_or_else(|| Mismatch::of(value))
    }
}

impl<T: FromJsonValue> FromJsonValue for Option<T> {
    fn from_json_value(value: &Value) -> Result<Self, Mismatch> {
        match value {
            Value::Null => Ok(None),
            other => T::from_json_value(other).map(Some),
        }
    }
}

impl<T: FromJsonValue> FromJsonValue for Vec<T> {
    fn from_json_value(value: &Value) -> Result<Self, Mismatch> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| T::from_json_value(item).map_err(|m| m.within(index)))
                .collect(),
            other => Err(Mismatch::of(other)),
        }
    }
}

/// Resolve an enum member from a JSON ordinal or a case-sensitive name.
#[doc(hidden)]
pub fn coerce_enum<E: Copy>(
    value: &Value,
    members: &[(E, &'static str, i64)],
) -> Result<E, Mismatch> {
    let member = match value {
        Value::Number(n) => integral(n)
            .and_then(|ordinal| members.iter().find(|(_, _, o)| i128::from(*o) == ordinal)),
        Value::String(s) => members.iter().find(|(_, name, _)| name == s),
        _ => None,
    };
    member.map(|(m, _, _)| *m).ok_or_else(|| Mismatch::of(value))
}

/// Declare a C-like enum that can be read from JSON either by ordinal or by
/// name.
///
/// Each member carries an explicit ordinal. Its JSON name defaults to the
/// identifier and can be overridden with `=> "name"`. Name matching is
/// case-sensitive. The macro derives `Debug`, `Clone`, `Copy`, `PartialEq`,
/// `Eq` and `Hash`.
///
/// ```
/// mailgrid_client::json_enum! {
///     pub enum Priority {
///         Low = 0 => "low",
///         High = 1 => "high",
///     }
/// }
///
/// let value = serde_json::json!({ "priority": "high" });
/// let priority: Priority = mailgrid_client::json::get_property_value(&value, "priority", None)?;
/// assert_eq!(priority, Priority::High);
/// # Ok::<(), mailgrid_client::Error>(())
/// ```
#[macro_export]
macro_rules! json_enum {
    (@name $variant:ident) => {
        stringify!($variant)
    };
    (@name $variant:ident $alias:literal) => {
        $alias
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $ordinal:literal $(=> $alias:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $ordinal
            ),+
        }

        impl $name {
            /// Every member with its JSON name and ordinal.
            pub const MEMBERS: &'static [($name, &'static str, i64)] = &[
                $( ($name::$variant, $crate::json_enum!(@name $variant $($alias)?), $ordinal) ),+
            ];

            /// JSON name of this member.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $crate::json_enum!(@name $variant $($alias)?) ),+
                }
            }

            /// Numeric value of this member.
            pub fn ordinal(self) -> i64 {
                self as i64
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::json::FromJsonValue for $name {
            fn from_json_value(
                value: &$crate::json::Value,
            ) -> ::std::result::Result<Self, $crate::json::Mismatch> {
                $crate::json::coerce_enum(value, Self::MEMBERS)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::json_enum! {
        enum Sample {
            Value0 = 0,
            Value1 = 1,
            Value2 = 2,
        }
    }

    crate::json_enum! {
        enum Renamed {
            Free = 0 => "free",
            Paid = 1 => "paid",
        }
    }

    #[test]
    fn test_string_requires_string_node() {
        assert_eq!(String::from_json_value(&json!("John")).unwrap(), "John");
        assert_eq!(
            String::from_json_value(&json!(42)),
            Err(Mismatch {
                found: JsonKind::Number,
                indices: vec![],
            })
        );
    }

    #[test]
    fn test_bool_does_not_accept_numbers() {
        assert!(bool::from_json_value(&json!(true)).unwrap());
        assert!(bool::from_json_value(&json!(1)).is_err());
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(u8::from_json_value(&json!(255)).unwrap(), 255);
        assert!(u8::from_json_value(&json!(256)).is_err());
        assert!(u32::from_json_value(&json!(-1)).is_err());
        assert_eq!(i64::from_json_value(&json!(-5)).unwrap(), -5);
        assert_eq!(u64::from_json_value(&json!(u64::MAX)).unwrap(), u64::MAX);
    }

    #[test]
    fn test_integer_rejects_fractions_and_strings() {
        assert_eq!(i32::from_json_value(&json!(3.0)).unwrap(), 3);
        assert!(i32::from_json_value(&json!(3.5)).is_err());
        assert!(i32::from_json_value(&json!("3")).is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(f64::from_json_value(&json!(99.5)).unwrap(), 99.5);
        assert_eq!(f32::from_json_value(&json!(2)).unwrap(), 2.0);
        assert!(f32::from_json_value(&json!(1e300)).is_err());
    }

    #[test]
    fn test_nullable_scalar() {
        assert_eq!(Option::<i32>::from_json_value(&json!(null)).unwrap(), None);
        assert_eq!(Option::<i32>::from_json_value(&json!(7)).unwrap(), Some(7));
        assert!(Option::<i32>::from_json_value(&json!("7")).is_err());
    }

    #[test]
    fn test_enum_by_ordinal_and_name() {
        assert_eq!(Sample::from_json_value(&json!(2)).unwrap(), Sample::Value2);
        assert_eq!(
            Sample::from_json_value(&json!("Value1")).unwrap(),
            Sample::Value1
        );
        assert_eq!(Sample::from_json_value(&json!(2.0)).unwrap(), Sample::Value2);
        assert!(Sample::from_json_value(&json!(1.5)).is_err());
        assert!(Sample::from_json_value(&json!(9)).is_err());
        assert!(Sample::from_json_value(&json!("value1")).is_err());
        assert!(Sample::from_json_value(&json!(true)).is_err());
    }

    #[test]
    fn test_enum_with_json_names() {
        assert_eq!(Renamed::from_json_value(&json!("paid")).unwrap(), Renamed::Paid);
        assert!(Renamed::from_json_value(&json!("Paid")).is_err());
        assert_eq!(Renamed::Free.name(), "free");
        assert_eq!(Renamed::Paid.ordinal(), 1);
        assert_eq!(Renamed::Paid.to_string(), "paid");
    }

    #[test]
    fn test_array_null_is_distinct_from_empty() {
        assert_eq!(Option::<Vec<i32>>::from_json_value(&json!(null)).unwrap(), None);
        assert_eq!(
            Option::<Vec<i32>>::from_json_value(&json!([])).unwrap(),
            Some(vec![])
        );
        assert_eq!(
            Option::<Vec<i32>>::from_json_value(&json!([1, 2, 3])).unwrap(),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_array_element_failure_reports_element() {
        let err = Vec::<i32>::from_json_value(&json!([1, "two", 3])).unwrap_err();
        assert_eq!(err.found, JsonKind::String);
        assert_eq!(err.indices, vec![1]);

        let err = Vec::<Vec<i32>>::from_json_value(&json!([[1], [2, null]])).unwrap_err();
        assert_eq!(err.found, JsonKind::Null);
        assert_eq!(err.indices, vec![1, 1]);
        assert_eq!(
            Vec::<i32>::from_json_value(&json!({"a": 1})).unwrap_err().found,
            JsonKind::Object
        );
        assert_eq!(
            Vec::<i32>::from_json_value(&json!(null)).unwrap_err().found,
            JsonKind::Null
        );
    }

    #[test]
    fn test_datetime_from_unix_seconds() {
        let created = DateTime::<Utc>::from_json_value(&json!(1_700_000_000)).unwrap();
        assert_eq!(created.timestamp(), 1_700_000_000);
        assert!(DateTime::<Utc>::from_json_value(&json!("2023-11-14")).is_err());
    }
}
