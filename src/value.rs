//! Value types and conversions for tursorepo

pub use turso::Value;

use crate::error::Error;
use crate::error::Result;

/// Trait for converting Rust types into database values
///
/// Implemented for common Rust types so they can be used as predicate and
/// update parameters. Custom types can implement this trait to be used with
/// the repository.
///
/// # Example
///
/// ```ignore
/// use tursorepo::IntoValue;
///
/// let value: Value = 42i64.into_value();
/// let text: Value = "hello".into_value();
/// ```
pub trait IntoValue {
    /// Convert this value into a database [`Value`]
    fn into_value(self) -> Value;
}

/// Trait for converting database values into Rust types
///
/// Implemented for common Rust types so they can be extracted from query
/// results inside [`FromRow`](crate::FromRow) implementations.
pub trait FromValue: Sized {
    /// Convert a database [`Value`] into this type
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be converted to this type,
    /// or if the value is null and this type is not nullable.
    fn from_value(value: Value) -> Result<Self>;
}

/// Trait normalizing the input of IN-style predicates into a value sequence
///
/// - a comma-separated string splits into one text token per segment
/// - a scalar becomes a single-element sequence
/// - a `Vec` or slice passes through unchanged
/// - `()` yields an empty sequence
pub trait IntoInValues {
    /// Normalize into the sequence of values for an `IN (...)` list
    fn into_in_values(self) -> Vec<Value>;
}

/// Whether a value counts as zero-valued for skip-zero update semantics
///
/// Zero values are `Null`, `Integer(0)`, `Real(0.0)`, the empty string, and
/// the empty blob. Whole-model updates skip these; a
/// [`Setter`](crate::Setter) sends them verbatim.
pub fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Integer(n) => *n == 0,
        Value::Real(r) => *r == 0.0,
        Value::Text(s) => s.is_empty(),
        Value::Blob(b) => b.is_empty(),
    }
}

/// Normalize a single already-converted value for the IN delegation path of
/// the three-argument predicate form: text splits on commas, anything else
/// becomes a one-element sequence.
pub(crate) fn normalize_in_scalar(value: Value) -> Vec<Value> {
    match value {
        Value::Text(s) => split_in_tokens(&s),
        other => vec![other],
    }
}

fn split_in_tokens(s: &str) -> Vec<Value> {
    s.split(',').map(|token| Value::Text(token.to_string())).collect()
}

// Implement IntoValue for common types

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for i16 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for i8 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for u64 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for u32 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for u16 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for u8 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Real(self)
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Real(self as f64)
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Integer(if self { 1 } else { 0 })
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl IntoValue for Vec<u8> {
    fn into_value(self) -> Value {
        Value::Blob(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }
}

// Implement FromValue for common types

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(n) => Ok(n),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Integer", actual: format!("{:?}", other) }),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self> {
        let n = i64::from_value(value)?;
        i32::try_from(n).map_err(|_| Error::TypeConversion { expected: "i32", actual: n.to_string() })
    }
}

impl FromValue for u64 {
    fn from_value(value: Value) -> Result<Self> {
        let n = i64::from_value(value)?;
        u64::try_from(n).map_err(|_| Error::TypeConversion { expected: "u64", actual: n.to_string() })
    }
}

impl FromValue for u32 {
    fn from_value(value: Value) -> Result<Self> {
        let n = i64::from_value(value)?;
        u32::try_from(n).map_err(|_| Error::TypeConversion { expected: "u32", actual: n.to_string() })
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Real(r) => Ok(r),
            Value::Integer(n) => Ok(n as f64),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Real", actual: format!("{:?}", other) }),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(n) => Ok(n != 0),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Integer (bool)", actual: format!("{:?}", other) }),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Text", actual: format!("{:?}", other) }),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(b) => Ok(b),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Blob", actual: format!("{:?}", other) }),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

// Implement IntoInValues: strings split on commas, scalars become a
// single-element sequence, sequences pass through unchanged.

impl IntoInValues for &str {
    fn into_in_values(self) -> Vec<Value> {
        split_in_tokens(self)
    }
}

impl IntoInValues for String {
    fn into_in_values(self) -> Vec<Value> {
        split_in_tokens(&self)
    }
}

impl IntoInValues for () {
    fn into_in_values(self) -> Vec<Value> {
        Vec::new()
    }
}

impl IntoInValues for i64 {
    fn into_in_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl IntoInValues for i32 {
    fn into_in_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl IntoInValues for i16 {
    fn into_in_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl IntoInValues for i8 {
    fn into_in_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl IntoInValues for u64 {
    fn into_in_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl IntoInValues for u32 {
    fn into_in_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl IntoInValues for f64 {
    fn into_in_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl IntoInValues for bool {
    fn into_in_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl<V: IntoValue> IntoInValues for Vec<V> {
    fn into_in_values(self) -> Vec<Value> {
        self.into_iter().map(IntoValue::into_value).collect()
    }
}

impl<V: IntoValue + Clone> IntoInValues for &[V] {
    fn into_in_values(self) -> Vec<Value> {
        self.iter().cloned().map(IntoValue::into_value).collect()
    }
}

// Optional chrono support
#[cfg(feature = "with-chrono")]
mod chrono_impl {
    use chrono::DateTime;
    use chrono::NaiveDate;
    use chrono::NaiveDateTime;
    use chrono::Utc;

    use super::*;

    impl IntoValue for NaiveDateTime {
        fn into_value(self) -> Value {
            Value::Text(self.format("%Y-%m-%d %H:%M:%S").to_string())
        }
    }

    impl FromValue for NaiveDateTime {
        fn from_value(value: Value) -> Result<Self> {
            match value {
                Value::Text(s) => NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
                    .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S"))
                    .map_err(|_| Error::TypeConversion { expected: "NaiveDateTime", actual: s }),
                Value::Null => Err(Error::UnexpectedNull),
                other => Err(Error::TypeConversion { expected: "Text (datetime)", actual: format!("{:?}", other) }),
            }
        }
    }

    impl IntoValue for DateTime<Utc> {
        fn into_value(self) -> Value {
            Value::Text(self.format("%Y-%m-%d %H:%M:%S").to_string())
        }
    }

    impl FromValue for DateTime<Utc> {
        fn from_value(value: Value) -> Result<Self> {
            let ndt = NaiveDateTime::from_value(value)?;
            Ok(DateTime::from_naive_utc_and_offset(ndt, Utc))
        }
    }

    impl IntoValue for NaiveDate {
        fn into_value(self) -> Value {
            Value::Text(self.format("%Y-%m-%d").to_string())
        }
    }

    impl FromValue for NaiveDate {
        fn from_value(value: Value) -> Result<Self> {
            match value {
                Value::Text(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|_| Error::TypeConversion { expected: "NaiveDate", actual: s }),
                Value::Null => Err(Error::UnexpectedNull),
                other => Err(Error::TypeConversion { expected: "Text (date)", actual: format!("{:?}", other) }),
            }
        }
    }
}

// Optional UUID support
#[cfg(feature = "with-uuid")]
mod uuid_impl {
    use uuid::Uuid;

    use super::*;

    impl IntoValue for Uuid {
        fn into_value(self) -> Value {
            Value::Text(self.to_string())
        }
    }

    impl FromValue for Uuid {
        fn from_value(value: Value) -> Result<Self> {
            match value {
                Value::Text(s) => {
                    Uuid::parse_str(&s).map_err(|_| Error::TypeConversion { expected: "UUID", actual: s })
                }
                Value::Blob(b) => Uuid::from_slice(&b)
                    .map_err(|_| Error::TypeConversion { expected: "UUID", actual: format!("{:?}", b) }),
                Value::Null => Err(Error::UnexpectedNull),
                other => {
                    Err(Error::TypeConversion { expected: "Text or Blob (UUID)", actual: format!("{:?}", other) })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_value_integer() {
        assert_eq!(42i64.into_value(), Value::Integer(42));
        assert_eq!(42i32.into_value(), Value::Integer(42));
        assert_eq!(42u8.into_value(), Value::Integer(42));
    }

    #[test]
    fn test_into_value_real() {
        assert_eq!(1.5f64.into_value(), Value::Real(1.5));
    }

    #[test]
    fn test_into_value_bool() {
        assert_eq!(true.into_value(), Value::Integer(1));
        assert_eq!(false.into_value(), Value::Integer(0));
    }

    #[test]
    fn test_into_value_text() {
        assert_eq!("hello".into_value(), Value::Text("hello".to_string()));
        assert_eq!("hello".to_string().into_value(), Value::Text("hello".to_string()));
    }

    #[test]
    fn test_into_value_option() {
        assert_eq!(Some(1i64).into_value(), Value::Integer(1));
        assert_eq!(None::<i64>.into_value(), Value::Null);
    }

    #[test]
    fn test_from_value_integer() {
        assert_eq!(i64::from_value(Value::Integer(7)).unwrap(), 7);
        assert_eq!(i32::from_value(Value::Integer(7)).unwrap(), 7);
    }

    #[test]
    fn test_from_value_integer_out_of_range() {
        let result = i32::from_value(Value::Integer(i64::MAX));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_value_text() {
        assert_eq!(String::from_value(Value::Text("x".to_string())).unwrap(), "x");
    }

    #[test]
    fn test_from_value_null_is_error_for_non_nullable() {
        assert!(matches!(i64::from_value(Value::Null), Err(Error::UnexpectedNull)));
        assert!(matches!(String::from_value(Value::Null), Err(Error::UnexpectedNull)));
    }

    #[test]
    fn test_from_value_option() {
        assert_eq!(Option::<i64>::from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i64>::from_value(Value::Integer(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_from_value_real_accepts_integer() {
        assert_eq!(f64::from_value(Value::Integer(2)).unwrap(), 2.0);
    }

    #[test]
    fn test_from_value_wrong_type() {
        let result = i64::from_value(Value::Text("nope".to_string()));
        assert!(matches!(result, Err(Error::TypeConversion { .. })));
    }

    #[test]
    fn test_is_zero_value() {
        assert!(is_zero_value(&Value::Null));
        assert!(is_zero_value(&Value::Integer(0)));
        assert!(is_zero_value(&Value::Real(0.0)));
        assert!(is_zero_value(&Value::Text(String::new())));
        assert!(is_zero_value(&Value::Blob(Vec::new())));
    }

    #[test]
    fn test_is_zero_value_non_zero() {
        assert!(!is_zero_value(&Value::Integer(1)));
        assert!(!is_zero_value(&Value::Real(0.1)));
        assert!(!is_zero_value(&Value::Text("x".to_string())));
        assert!(!is_zero_value(&Value::Blob(vec![0])));
    }

    #[test]
    fn test_in_values_comma_string_splits() {
        let values = "21,23".into_in_values();
        assert_eq!(values, vec![Value::Text("21".to_string()), Value::Text("23".to_string())]);
    }

    #[test]
    fn test_in_values_plain_string_single_token() {
        let values = "alice".into_in_values();
        assert_eq!(values, vec![Value::Text("alice".to_string())]);
    }

    #[test]
    fn test_in_values_scalar_single_element() {
        assert_eq!(21i64.into_in_values(), vec![Value::Integer(21)]);
    }

    #[test]
    fn test_in_values_vec_passes_through() {
        let values = vec![20i64, 21].into_in_values();
        assert_eq!(values, vec![Value::Integer(20), Value::Integer(21)]);
    }

    #[test]
    fn test_in_values_slice_passes_through() {
        let values = [20i64, 21].as_slice().into_in_values();
        assert_eq!(values, vec![Value::Integer(20), Value::Integer(21)]);
    }

    #[test]
    fn test_in_values_unit_is_empty() {
        assert!(().into_in_values().is_empty());
    }

    #[test]
    fn test_normalize_in_scalar_text_splits() {
        let values = normalize_in_scalar(Value::Text("a,b".to_string()));
        assert_eq!(values, vec![Value::Text("a".to_string()), Value::Text("b".to_string())]);
    }

    #[test]
    fn test_normalize_in_scalar_integer_wraps() {
        assert_eq!(normalize_in_scalar(Value::Integer(5)), vec![Value::Integer(5)]);
    }
}
