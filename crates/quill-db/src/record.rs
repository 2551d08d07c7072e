//! Record bindings and value coercion for the row mapper.
//!
//! A [`Record`] publishes one [`Binding`] per settable field: the column it
//! answers to and a typed setter. `#[derive(Record)]` generates the list at
//! compile time; hand-written impls build the same list with
//! [`Binding::new`] and [`assign`].

use crate::value::Value;
use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

type ParseSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to convert a column value into a field type.
#[derive(Error, Debug)]
pub enum CoerceError {
    #[error("cannot parse {input:?} as {target}")]
    Parse {
        input: String,
        target: &'static str,
        #[source]
        source: ParseSource,
    },

    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },
}

/// Text that is not one of the accepted boolean spellings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")]
pub struct InvalidBool;

/// Parse a boolean the way column text is interpreted.
pub fn parse_bool(input: &str) -> Result<bool, InvalidBool> {
    match input {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(InvalidBool),
    }
}

/// Conversion from a non-null column value into a field type.
///
/// `Ok(None)` means the pairing is not supported and the field is left as is.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Option<Self>, CoerceError>;
}

/// Setter signature stored in a [`Binding`].
pub type Setter<R> = fn(&mut R, &Value) -> Result<(), CoerceError>;

/// One settable field of a record.
pub struct Binding<R> {
    field: &'static str,
    column: &'static str,
    set: Setter<R>,
}

impl<R> Binding<R> {
    pub fn new(field: &'static str, column: &'static str, set: Setter<R>) -> Self {
        Self { field, column, set }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn matches(&self, column: &str) -> bool {
        self.column.eq_ignore_ascii_case(column)
    }

    pub fn set(&self, record: &mut R, value: &Value) -> Result<(), CoerceError> {
        (self.set)(record, value)
    }
}

impl<R> Clone for Binding<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Binding<R> {}

impl<R> std::fmt::Debug for Binding<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("field", &self.field)
            .field("column", &self.column)
            .finish()
    }
}

/// A type the row mapper can populate.
pub trait Record: Default {
    fn bindings() -> Vec<Binding<Self>>;
}

/// Store `value` into `slot`.
///
/// Null leaves the slot untouched, as does any unsupported pairing.
pub fn assign<T: FromValue>(slot: &mut T, value: &Value) -> Result<(), CoerceError> {
    if value.is_null() {
        return Ok(());
    }
    if let Some(v) = T::from_value(value)? {
        *slot = v;
    }
    Ok(())
}

fn text_of(value: &Value) -> Option<std::borrow::Cow<'_, str>> {
    match value {
        Value::Text(s) => Some(std::borrow::Cow::Borrowed(s.as_str())),
        Value::Bytes(b) => Some(String::from_utf8_lossy(b)),
        _ => None,
    }
}

fn parse_text<T>(input: &str, target: &'static str) -> Result<T, CoerceError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    input.parse::<T>().map_err(|e| CoerceError::Parse {
        input: input.to_string(),
        target,
        source: Box::new(e),
    })
}

macro_rules! signed_from_value {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
                if let Value::Int(i) = value {
                    return <$t>::try_from(*i)
                        .map(Some)
                        .map_err(|_| CoerceError::OutOfRange { value: *i, target: stringify!($t) });
                }
                match text_of(value) {
                    Some(text) => parse_text(&text, stringify!($t)).map(Some),
                    None => Ok(None),
                }
            }
        }
    )*};
}

// Integers only flow into signed fields; unsigned fields accept text.
macro_rules! unsigned_from_value {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
                match text_of(value) {
                    Some(text) => parse_text(&text, stringify!($t)).map(Some),
                    None => Ok(None),
                }
            }
        }
    )*};
}

signed_from_value!(i8, i16, i32, i64, isize);
unsigned_from_value!(u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
        if let Value::Float(f) = value {
            return Ok(Some(*f));
        }
        match text_of(value) {
            Some(text) => parse_text(&text, "f64").map(Some),
            None => Ok(None),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
        if let Value::Float(f) = value {
            return Ok(Some(*f as f32));
        }
        match text_of(value) {
            Some(text) => parse_text(&text, "f32").map(Some),
            None => Ok(None),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
        if let Value::Bool(b) = value {
            return Ok(Some(*b));
        }
        match text_of(value) {
            Some(text) => parse_bool(&text).map(Some).map_err(|e| CoerceError::Parse {
                input: text.into_owned(),
                target: "bool",
                source: Box::new(e),
            }),
            None => Ok(None),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
        Ok(text_of(value).map(|text| text.into_owned()))
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
        match value {
            Value::Bytes(b) => Ok(Some(b.clone())),
            _ => Ok(None),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
        match value {
            Value::Timestamp(ts) => Ok(Some(*ts)),
            _ => Ok(None),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
        match value {
            Value::Timestamp(ts) => Ok(Some(ts.and_utc())),
            _ => Ok(None),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Option<Self>, CoerceError> {
        Ok(T::from_value(value)?.map(Some))
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
