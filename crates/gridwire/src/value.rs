use crate::record::Record;
use derive_more::From;
use serde::{Serialize, Serializer, ser::SerializeMap};
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

///
/// CONSTANTS
///

/// Canonical textual form for date/time values: `YYYY-MM-DD HH:MM:SS`.
pub const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

///
/// Value
///
/// Runtime cell value exchanged between the store collaborator, the
/// attribute accessor, and the read response.
///
/// `Record` values are entity instances or embedded value objects; the
/// accessor dereferences associated records to their identifier before a
/// value ever reaches a response cell.
///

#[derive(Clone, Debug, Default, From, PartialEq)]
pub enum Value {
    #[default]
    Null,
    #[from]
    Bool(bool),
    #[from]
    Int(i64),
    #[from]
    Decimal(f64),
    #[from]
    Text(String),
    #[from]
    DateTime(PrimitiveDateTime),
    List(Vec<Value>),
    #[from]
    Record(Record),
}

impl Value {
    /// Short label for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::DateTime(_) => "datetime",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }

    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Render a scalar for composite-key assembly.
    ///
    /// Composite keys are joined from scalar parts only; structured values
    /// have no key form.
    #[must_use]
    pub fn key_text(&self) -> Option<String> {
        match self {
            Self::Null => Some(String::new()),
            Self::Bool(v) => Some(v.to_string()),
            Self::Int(v) => Some(v.to_string()),
            Self::Decimal(v) => Some(v.to_string()),
            Self::Text(v) => Some(v.clone()),
            Self::DateTime(v) => Some(format_datetime(*v)),
            Self::List(_) | Self::Record(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Decimal(v) => serializer.serialize_f64(*v),
            Self::Text(v) => serializer.serialize_str(v),
            Self::DateTime(v) => serializer.serialize_str(&format_datetime(*v)),
            Self::List(items) => items.serialize(serializer),
            Self::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (name, value) in record.iter() {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Format a date/time value into its canonical textual form.
#[must_use]
pub fn format_datetime(value: PrimitiveDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        value.year(),
        u8::from(value.month()),
        value.day(),
        value.hour(),
        value.minute(),
        value.second()
    )
}

/// Parse the canonical textual form back into a date/time value.
pub fn parse_datetime(raw: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(raw, DATE_TIME_FORMAT)
}
