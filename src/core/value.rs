//! Dynamic values moved between source and target fields.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::convert::timestamp::format_timestamp;
use crate::core::record::Record;
use crate::core::types::{EnumDescriptor, FloatKind, IntKind, TypeTag};

/// An enum value: a descriptor plus an ordinal.
///
/// The ordinal does not have to name a declared member. Numeric conversions
/// into an enum pass out-of-range ordinals through unchanged, the same way a
/// raw integer cast into a C-like enum would.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    descriptor: Arc<EnumDescriptor>,
    ordinal: i64,
}

impl EnumValue {
    pub fn new(descriptor: Arc<EnumDescriptor>, ordinal: i64) -> Self {
        EnumValue {
            descriptor,
            ordinal,
        }
    }

    pub fn descriptor(&self) -> &Arc<EnumDescriptor> {
        &self.descriptor
    }

    pub fn ordinal(&self) -> i64 {
        self.ordinal
    }

    /// Name of the member with this ordinal, if one is declared.
    pub fn name(&self) -> Option<&str> {
        self.descriptor
            .member_by_ordinal(self.ordinal)
            .map(|m| m.name.as_str())
    }

    pub fn is_defined(&self) -> bool {
        self.name().is_some()
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.ordinal),
        }
    }
}

/// A dynamically typed field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Text(String),
    Decimal(Decimal),
    DateTime(NaiveDateTime),
    Enum(EnumValue),
    List(Vec<Value>),
    Array(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short description of the value's shape, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Text(_) => "text",
            Value::Decimal(_) => "decimal",
            Value::DateTime(_) => "datetime",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
        }
    }

    /// The runtime type of this value.
    ///
    /// Sequences report their common element type when all non-null
    /// elements agree, and an untyped element otherwise.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Any,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int(IntKind::I64),
            Value::UInt(_) => TypeTag::Int(IntKind::U64),
            Value::Float(_) => TypeTag::Float(FloatKind::F64),
            Value::Char(_) => TypeTag::Char,
            Value::Text(_) => TypeTag::String,
            Value::Decimal(_) => TypeTag::Decimal,
            Value::DateTime(_) => TypeTag::DateTime,
            Value::Enum(ev) => TypeTag::Enum(ev.descriptor().clone()),
            Value::List(items) => TypeTag::List(common_element(items).map(Box::new)),
            Value::Array(items) => {
                TypeTag::Array(Box::new(common_element(items).unwrap_or(TypeTag::Any)))
            }
            Value::Record(record) => TypeTag::Record(record.type_name().to_string()),
        }
    }

    /// Whether this value can be stored as-is in a field declared as `tag`.
    pub fn conforms_to(&self, tag: &TypeTag) -> bool {
        match (self, tag) {
            (_, TypeTag::Any) => true,
            (Value::Null, tag) => tag.admits_null(),
            (value, TypeTag::Nullable(inner)) => value.conforms_to(inner),
            (Value::Bool(_), TypeTag::Bool)
            | (Value::Char(_), TypeTag::Char)
            | (Value::Text(_), TypeTag::String)
            | (Value::Float(_), TypeTag::Float(_))
            | (Value::Decimal(_), TypeTag::Decimal)
            | (Value::DateTime(_), TypeTag::DateTime) => true,
            (Value::Int(i), TypeTag::Int(kind)) => kind.contains(*i as i128),
            (Value::UInt(u), TypeTag::Int(kind)) => kind.contains(*u as i128),
            (Value::Enum(ev), TypeTag::Enum(descriptor)) => {
                ev.descriptor().as_ref() == descriptor.as_ref()
            }
            (Value::List(_), TypeTag::List(None)) => true,
            (Value::List(items), TypeTag::List(Some(element)))
            | (Value::Array(items), TypeTag::Array(element)) => {
                items.iter().all(|item| item.conforms_to(element))
            }
            (Value::Record(record), TypeTag::Record(name)) => record.type_name() == name,
            _ => false,
        }
    }

    /// Build a value from a JSON document.
    ///
    /// Objects become anonymous records whose fields carry the runtime
    /// types of their values.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Record(Record::from_json_object(map)),
        }
    }

    /// Render this value as JSON.
    ///
    /// Timestamps use ISO-8601, decimals are rendered as strings to keep
    /// their precision, and enums use the member name (or the ordinal when
    /// no member is declared for it).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::UInt(u) => serde_json::Value::from(*u),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Char(c) => serde_json::Value::String(c.to_string()),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Decimal(d) => serde_json::Value::String(d.to_string()),
            Value::DateTime(dt) => serde_json::Value::String(format_timestamp(dt)),
            Value::Enum(ev) => match ev.name() {
                Some(name) => serde_json::Value::String(name.to_string()),
                None => serde_json::Value::from(ev.ordinal()),
            },
            Value::List(items) | Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Record(record) => record.to_json(),
        }
    }
}

fn common_element(items: &[Value]) -> Option<TypeTag> {
    let mut tags = items.iter().filter(|v| !v.is_null()).map(Value::type_tag);
    let first = tags.next()?;
    if tags.all(|tag| tag == first) {
        Some(first)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::Char(c) => write!(f, "{}", c),
            Value::Text(s) => write!(f, "{}", s),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::DateTime(dt) => write!(f, "{}", format_timestamp(dt)),
            Value::Enum(ev) => write!(f, "{}", ev),
            Value::List(items) | Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Record(record) => write!(f, "{}", record),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
