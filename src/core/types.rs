//! Declared types for fields and conversion targets.
//!
//! A [`TypeTag`] is what a field *declares*; the runtime shape of a value is
//! reported by [`Value::type_tag`](crate::core::value::Value::type_tag).
//! Converters decide whether they apply by looking at both.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::core::value::{EnumValue, Value};

/// Width and signedness of an integer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntKind {
    /// Get the kind name as used in schema files (e.g., "i32").
    pub fn as_str(&self) -> &'static str {
        match self {
            IntKind::I8 => "i8",
            IntKind::I16 => "i16",
            IntKind::I32 => "i32",
            IntKind::I64 => "i64",
            IntKind::U8 => "u8",
            IntKind::U16 => "u16",
            IntKind::U32 => "u32",
            IntKind::U64 => "u64",
        }
    }

    /// Inclusive range of values representable by this kind.
    pub fn bounds(&self) -> (i128, i128) {
        match self {
            IntKind::I8 => (i8::MIN as i128, i8::MAX as i128),
            IntKind::I16 => (i16::MIN as i128, i16::MAX as i128),
            IntKind::I32 => (i32::MIN as i128, i32::MAX as i128),
            IntKind::I64 => (i64::MIN as i128, i64::MAX as i128),
            IntKind::U8 => (0, u8::MAX as i128),
            IntKind::U16 => (0, u16::MAX as i128),
            IntKind::U32 => (0, u32::MAX as i128),
            IntKind::U64 => (0, u64::MAX as i128),
        }
    }

    /// Check whether `n` fits in this kind.
    pub fn contains(&self, n: i128) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&n)
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, IntKind::I8 | IntKind::I16 | IntKind::I32 | IntKind::I64)
    }
}

/// Floating point width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

impl FloatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FloatKind::F32 => "f32",
            FloatKind::F64 => "f64",
        }
    }
}

/// A named member of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumMember {
    /// Member name as declared
    pub name: String,
    /// Underlying ordinal
    pub ordinal: i64,
}

/// Runtime description of an enumeration type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumDescriptor {
    name: String,
    members: Vec<EnumMember>,
}

impl EnumDescriptor {
    /// Create a descriptor from `(name, ordinal)` pairs.
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        EnumDescriptor {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(name, ordinal)| EnumMember {
                    name: name.into(),
                    ordinal,
                })
                .collect(),
        }
    }

    /// Create a descriptor whose ordinals are the member positions.
    pub fn from_names<I, S>(name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            names
                .into_iter()
                .enumerate()
                .map(|(i, member)| (member, i as i64)),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// Find a member by name, ignoring ASCII case.
    pub fn member_ignore_case(&self, name: &str) -> Option<&EnumMember> {
        self.members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Find the member with the given ordinal.
    pub fn member_by_ordinal(&self, ordinal: i64) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.ordinal == ordinal)
    }
}

/// Declared type of a field or conversion target.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeTag {
    Bool,
    Char,
    Int(IntKind),
    Float(FloatKind),
    /// Text
    String,
    /// High-precision decimal
    Decimal,
    /// Calendar timestamp without offset
    DateTime,
    Enum(Arc<EnumDescriptor>),
    /// Nullable wrapper around a value kind
    Nullable(Box<TypeTag>),
    /// Fixed-shape array with an element type
    Array(Box<TypeTag>),
    /// Growable list; `None` means an untyped element
    List(Option<Box<TypeTag>>),
    /// Nested record, by type name
    Record(String),
    /// Anything goes
    Any,
}

impl TypeTag {
    /// Shorthand for `TypeTag::List(Some(element))`.
    pub fn list_of(element: TypeTag) -> Self {
        TypeTag::List(Some(Box::new(element)))
    }

    /// Shorthand for `TypeTag::Array(element)`.
    pub fn array_of(element: TypeTag) -> Self {
        TypeTag::Array(Box::new(element))
    }

    /// Wrap this type so it admits null.
    ///
    /// Kinds that already admit null (text, sequences, records, `Any`) and
    /// already-nullable types are returned unchanged.
    pub fn nullable(self) -> Self {
        if self.admits_null() {
            self
        } else {
            TypeTag::Nullable(Box::new(self))
        }
    }

    /// Bool, char, integer and float kinds.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TypeTag::Bool | TypeTag::Char | TypeTag::Int(_) | TypeTag::Float(_)
        )
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, TypeTag::String)
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, TypeTag::Decimal)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, TypeTag::Enum(_))
    }

    /// Timestamp or nullable timestamp.
    pub fn is_timestamp(&self) -> bool {
        match self {
            TypeTag::DateTime => true,
            TypeTag::Nullable(inner) => matches!(**inner, TypeTag::DateTime),
            _ => false,
        }
    }

    /// Arrays and lists.
    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeTag::Array(_) | TypeTag::List(_))
    }

    /// The wrapped type of a nullable wrapper.
    pub fn nullable_inner(&self) -> Option<&TypeTag> {
        match self {
            TypeTag::Nullable(inner) => Some(inner),
            _ => None,
        }
    }

    /// Element type of a sequence; `Any` for untyped lists and non-sequences.
    pub fn element_type(&self) -> TypeTag {
        match self {
            TypeTag::Array(element) => (**element).clone(),
            TypeTag::List(Some(element)) => (**element).clone(),
            _ => TypeTag::Any,
        }
    }

    /// Whether a null value is a legal value of this type.
    pub fn admits_null(&self) -> bool {
        matches!(
            self,
            TypeTag::Nullable(_)
                | TypeTag::String
                | TypeTag::Array(_)
                | TypeTag::List(_)
                | TypeTag::Record(_)
                | TypeTag::Any
        )
    }

    /// The value a freshly constructed field of this type holds.
    pub fn default_value(&self) -> Value {
        match self {
            TypeTag::Bool => Value::Bool(false),
            TypeTag::Char => Value::Char('\0'),
            TypeTag::Int(kind) if kind.is_signed() => Value::Int(0),
            TypeTag::Int(_) => Value::UInt(0),
            TypeTag::Float(_) => Value::Float(0.0),
            TypeTag::Decimal => Value::Decimal(Decimal::ZERO),
            TypeTag::DateTime => Value::DateTime(NaiveDateTime::default()),
            TypeTag::Enum(descriptor) => {
                let ordinal = descriptor.members().first().map_or(0, |m| m.ordinal);
                Value::Enum(EnumValue::new(descriptor.clone(), ordinal))
            }
            TypeTag::String
            | TypeTag::Nullable(_)
            | TypeTag::Array(_)
            | TypeTag::List(_)
            | TypeTag::Record(_)
            | TypeTag::Any => Value::Null,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Char => write!(f, "char"),
            TypeTag::Int(kind) => write!(f, "{}", kind.as_str()),
            TypeTag::Float(kind) => write!(f, "{}", kind.as_str()),
            TypeTag::String => write!(f, "string"),
            TypeTag::Decimal => write!(f, "decimal"),
            TypeTag::DateTime => write!(f, "datetime"),
            TypeTag::Enum(descriptor) => write!(f, "{}", descriptor.name()),
            TypeTag::Nullable(inner) => write!(f, "{}?", inner),
            TypeTag::Array(element) => write!(f, "array<{}>", element),
            TypeTag::List(Some(element)) => write!(f, "list<{}>", element),
            TypeTag::List(None) => write!(f, "list"),
            TypeTag::Record(name) => write!(f, "{}", name),
            TypeTag::Any => write!(f, "any"),
        }
    }
}
