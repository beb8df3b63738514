//! Field access abstraction.
//!
//! The mapping engine never inspects Rust types directly. It only needs an
//! object to describe its fields and to read and write them as [`Value`]s,
//! which is what [`Projectable`] provides. Plain structs get an
//! implementation from the [`projectable!`](crate::projectable) macro; each
//! field type supplies its declared [`TypeTag`] and value conversion through
//! [`FieldValue`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::convert::error::ConversionError;
use crate::core::field::FieldDescriptor;
use crate::core::record::Record;
use crate::core::types::{FloatKind, IntKind, TypeTag};
use crate::core::value::Value;

/// An object whose fields can be enumerated, read and written by name.
pub trait Projectable: Any {
    /// Name of the object's type, for logging and errors.
    fn type_name(&self) -> &str;

    /// Describe the object's public fields.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Read a field. Returns `None` for unknown or unreadable fields.
    fn get_field(&self, name: &str) -> Option<Value>;

    /// Assign a field.
    ///
    /// Implementations must leave the field untouched when they return an
    /// error.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), ConversionError>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn Projectable {
    /// Borrow the concrete object behind a runtime-typed mapping result.
    pub fn downcast_ref<T: Projectable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Take ownership of the concrete object behind a runtime-typed mapping result.
    pub fn downcast<T: Projectable>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

/// A Rust type that can live in a projectable field.
pub trait FieldValue: Sized {
    /// The type this field declares.
    fn type_tag() -> TypeTag;

    /// Read the field as a value.
    fn to_value(&self) -> Value;

    /// Build the field from a value already converted to [`Self::type_tag`].
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

/// Declared type of a field, inferred from a reference to it.
///
/// Used by [`projectable!`](crate::projectable) so the macro does not need
/// to be told field types.
pub fn type_tag_of<T: FieldValue>(_field: &T) -> TypeTag {
    T::type_tag()
}

/// Error for a value whose shape does not match the receiving field.
pub fn mismatch<T: FieldValue>(value: &Value) -> ConversionError {
    ConversionError::Unsupported {
        source_kind: value.kind_name().to_string(),
        target: T::type_tag().to_string(),
    }
}

impl FieldValue for bool {
    fn type_tag() -> TypeTag {
        TypeTag::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for char {
    fn type_tag() -> TypeTag {
        TypeTag::Char
    }

    fn to_value(&self) -> Value {
        Value::Char(*self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Char(c) => Ok(c),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

macro_rules! int_field_value {
    ($($ty:ty => $kind:ident, $variant:ident, $wide:ty;)*) => {
        $(
            impl FieldValue for $ty {
                fn type_tag() -> TypeTag {
                    TypeTag::Int(IntKind::$kind)
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self as $wide)
                }

                fn from_value(value: Value) -> Result<Self, ConversionError> {
                    let out_of_range = |value: String| ConversionError::Unrepresentable {
                        value,
                        target: IntKind::$kind.as_str().to_string(),
                    };
                    match value {
                        Value::Int(i) => <$ty>::try_from(i).map_err(|_| out_of_range(i.to_string())),
                        Value::UInt(u) => <$ty>::try_from(u).map_err(|_| out_of_range(u.to_string())),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

int_field_value! {
    i8 => I8, Int, i64;
    i16 => I16, Int, i64;
    i32 => I32, Int, i64;
    i64 => I64, Int, i64;
    u8 => U8, UInt, u64;
    u16 => U16, UInt, u64;
    u32 => U32, UInt, u64;
    u64 => U64, UInt, u64;
}

impl FieldValue for f64 {
    fn type_tag() -> TypeTag {
        TypeTag::Float(FloatKind::F64)
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for f32 {
    fn type_tag() -> TypeTag {
        TypeTag::Float(FloatKind::F32)
    }

    fn to_value(&self) -> Value {
        Value::Float(*self as f64)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(f) => Ok(f as f32),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for String {
    fn type_tag() -> TypeTag {
        TypeTag::String
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for Decimal {
    fn type_tag() -> TypeTag {
        TypeTag::Decimal
    }

    fn to_value(&self) -> Value {
        Value::Decimal(*self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Decimal(d) => Ok(d),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for NaiveDateTime {
    fn type_tag() -> TypeTag {
        TypeTag::DateTime
    }

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

// Dates are timestamps at midnight; the time part is dropped on assignment.
impl FieldValue for NaiveDate {
    fn type_tag() -> TypeTag {
        TypeTag::DateTime
    }

    fn to_value(&self) -> Value {
        Value::DateTime(self.and_time(NaiveTime::MIN))
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::DateTime(dt) => Ok(dt.date()),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FieldValue for Value {
    fn type_tag() -> TypeTag {
        TypeTag::Any
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl FieldValue for Record {
    fn type_tag() -> TypeTag {
        TypeTag::Record(crate::core::record::ANONYMOUS.to_string())
    }

    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Record(record) => Ok(record),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn type_tag() -> TypeTag {
        T::type_tag().nullable()
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn elements<T: FieldValue>(items: Vec<Value>) -> Result<Vec<T>, ConversionError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            T::from_value(item).map_err(|e| ConversionError::Element {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn type_tag() -> TypeTag {
        TypeTag::list_of(T::type_tag())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::List(items) | Value::Array(items) => elements(items),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FieldValue> FieldValue for Box<[T]> {
    fn type_tag() -> TypeTag {
        TypeTag::array_of(T::type_tag())
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Array(items) | Value::List(items) => {
                elements(items).map(Vec::into_boxed_slice)
            }
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// Builds a fresh, default-initialised target instance.
pub type Constructor = Arc<dyn Fn() -> Box<dyn Projectable> + Send + Sync>;

/// Runtime description of a mapping target type.
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    constructor: Option<Constructor>,
}

impl TypeDescriptor {
    /// Describe a Rust type constructed through `Default`.
    pub fn of<T: Projectable + Default>() -> Self {
        let full = std::any::type_name::<T>();
        let name = full.rsplit("::").next().unwrap_or(full);
        TypeDescriptor {
            name: name.to_string(),
            constructor: Some(Arc::new(|| Box::new(T::default()) as Box<dyn Projectable>)),
        }
    }

    /// Describe a record type declared at runtime.
    pub fn record(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        let name = name.into();
        let record_name = name.clone();
        TypeDescriptor {
            name,
            constructor: Some(Arc::new(move || {
                Box::new(Record::from_descriptors(record_name.clone(), &fields))
                    as Box<dyn Projectable>
            })),
        }
    }

    /// Describe a named type that has no usable constructor.
    pub fn opaque(name: impl Into<String>) -> Self {
        TypeDescriptor {
            name: name.into(),
            constructor: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct a new default instance, if the type supports it.
    pub fn instantiate(&self) -> Option<Box<dyn Projectable>> {
        self.constructor.as_ref().map(|construct| construct())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}

/// Implement [`Projectable`] for a struct by listing its fields.
///
/// Every listed field must implement [`FieldValue`]. Fields listed under
/// `readonly` can act as a mapping source but are never assigned.
///
/// ```ignore
/// #[derive(Default)]
/// struct Person {
///     name: String,
///     age: i32,
///     id: u64,
/// }
///
/// projectable!(Person { name, age } readonly { id });
/// ```
#[macro_export]
macro_rules! projectable {
    ($ty:ty { $($field:ident),* $(,)? } $(readonly { $($ro:ident),* $(,)? })?) => {
        impl $crate::Projectable for $ty {
            fn type_name(&self) -> &str {
                stringify!($ty)
            }

            #[allow(unused_mut)]
            fn fields(&self) -> Vec<$crate::FieldDescriptor> {
                let mut fields: Vec<$crate::FieldDescriptor> = vec![
                    $($crate::FieldDescriptor::new(
                        stringify!($field),
                        $crate::core::projectable::type_tag_of(&self.$field),
                    ),)*
                ];
                $($(fields.push($crate::FieldDescriptor::read_only(
                    stringify!($ro),
                    $crate::core::projectable::type_tag_of(&self.$ro),
                ));)*)?
                fields
            }

            fn get_field(&self, name: &str) -> Option<$crate::Value> {
                $(if name == stringify!($field) {
                    return Some($crate::FieldValue::to_value(&self.$field));
                })*
                $($(if name == stringify!($ro) {
                    return Some($crate::FieldValue::to_value(&self.$ro));
                })*)?
                None
            }

            fn set_field(
                &mut self,
                name: &str,
                value: $crate::Value,
            ) -> Result<(), $crate::ConversionError> {
                $(if name == stringify!($field) {
                    self.$field = $crate::FieldValue::from_value(value)?;
                    return Ok(());
                })*
                let _ = value;
                Err($crate::ConversionError::NoSuchField {
                    field: name.to_string(),
                })
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
                self
            }
        }
    };
}

/// Declare a C-like enum usable as a projectable field.
///
/// The first member is the default, matching a freshly constructed target.
///
/// ```ignore
/// projectable_enum! {
///     pub enum UserStatus {
///         Inactive = 0,
///         Active = 1,
///         Suspended = 2,
///     }
/// }
/// ```
#[macro_export]
macro_rules! projectable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $first:ident = $first_ord:expr
            $(, $variant:ident = $ord:expr)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $first = $first_ord,
            $($variant = $ord,)*
        }

        impl $name {
            /// Runtime description of this enum.
            pub fn descriptor() -> std::sync::Arc<$crate::EnumDescriptor> {
                static DESCRIPTOR: std::sync::LazyLock<std::sync::Arc<$crate::EnumDescriptor>> =
                    std::sync::LazyLock::new(|| {
                        std::sync::Arc::new($crate::EnumDescriptor::new(
                            stringify!($name),
                            [
                                (stringify!($first), $first_ord as i64),
                                $((stringify!($variant), $ord as i64),)*
                            ],
                        ))
                    });
                DESCRIPTOR.clone()
            }

            pub fn ordinal(&self) -> i64 {
                *self as i64
            }

            pub fn from_ordinal(ordinal: i64) -> Option<Self> {
                if ordinal == $first_ord as i64 {
                    return Some($name::$first);
                }
                $(if ordinal == $ord as i64 {
                    return Some($name::$variant);
                })*
                None
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        impl $crate::FieldValue for $name {
            fn type_tag() -> $crate::TypeTag {
                $crate::TypeTag::Enum(Self::descriptor())
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Enum($crate::EnumValue::new(Self::descriptor(), self.ordinal()))
            }

            fn from_value(value: $crate::Value) -> Result<Self, $crate::ConversionError> {
                match value {
                    $crate::Value::Enum(ev) if ev.descriptor().name() == stringify!($name) => {
                        Self::from_ordinal(ev.ordinal()).ok_or_else(|| {
                            $crate::ConversionError::Unrepresentable {
                                value: ev.ordinal().to_string(),
                                target: stringify!($name).to_string(),
                            }
                        })
                    }
                    other => Err($crate::core::projectable::mismatch::<Self>(&other)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Person, Profile, UserStatus};

    #[test]
    fn test_macro_describes_fields() {
        let person = Person::default();
        let fields = person.fields();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], FieldDescriptor::new("name", TypeTag::String));
        assert_eq!(
            fields[1],
            FieldDescriptor::new("age", TypeTag::Int(IntKind::I32))
        );
    }

    #[test]
    fn test_macro_readonly_fields() {
        let mut profile = Profile {
            id: 9,
            ..Profile::default()
        };

        let id = profile
            .fields()
            .into_iter()
            .find(|f| f.name == "id")
            .unwrap();
        assert!(id.readable);
        assert!(!id.writable);

        assert_eq!(profile.get_field("id"), Some(Value::UInt(9)));
        assert!(profile.set_field("id", Value::UInt(10)).is_err());
        assert_eq!(profile.id, 9);
    }

    #[test]
    fn test_failed_assignment_leaves_field_untouched() {
        let mut person = Person {
            name: "Afiq".to_string(),
            age: 25,
        };

        assert!(person.set_field("age", Value::from("old")).is_err());
        assert!(person.set_field("age", Value::Int(i64::MAX)).is_err());
        assert_eq!(person.age, 25);

        person.set_field("age", Value::Int(26)).unwrap();
        assert_eq!(person.age, 26);
    }

    #[test]
    fn test_enum_macro() {
        assert_eq!(UserStatus::default(), UserStatus::Inactive);
        assert_eq!(UserStatus::Active.ordinal(), 1);
        assert_eq!(UserStatus::from_ordinal(2), Some(UserStatus::Suspended));
        assert_eq!(UserStatus::from_ordinal(5), None);

        let descriptor = UserStatus::descriptor();
        assert_eq!(descriptor.name(), "UserStatus");
        assert_eq!(descriptor.members().len(), 3);

        let value = UserStatus::Suspended.to_value();
        assert_eq!(UserStatus::from_value(value).unwrap(), UserStatus::Suspended);
    }

    #[test]
    fn test_option_and_vec_field_values() {
        assert_eq!(
            <Option<i32>>::type_tag(),
            TypeTag::Nullable(Box::new(TypeTag::Int(IntKind::I32)))
        );
        assert_eq!(<Option<String>>::type_tag(), TypeTag::String);
        assert_eq!(<Option<i32>>::from_value(Value::Null).unwrap(), None);

        let roles = <Vec<String>>::from_value(Value::from(vec!["Admin", "Editor"])).unwrap();
        assert_eq!(roles, vec!["Admin".to_string(), "Editor".to_string()]);

        let err = <Vec<String>>::from_value(Value::List(vec![Value::Null])).unwrap_err();
        assert!(matches!(err, ConversionError::Element { index: 0, .. }));
    }

    #[test]
    fn test_type_descriptor() {
        let person = TypeDescriptor::of::<Person>();
        assert_eq!(person.name(), "Person");

        let instance = person.instantiate().unwrap();
        assert!(instance.downcast_ref::<Person>().is_some());

        assert!(TypeDescriptor::opaque("Widget").instantiate().is_none());

        let record = TypeDescriptor::record(
            "Point",
            vec![FieldDescriptor::new("x", TypeTag::Int(IntKind::I32))],
        );
        let instance = record.instantiate().unwrap();
        assert_eq!(instance.type_name(), "Point");
        assert_eq!(instance.get_field("x"), Some(Value::Int(0)));
    }
}
