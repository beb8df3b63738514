//! Core data model: values, declared types, fields and projectable objects.

pub mod field;
pub mod projectable;
pub mod record;
pub mod types;
pub mod value;

pub use field::FieldDescriptor;
pub use projectable::{FieldValue, Projectable, TypeDescriptor};
pub use record::Record;
pub use types::{EnumDescriptor, EnumMember, FloatKind, IntKind, TypeTag};
pub use value::{EnumValue, Value};
