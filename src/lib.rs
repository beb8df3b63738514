//! Loom - an object-to-object projection engine
//!
//! Given a source object, Loom builds a fresh target object and fills each
//! of its fields from the source field with the same name, converting values
//! through an ordered chain of [`TypeConverter`]s. Mapping is best-effort:
//! fields that cannot be converted keep their defaults and the call still
//! succeeds.
//!
//! ```ignore
//! use projection_loom::{projectable, Mapper, Record};
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! projectable!(Person { name, age });
//!
//! let source = Record::anonymous().with("name", "Afiq").with("age", "25");
//! let person: Person = Mapper::new().map(&source)?;
//! assert_eq!(person.age, 25);
//! ```

pub mod convert;
pub mod core;
pub mod mapping;
pub mod util;

/// Fixtures shared by unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::convert::{Conversion, ConversionError, FnConverter, MappingProfile, TypeConverter};
pub use crate::core::{
    EnumDescriptor, EnumValue, FieldDescriptor, FieldValue, Projectable, Record, TypeDescriptor,
    TypeTag, Value,
};
pub use crate::mapping::{MapError, MapReport, Mapper, MappingConfiguration};
