//! Value conversion: the converter trait, the built-in converters and the
//! ordered profile that holds them.

pub mod coerce;
pub mod collection;
pub mod datetime;
pub mod enumeration;
pub mod error;
pub mod primitive;
pub mod profile;
pub mod timestamp;
pub mod trait_def;

pub use collection::CollectionConverter;
pub use datetime::DateTimeConverter;
pub use enumeration::EnumConverter;
pub use error::ConversionError;
pub use primitive::PrimitiveConverter;
pub use profile::MappingProfile;
pub use timestamp::TimestampParser;
pub use trait_def::{Conversion, FnConverter, TypeConverter};
