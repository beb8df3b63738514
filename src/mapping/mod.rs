//! The mapping engine: dispatch, field copying and the public facade.

pub mod configuration;
pub mod dispatch;
pub mod errors;
pub mod mapper;
pub mod property;

pub use configuration::{ConverterKind, MappingConfiguration};
pub use dispatch::convert_value;
pub use errors::MapError;
pub use mapper::Mapper;
pub use property::{FieldFailure, MapReport, PropertyMapper};
