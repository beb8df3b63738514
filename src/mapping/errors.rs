//! Errors surfaced to callers of the mapper.
//!
//! Field-level problems never show up here; see
//! [`ConversionError`](crate::convert::ConversionError).

use miette::Diagnostic;
use thiserror::Error;

/// Error returned by [`Mapper`](crate::mapping::Mapper) and profile registration.
#[derive(Debug, Error, Diagnostic)]
pub enum MapError {
    #[error("invalid argument `{argument}`: {reason}")]
    #[diagnostic(
        code(loom::map::invalid_argument),
        help("pass a source object, a target type and non-empty converters")
    )]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    #[error("cannot instantiate target type `{type_name}`")]
    #[diagnostic(
        code(loom::map::instantiation),
        help("target types need a default constructor; use `TypeDescriptor::of` or `TypeDescriptor::record`")
    )]
    Instantiation { type_name: String },
}

impl MapError {
    pub(crate) fn missing(argument: &'static str) -> Self {
        MapError::InvalidArgument {
            argument,
            reason: format!("{} is required", argument),
        }
    }
}
