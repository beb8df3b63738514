//! Per-field conversion errors.
//!
//! These never reach callers of the mapper: the dispatcher turns them into
//! [`Conversion::NotConvertible`](crate::convert::Conversion::NotConvertible)
//! and the property mapper records them in its report.

use thiserror::Error;

/// Why a value could not be converted or assigned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("value `{value}` cannot be represented as {target}")]
    Unrepresentable { value: String, target: String },

    #[error("cannot parse `{input}` as {target}")]
    Parse { input: String, target: String },

    #[error("`{input}` is not a member of enum {enum_name}")]
    UnknownEnumMember { input: String, enum_name: String },

    #[error("no conversion from {source_kind} to {target}")]
    Unsupported { source_kind: String, target: String },

    #[error("no writable field `{field}`")]
    NoSuchField { field: String },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        source: Box<ConversionError>,
    },
}
