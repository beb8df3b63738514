//! TypeConverter trait definition and conversion outcome.

use std::fmt;
use std::sync::Arc;

use crate::convert::error::ConversionError;
use crate::core::types::TypeTag;
use crate::core::value::Value;

/// A strategy that claims and performs one family of conversions.
///
/// The dispatcher always asks [`can_convert`](TypeConverter::can_convert)
/// first and only calls [`convert`](TypeConverter::convert) on a pairing
/// that was claimed.
pub trait TypeConverter: Send + Sync {
    /// Short name for logs and listings.
    fn name(&self) -> &str;

    /// Whether this converter handles `source` into `target`.
    ///
    /// Must be a pure predicate.
    fn can_convert(&self, source: &TypeTag, target: &TypeTag) -> bool;

    /// Convert `value` into `target`.
    fn convert(&self, value: &Value, target: &TypeTag) -> Result<Value, ConversionError>;
}

/// Outcome of one dispatched conversion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    /// A value of the target type was produced
    Converted(Value),

    /// Nothing was produced; the field keeps its default.
    ///
    /// Carries the swallowed error when there was one (null input has none).
    NotConvertible(Option<ConversionError>),
}

impl Conversion {
    pub fn is_converted(&self) -> bool {
        matches!(self, Conversion::Converted(_))
    }

    /// The converted value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Conversion::Converted(value) => Some(value),
            Conversion::NotConvertible(_) => None,
        }
    }
}

type CanConvertFn = dyn Fn(&TypeTag, &TypeTag) -> bool + Send + Sync;
type ConvertFn = dyn Fn(&Value, &TypeTag) -> Result<Value, ConversionError> + Send + Sync;

/// A converter assembled from two closures.
///
/// Handy for one-off overrides registered ahead of the built-ins.
#[derive(Clone)]
pub struct FnConverter {
    name: String,
    can_convert: Arc<CanConvertFn>,
    convert: Arc<ConvertFn>,
}

impl FnConverter {
    pub fn new<C, F>(name: impl Into<String>, can_convert: C, convert: F) -> Self
    where
        C: Fn(&TypeTag, &TypeTag) -> bool + Send + Sync + 'static,
        F: Fn(&Value, &TypeTag) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        FnConverter {
            name: name.into(),
            can_convert: Arc::new(can_convert),
            convert: Arc::new(convert),
        }
    }
}

impl TypeConverter for FnConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_convert(&self, source: &TypeTag, target: &TypeTag) -> bool {
        (self.can_convert)(source, target)
    }

    fn convert(&self, value: &Value, target: &TypeTag) -> Result<Value, ConversionError> {
        (self.convert)(value, target)
    }
}

impl fmt::Debug for FnConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
