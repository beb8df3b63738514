//! Timestamp conversions.

use crate::convert::coerce::coerce;
use crate::convert::error::ConversionError;
use crate::convert::timestamp::TimestampParser;
use crate::convert::trait_def::TypeConverter;
use crate::core::types::TypeTag;
use crate::core::value::Value;

/// Converts text and timestamps into timestamp (or nullable timestamp) targets.
#[derive(Debug, Clone, Default)]
pub struct DateTimeConverter {
    parser: TimestampParser,
}

impl DateTimeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a parser with extra formats.
    pub fn with_parser(parser: TimestampParser) -> Self {
        DateTimeConverter { parser }
    }

    pub fn parser(&self) -> &TimestampParser {
        &self.parser
    }
}

impl TypeConverter for DateTimeConverter {
    fn name(&self) -> &str {
        "datetime"
    }

    fn can_convert(&self, _source: &TypeTag, target: &TypeTag) -> bool {
        target.is_timestamp()
    }

    fn convert(&self, value: &Value, _target: &TypeTag) -> Result<Value, ConversionError> {
        match value {
            Value::Text(text) => self.parser.parse(text).map(Value::DateTime),
            other => coerce(other, &TypeTag::DateTime),
        }
    }
}
