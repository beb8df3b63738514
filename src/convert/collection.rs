//! Collection conversions.

use crate::convert::coerce::coerce;
use crate::convert::error::ConversionError;
use crate::convert::trait_def::TypeConverter;
use crate::core::types::TypeTag;
use crate::core::value::Value;

/// Converts one sequence into another, element by element.
///
/// Elements go through generic coercion only, not through the converter
/// chain, so custom converters never see collection elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionConverter;

impl CollectionConverter {
    pub fn new() -> Self {
        CollectionConverter
    }
}

impl TypeConverter for CollectionConverter {
    fn name(&self) -> &str {
        "collection"
    }

    fn can_convert(&self, source: &TypeTag, target: &TypeTag) -> bool {
        source.is_sequence() && target.is_sequence()
    }

    fn convert(&self, value: &Value, target: &TypeTag) -> Result<Value, ConversionError> {
        let items = match value {
            Value::List(items) | Value::Array(items) => items,
            other => {
                return Err(ConversionError::Unsupported {
                    source_kind: other.kind_name().to_string(),
                    target: target.to_string(),
                })
            }
        };

        let element = target.element_type();
        let converted = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                coerce(item, &element).map_err(|e| ConversionError::Element {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match target {
            TypeTag::Array(_) => Value::Array(converted),
            _ => Value::List(converted),
        })
    }
}
