//! Primitive, string and decimal conversions.

use crate::convert::coerce::coerce;
use crate::convert::error::ConversionError;
use crate::convert::trait_def::TypeConverter;
use crate::core::types::TypeTag;
use crate::core::value::Value;

/// Converts between primitive kinds, text and decimals by generic coercion.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveConverter;

impl PrimitiveConverter {
    pub fn new() -> Self {
        PrimitiveConverter
    }
}

impl TypeConverter for PrimitiveConverter {
    fn name(&self) -> &str {
        "primitive"
    }

    fn can_convert(&self, _source: &TypeTag, target: &TypeTag) -> bool {
        target.is_primitive() || target.is_textual() || target.is_decimal()
    }

    fn convert(&self, value: &Value, target: &TypeTag) -> Result<Value, ConversionError> {
        coerce(value, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IntKind;

    #[test]
    fn test_claims_primitive_text_and_decimal_targets() {
        let converter = PrimitiveConverter::new();
        let source = TypeTag::String;

        assert!(converter.can_convert(&source, &TypeTag::Int(IntKind::I32)));
        assert!(converter.can_convert(&source, &TypeTag::String));
        assert!(converter.can_convert(&source, &TypeTag::Decimal));
        assert!(converter.can_convert(&source, &TypeTag::Bool));

        assert!(!converter.can_convert(&source, &TypeTag::DateTime));
        assert!(!converter.can_convert(&source, &TypeTag::Int(IntKind::I32).nullable()));
        assert!(!converter.can_convert(&source, &TypeTag::List(None)));
    }

    #[test]
    fn test_convert() {
        let converter = PrimitiveConverter::new();
        assert_eq!(
            converter
                .convert(&Value::Int(25), &TypeTag::Int(IntKind::I32))
                .unwrap(),
            Value::Int(25)
        );
        assert!(converter
            .convert(&"not-a-number".into(), &TypeTag::Int(IntKind::I32))
            .is_err());
    }
}
