//! Enum conversions.

use std::sync::Arc;

use crate::convert::error::ConversionError;
use crate::convert::trait_def::TypeConverter;
use crate::core::types::{EnumDescriptor, TypeTag};
use crate::core::value::{EnumValue, Value};

/// Converts text and integers into enum values.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumConverter;

impl EnumConverter {
    pub fn new() -> Self {
        EnumConverter
    }
}

impl TypeConverter for EnumConverter {
    fn name(&self) -> &str {
        "enum"
    }

    fn can_convert(&self, _source: &TypeTag, target: &TypeTag) -> bool {
        target.is_enum()
    }

    fn convert(&self, value: &Value, target: &TypeTag) -> Result<Value, ConversionError> {
        let TypeTag::Enum(descriptor) = target else {
            return Err(ConversionError::Unsupported {
                source_kind: value.kind_name().to_string(),
                target: target.to_string(),
            });
        };

        let ordinal = match value {
            Value::Text(text) => return parse_member(descriptor, text).map(Value::Enum),
            Value::Int(i) => *i,
            Value::UInt(u) => i64::try_from(*u).map_err(|_| ConversionError::Unrepresentable {
                value: u.to_string(),
                target: descriptor.name().to_string(),
            })?,
            Value::Bool(b) => *b as i64,
            Value::Char(c) => *c as i64,
            Value::Enum(ev) => ev.ordinal(),
            other => {
                return Err(ConversionError::Unsupported {
                    source_kind: other.kind_name().to_string(),
                    target: descriptor.name().to_string(),
                })
            }
        };

        Ok(Value::Enum(EnumValue::new(descriptor.clone(), ordinal)))
    }
}

/// Resolve `text` to a member of `descriptor`.
///
/// Member names match case-insensitively after trimming. Integer text is
/// read as an ordinal and, like a numeric source, may name no member.
pub fn parse_member(
    descriptor: &Arc<EnumDescriptor>,
    text: &str,
) -> Result<EnumValue, ConversionError> {
    let text = text.trim();

    if let Some(member) = descriptor.member_ignore_case(text) {
        return Ok(EnumValue::new(descriptor.clone(), member.ordinal));
    }

    if let Ok(ordinal) = text.parse::<i64>() {
        return Ok(EnumValue::new(descriptor.clone(), ordinal));
    }

    Err(ConversionError::UnknownEnumMember {
        input: text.to_string(),
        enum_name: descriptor.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> TypeTag {
        TypeTag::Enum(Arc::new(EnumDescriptor::from_names(
            "UserStatus",
            ["Inactive", "Active", "Suspended"],
        )))
    }

    fn convert(value: Value) -> Result<EnumValue, ConversionError> {
        match EnumConverter::new().convert(&value, &status())? {
            Value::Enum(ev) => Ok(ev),
            other => panic!("expected an enum value, got {:?}", other),
        }
    }

    #[test]
    fn test_text_matches_case_insensitively() {
        assert_eq!(convert("active".into()).unwrap().name(), Some("Active"));
        assert_eq!(convert("SUSPENDED".into()).unwrap().name(), Some("Suspended"));
        assert_eq!(convert(" Inactive ".into()).unwrap().name(), Some("Inactive"));
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = convert("Deleted".into()).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownEnumMember { .. }));
    }

    #[test]
    fn test_numeric_source_maps_by_ordinal() {
        assert_eq!(convert(Value::Int(2)).unwrap().name(), Some("Suspended"));
        assert_eq!(convert("1".into()).unwrap().name(), Some("Active"));
    }

    #[test]
    fn test_out_of_range_ordinal_passes_through() {
        let ev = convert(Value::Int(42)).unwrap();
        assert_eq!(ev.ordinal(), 42);
        assert!(!ev.is_defined());
    }

    #[test]
    fn test_claims_only_enum_targets() {
        let converter = EnumConverter::new();
        assert!(converter.can_convert(&TypeTag::String, &status()));
        assert!(!converter.can_convert(&TypeTag::String, &status().nullable()));
        assert!(!converter.can_convert(&TypeTag::String, &TypeTag::String));
    }

    #[test]
    fn test_unsupported_source() {
        let err = convert(Value::Float(1.0)).unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { .. }));
    }
}
