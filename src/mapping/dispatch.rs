//! Conversion dispatch: pick a converter for one value, or fall back.
//!
//! Errors never leave this module. Whatever goes wrong becomes
//! [`Conversion::NotConvertible`], carrying the swallowed error for the
//! caller's report.

use crate::convert::coerce::coerce;
use crate::convert::enumeration::parse_member;
use crate::convert::error::ConversionError;
use crate::convert::profile::MappingProfile;
use crate::convert::trait_def::Conversion;
use crate::core::types::TypeTag;
use crate::core::value::Value;

/// Convert `value` to `target` through the first converter that claims it.
///
/// The source type is the value's runtime type. When no converter claims
/// the pairing, the built-in fallback runs instead.
pub fn convert_value(value: &Value, target: &TypeTag, profile: &MappingProfile) -> Conversion {
    if value.is_null() {
        return Conversion::NotConvertible(None);
    }

    let source = value.type_tag();
    let claimed = profile
        .converters()
        .iter()
        .find(|converter| converter.can_convert(&source, target));

    let result = match claimed {
        Some(converter) => {
            tracing::trace!(
                "converter `{}` claims {} -> {}",
                converter.name(),
                source,
                target
            );
            converter.convert(value, target)
        }
        None => {
            tracing::trace!("no converter for {} -> {}, falling back", source, target);
            fallback(value, target)
        }
    };

    match result {
        Ok(converted) => Conversion::Converted(converted),
        Err(e) => {
            tracing::debug!("cannot convert {} to {}: {}", source, target, e);
            Conversion::NotConvertible(Some(e))
        }
    }
}

/// Conversion used when no registered converter claims a pairing.
fn fallback(value: &Value, target: &TypeTag) -> Result<Value, ConversionError> {
    match (target, value) {
        (TypeTag::Enum(descriptor), Value::Text(text)) => {
            parse_member(descriptor, text).map(Value::Enum)
        }
        (TypeTag::Nullable(inner), _) => coerce(value, inner),
        _ => coerce(value, target),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::convert::trait_def::FnConverter;
    use crate::core::types::{EnumDescriptor, IntKind};
    use crate::mapping::configuration::MappingConfiguration;

    fn defaults() -> MappingProfile {
        let mut config = MappingConfiguration::new();
        config.add_default_converters();
        config.profile().clone()
    }

    fn status() -> TypeTag {
        TypeTag::Enum(Arc::new(EnumDescriptor::from_names(
            "UserStatus",
            ["Inactive", "Active", "Suspended"],
        )))
    }

    #[test]
    fn test_null_is_never_converted() {
        let outcome = convert_value(&Value::Null, &TypeTag::String, &defaults());
        assert_eq!(outcome, Conversion::NotConvertible(None));
    }

    #[test]
    fn test_builtin_conversion() {
        let outcome = convert_value(&"25".into(), &TypeTag::Int(IntKind::I32), &defaults());
        assert_eq!(outcome, Conversion::Converted(Value::Int(25)));
    }

    #[test]
    fn test_errors_are_swallowed() {
        let outcome = convert_value(
            &"not-a-number".into(),
            &TypeTag::Int(IntKind::I32),
            &defaults(),
        );
        assert!(matches!(
            outcome,
            Conversion::NotConvertible(Some(ConversionError::Parse { .. }))
        ));
    }

    #[test]
    fn test_first_claiming_converter_wins() {
        let mut profile = MappingProfile::new();
        profile.add_converter(FnConverter::new(
            "shout",
            |_, target| *target == TypeTag::String,
            |value, _| Ok(Value::from(value.to_string().to_uppercase())),
        ));
        profile.add_converter(FnConverter::new(
            "never",
            |_, _| true,
            |_, _| Ok(Value::from("unreachable")),
        ));

        let outcome = convert_value(&"abc".into(), &TypeTag::String, &profile);
        assert_eq!(outcome, Conversion::Converted(Value::from("ABC")));
    }

    #[test]
    fn test_claiming_converter_is_used_exclusively() {
        let mut profile = MappingProfile::new();
        profile.add_converter(FnConverter::new(
            "fails",
            |_, _| true,
            |value, target| {
                Err(ConversionError::Unsupported {
                    source_kind: value.kind_name().to_string(),
                    target: target.to_string(),
                })
            },
        ));
        profile.add_converter(crate::convert::PrimitiveConverter::new());

        let outcome = convert_value(&Value::Int(1), &TypeTag::String, &profile);
        assert!(!outcome.is_converted());
    }

    #[test]
    fn test_fallback_with_empty_profile() {
        let empty = MappingProfile::new();

        let outcome = convert_value(&"7".into(), &TypeTag::Int(IntKind::I64), &empty);
        assert_eq!(outcome, Conversion::Converted(Value::Int(7)));

        let outcome = convert_value(&"active".into(), &status(), &empty);
        match outcome.into_value() {
            Some(Value::Enum(ev)) => assert_eq!(ev.name(), Some("Active")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_fallback_unwraps_nullable() {
        let outcome = convert_value(
            &"42".into(),
            &TypeTag::Int(IntKind::I32).nullable(),
            &defaults(),
        );
        assert_eq!(outcome, Conversion::Converted(Value::Int(42)));
    }

    #[test]
    fn test_nullable_enum_from_text_is_not_convertible() {
        let outcome = convert_value(&"Active".into(), &status().nullable(), &defaults());
        assert!(!outcome.is_converted());
    }
}
