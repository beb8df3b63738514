//! Mapper configuration: which converters run, in what order.

use serde::{Deserialize, Serialize};

use crate::convert::collection::CollectionConverter;
use crate::convert::datetime::DateTimeConverter;
use crate::convert::enumeration::EnumConverter;
use crate::convert::primitive::PrimitiveConverter;
use crate::convert::profile::MappingProfile;
use crate::convert::timestamp::TimestampParser;
use crate::util::config::Settings;

/// Identifier for a built-in converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// Bool, char, integer, float, string and decimal targets
    Primitive,
    /// Enum targets
    Enum,
    /// Timestamp targets
    DateTime,
    /// List and array targets
    Collection,
}

impl ConverterKind {
    /// Registration order used by [`MappingConfiguration::add_default_converters`].
    pub const DEFAULT_ORDER: [ConverterKind; 4] = [
        ConverterKind::Primitive,
        ConverterKind::Enum,
        ConverterKind::DateTime,
        ConverterKind::Collection,
    ];

    /// Get the converter name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConverterKind::Primitive => "primitive",
            ConverterKind::Enum => "enum",
            ConverterKind::DateTime => "datetime",
            ConverterKind::Collection => "collection",
        }
    }
}

impl std::fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConverterKind {
    type Err = ConverterKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primitive" => Ok(ConverterKind::Primitive),
            "enum" => Ok(ConverterKind::Enum),
            "datetime" => Ok(ConverterKind::DateTime),
            "collection" => Ok(ConverterKind::Collection),
            _ => Err(ConverterKindParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid converter name.
#[derive(Debug, Clone)]
pub struct ConverterKindParseError(pub String);

impl std::fmt::Display for ConverterKindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid converter '{}', valid values: primitive, enum, datetime, collection",
            self.0
        )
    }
}

impl std::error::Error for ConverterKindParseError {}

/// Owns the converter profile a [`Mapper`](crate::mapping::Mapper) dispatches through.
///
/// A new configuration has an empty profile. Custom converters added before
/// [`add_default_converters`](Self::add_default_converters) take precedence
/// over the built-ins for every pairing they claim.
#[derive(Debug, Clone, Default)]
pub struct MappingConfiguration {
    profile: MappingProfile,
}

impl MappingConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the four built-in converters in their fixed order.
    pub fn add_default_converters(&mut self) -> &mut Self {
        for kind in ConverterKind::DEFAULT_ORDER {
            self.add_builtin(kind, &TimestampParser::new());
        }
        self
    }

    /// Build a configuration from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let parser = TimestampParser::new().with_formats(settings.datetime.formats.iter().cloned());
        let mut config = Self::new();
        for kind in settings.converter_order() {
            config.add_builtin(kind, &parser);
        }
        tracing::debug!(
            "configured converters: {}",
            config.profile.names().join(", ")
        );
        config
    }

    fn add_builtin(&mut self, kind: ConverterKind, parser: &TimestampParser) {
        match kind {
            ConverterKind::Primitive => self.profile.add_converter(PrimitiveConverter::new()),
            ConverterKind::Enum => self.profile.add_converter(EnumConverter::new()),
            ConverterKind::DateTime => self
                .profile
                .add_converter(DateTimeConverter::with_parser(parser.clone())),
            ConverterKind::Collection => self.profile.add_converter(CollectionConverter::new()),
        };
    }

    pub fn profile(&self) -> &MappingProfile {
        &self.profile
    }

    /// Mutable access for registering custom converters.
    pub fn profile_mut(&mut self) -> &mut MappingProfile {
        &mut self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::trait_def::FnConverter;
    use crate::core::value::Value;

    #[test]
    fn test_default_order() {
        let mut config = MappingConfiguration::new();
        assert!(config.profile().is_empty());

        config.add_default_converters();
        assert_eq!(
            config.profile().names(),
            vec!["primitive", "enum", "datetime", "collection"]
        );
    }

    #[test]
    fn test_custom_converter_registered_first() {
        let mut config = MappingConfiguration::new();
        config.profile_mut().add_converter(FnConverter::new(
            "custom",
            |_, _| false,
            |value, _| Ok(value.clone()),
        ));
        config.add_default_converters();

        assert_eq!(config.profile().names()[0], "custom");
        assert_eq!(config.profile().len(), 5);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.converters.order = Some(vec![ConverterKind::DateTime, ConverterKind::Enum]);

        let config = MappingConfiguration::from_settings(&settings);
        assert_eq!(config.profile().names(), vec!["datetime", "enum"]);

        let default = MappingConfiguration::from_settings(&Settings::default());
        assert_eq!(default.profile().len(), 4);
    }

    #[test]
    fn test_from_settings_passes_formats() {
        let mut settings = Settings::default();
        settings.datetime.formats = vec!["%d.%m.%Y".to_string()];

        let config = MappingConfiguration::from_settings(&settings);
        let datetime = &config.profile().converters()[2];
        assert_eq!(datetime.name(), "datetime");
        assert!(datetime
            .convert(&Value::from("10.12.1995"), &crate::TypeTag::DateTime)
            .is_ok());
    }

    #[test]
    fn test_converter_kind_parse() {
        assert_eq!("enum".parse::<ConverterKind>().unwrap(), ConverterKind::Enum);
        assert_eq!(
            "DateTime".parse::<ConverterKind>().unwrap(),
            ConverterKind::DateTime
        );
        assert!("bogus".parse::<ConverterKind>().is_err());
        assert_eq!(ConverterKind::Collection.to_string(), "collection");
    }
}
