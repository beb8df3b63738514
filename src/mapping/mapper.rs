//! The mapping facade.

use std::sync::Arc;

use crate::convert::profile::MappingProfile;
use crate::core::projectable::{Projectable, TypeDescriptor};
use crate::mapping::configuration::MappingConfiguration;
use crate::mapping::errors::MapError;
use crate::mapping::property::{MapReport, PropertyMapper};

/// Maps source objects onto freshly constructed targets.
///
/// Cloning is cheap and a mapper can be shared between threads; the
/// converter chain is fixed once the mapper is built.
#[derive(Debug, Clone)]
pub struct Mapper {
    config: Arc<MappingConfiguration>,
}

impl Mapper {
    /// Create a mapper with the four built-in converters.
    pub fn new() -> Self {
        let mut config = MappingConfiguration::new();
        config.add_default_converters();
        Self::with_configuration(config)
    }

    /// Create a mapper over an explicit configuration.
    pub fn with_configuration(config: MappingConfiguration) -> Self {
        Mapper {
            config: Arc::new(config),
        }
    }

    /// The converter chain, in precedence order.
    pub fn profile(&self) -> &MappingProfile {
        self.config.profile()
    }

    /// Map `source` onto a new `T`.
    ///
    /// Field-level conversion problems never fail the call; affected
    /// fields keep their defaults.
    pub fn map<S, T>(&self, source: &S) -> Result<T, MapError>
    where
        S: Projectable,
        T: Projectable + Default,
    {
        let mut target = T::default();
        self.map_into(source, &mut target);
        Ok(target)
    }

    /// Like [`map`](Self::map), for a source that may be absent.
    pub fn map_opt<S, T>(&self, source: Option<&S>) -> Result<T, MapError>
    where
        S: Projectable,
        T: Projectable + Default,
    {
        let source = source.ok_or_else(|| MapError::missing("source"))?;
        self.map(source)
    }

    /// Map onto a target type known only at runtime.
    pub fn map_to(
        &self,
        source: Option<&dyn Projectable>,
        target_type: Option<&TypeDescriptor>,
    ) -> Result<Box<dyn Projectable>, MapError> {
        let source = source.ok_or_else(|| MapError::missing("source"))?;
        let target_type = target_type.ok_or_else(|| MapError::missing("target type"))?;

        let mut target = target_type
            .instantiate()
            .ok_or_else(|| MapError::Instantiation {
                type_name: target_type.name().to_string(),
            })?;

        self.map_into(source, target.as_mut());
        Ok(target)
    }

    /// Map `source` onto an existing `target`, returning what happened per field.
    pub fn map_into(&self, source: &dyn Projectable, target: &mut dyn Projectable) -> MapReport {
        let report = PropertyMapper::new(self.profile()).map_into(source, target);
        tracing::debug!(
            "mapped {} -> {}: {}",
            source.type_name(),
            target.type_name(),
            report
        );
        report
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldDescriptor;
    use crate::core::record::Record;
    use crate::core::types::{IntKind, TypeTag};
    use crate::core::value::Value;
    use crate::test_support::Person;

    #[test]
    fn test_map_to_struct() {
        let source = Record::anonymous().with("name", "Afiq").with("age", "25");
        let person: Person = Mapper::new().map(&source).unwrap();
        assert_eq!(person.name, "Afiq");
        assert_eq!(person.age, 25);
    }

    #[test]
    fn test_map_opt_rejects_absent_source() {
        let result: Result<Person, _> = Mapper::new().map_opt::<Record, Person>(None);
        assert!(matches!(
            result,
            Err(MapError::InvalidArgument {
                argument: "source",
                ..
            })
        ));
    }

    #[test]
    fn test_map_to_runtime_record() {
        let source = Record::anonymous().with("x", "3").with("y", 4);
        let point = TypeDescriptor::record(
            "Point",
            vec![
                FieldDescriptor::new("x", TypeTag::Int(IntKind::I32)),
                FieldDescriptor::new("y", TypeTag::Int(IntKind::I32)),
            ],
        );

        let target = Mapper::new().map_to(Some(&source), Some(&point)).unwrap();
        assert_eq!(target.type_name(), "Point");
        assert_eq!(target.get_field("x"), Some(Value::Int(3)));
        assert_eq!(target.get_field("y"), Some(Value::Int(4)));
    }

    #[test]
    fn test_map_to_struct_descriptor() {
        let source = Record::anonymous().with("name", "Afiq");
        let target = Mapper::new()
            .map_to(Some(&source), Some(&TypeDescriptor::of::<Person>()))
            .unwrap();
        let person = target.downcast::<Person>().unwrap();
        assert_eq!(person.name, "Afiq");
    }

    #[test]
    fn test_map_to_argument_errors() {
        let mapper = Mapper::new();
        let source = Record::anonymous();

        let err = mapper
            .map_to(None, Some(&TypeDescriptor::of::<Person>()))
            .err()
            .unwrap();
        assert!(matches!(err, MapError::InvalidArgument { argument: "source", .. }));

        let err = mapper.map_to(Some(&source), None).err().unwrap();
        assert!(matches!(
            err,
            MapError::InvalidArgument {
                argument: "target type",
                ..
            }
        ));

        let err = mapper
            .map_to(Some(&source), Some(&TypeDescriptor::opaque("Widget")))
            .err()
            .unwrap();
        assert!(matches!(err, MapError::Instantiation { type_name } if type_name == "Widget"));
    }

    #[test]
    fn test_mapper_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mapper>();
    }
}
