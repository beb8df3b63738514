//! Dynamic records.
//!
//! A [`Record`] is an ordered bag of named fields. It plays two roles:
//! an anonymous source object (built from literals or JSON), and a
//! runtime-declared target whose fields are typed by a schema.

use std::fmt;

use crate::convert::error::ConversionError;
use crate::core::field::FieldDescriptor;
use crate::core::projectable::Projectable;
use crate::core::value::Value;

/// Type name used for records built without an explicit one.
pub const ANONYMOUS: &str = "<anonymous>";

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    descriptor: FieldDescriptor,
    value: Value,
}

/// An ordered set of named, typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    entries: Vec<Entry>,
}

impl Record {
    /// Create an empty record with the given type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        Record {
            type_name: type_name.into(),
            entries: Vec::new(),
        }
    }

    /// Create an empty anonymous record.
    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS)
    }

    /// Create a record with every declared field at its type's default.
    pub fn from_descriptors(type_name: impl Into<String>, fields: &[FieldDescriptor]) -> Self {
        Record {
            type_name: type_name.into(),
            entries: fields
                .iter()
                .map(|descriptor| Entry {
                    value: descriptor.ty.default_value(),
                    descriptor: descriptor.clone(),
                })
                .collect(),
        }
    }

    /// Build an anonymous record from a JSON object.
    pub fn from_json_object(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        map.iter().fold(Self::anonymous(), |record, (name, json)| {
            record.with(name.clone(), Value::from_json(json))
        })
    }

    /// Add a read-write field typed by the value's runtime type.
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let descriptor = FieldDescriptor::new(name, value.type_tag());
        self.with_field(descriptor, value)
    }

    /// Add a field with an explicit descriptor, replacing any same-named field.
    pub fn with_field(mut self, descriptor: FieldDescriptor, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.descriptor.name == descriptor.name)
        {
            Some(entry) => {
                entry.descriptor = descriptor;
                entry.value = value;
            }
            None => self.entries.push(Entry { descriptor, value }),
        }
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Get a field value regardless of its readability.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entry(name).map(|e| &e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDescriptor, &Value)> + '_ {
        self.entries.iter().map(|e| (&e.descriptor, &e.value))
    }

    /// Render as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .entries
            .iter()
            .map(|e| (e.descriptor.name.clone(), e.value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.descriptor.name == name)
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Projectable for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        self.entries.iter().map(|e| e.descriptor.clone()).collect()
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.entry(name)
            .filter(|e| e.descriptor.readable)
            .map(|e| e.value.clone())
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), ConversionError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.descriptor.name == name && e.descriptor.writable)
            .ok_or_else(|| ConversionError::NoSuchField {
                field: name.to_string(),
            })?;

        if !value.conforms_to(&entry.descriptor.ty) {
            return Err(ConversionError::Unsupported {
                source_kind: value.kind_name().to_string(),
                target: entry.descriptor.ty.to_string(),
            });
        }

        entry.value = value;
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
        self
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name)?;
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", e.descriptor.name, e.value)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{IntKind, TypeTag};

    #[test]
    fn test_anonymous_record_fields_are_runtime_typed() {
        let record = Record::anonymous().with("Name", "Afiq").with("Age", 25);

        let fields = record.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Name");
        assert_eq!(fields[0].ty, TypeTag::String);
        assert_eq!(fields[1].ty, TypeTag::Int(IntKind::I64));
        assert!(fields.iter().all(|f| f.readable && f.writable));
    }

    #[test]
    fn test_declared_record_starts_at_defaults() {
        let record = Record::from_descriptors(
            "Person",
            &[
                FieldDescriptor::new("Name", TypeTag::String),
                FieldDescriptor::new("Age", TypeTag::Int(IntKind::I32)),
            ],
        );

        assert_eq!(record.get("Name"), Some(&Value::Null));
        assert_eq!(record.get("Age"), Some(&Value::Int(0)));
    }

    #[test]
    fn test_set_field_checks_declared_type() {
        let mut record = Record::from_descriptors(
            "Person",
            &[FieldDescriptor::new("Age", TypeTag::Int(IntKind::I32))],
        );

        assert!(record.set_field("Age", Value::Int(30)).is_ok());
        assert_eq!(record.get("Age"), Some(&Value::Int(30)));

        let err = record.set_field("Age", Value::from("thirty")).unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { .. }));
        assert_eq!(record.get("Age"), Some(&Value::Int(30)));

        let err = record.set_field("Missing", Value::Int(1)).unwrap_err();
        assert!(matches!(err, ConversionError::NoSuchField { .. }));
    }

    #[test]
    fn test_access_flags_are_honoured() {
        let mut record = Record::anonymous()
            .with_field(FieldDescriptor::read_only("Id", TypeTag::Int(IntKind::I64)), 7)
            .with_field(FieldDescriptor::write_only("Secret", TypeTag::String), "x");

        assert_eq!(record.get_field("Id"), Some(Value::Int(7)));
        assert_eq!(record.get_field("Secret"), None);
        assert!(record.set_field("Id", Value::Int(8)).is_err());
        assert!(record.set_field("Secret", Value::from("y")).is_ok());
    }

    #[test]
    fn test_to_json_keeps_field_values() {
        let record = Record::anonymous().with("Name", "Afiq").with("Age", 25);
        let json = record.to_json();
        assert_eq!(json["Name"], "Afiq");
        assert_eq!(json["Age"], 25);
    }
}
