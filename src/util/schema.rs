//! Target schemas declared in TOML.
//!
//! ```toml
//! name = "User"
//!
//! [fields]
//! first_name = "string"
//! birth_date = "datetime"
//! status = "UserStatus"
//! roles = "list<string>"
//! score = "i32?"
//!
//! [enums]
//! UserStatus = ["Inactive", "Active", "Suspended"]
//! ```
//!
//! Fields are ordered by name.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::core::field::FieldDescriptor;
use crate::core::projectable::TypeDescriptor;
use crate::core::types::{EnumDescriptor, FloatKind, IntKind, TypeTag};

/// Error in a schema's type expressions.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("malformed type expression `{0}`")]
    Malformed(String),

    #[error("enum `{0}` declares no members")]
    EmptyEnum(String),

    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        source: Box<SchemaError>,
    },
}

#[derive(Debug, Deserialize)]
struct SchemaFile {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, String>,
    #[serde(default)]
    enums: BTreeMap<String, Vec<String>>,
}

/// A record type declared in a schema file.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
    enums: Vec<Arc<EnumDescriptor>>,
}

impl Schema {
    /// Load a schema from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schema file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid schema file: {}", path.display()))
    }

    /// Parse a schema from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: SchemaFile = toml::from_str(contents).context("failed to parse schema")?;

        let mut enums = HashMap::new();
        for (name, members) in &file.enums {
            if members.is_empty() {
                return Err(SchemaError::EmptyEnum(name.clone()).into());
            }
            enums.insert(
                name.clone(),
                Arc::new(EnumDescriptor::from_names(name.clone(), members.iter().cloned())),
            );
        }

        let fields = file
            .fields
            .iter()
            .map(|(field, ty)| {
                parse_type(ty, &enums)
                    .map(|ty| FieldDescriptor::new(field.clone(), ty))
                    .map_err(|e| SchemaError::Field {
                        field: field.clone(),
                        source: Box::new(e),
                    })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut enums: Vec<_> = enums.into_values().collect();
        enums.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(Schema {
            name: file.name,
            fields,
            enums,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn enums(&self) -> &[Arc<EnumDescriptor>] {
        &self.enums
    }

    /// Runtime target type for this schema.
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::record(self.name.clone(), self.fields.clone())
    }
}

/// Parse a type expression such as `i32`, `list<string>` or `datetime?`.
pub fn parse_type(
    expr: &str,
    enums: &HashMap<String, Arc<EnumDescriptor>>,
) -> std::result::Result<TypeTag, SchemaError> {
    let expr = expr.trim();

    if let Some(inner) = expr.strip_suffix('?') {
        return parse_type(inner, enums).map(TypeTag::nullable);
    }

    if let Some((outer, rest)) = expr.split_once('<') {
        let inner = rest
            .strip_suffix('>')
            .filter(|inner| !inner.trim().is_empty())
            .ok_or_else(|| SchemaError::Malformed(expr.to_string()))?;
        let inner = parse_type(inner, enums)?;
        return match outer.trim() {
            "list" => Ok(TypeTag::list_of(inner)),
            "array" => Ok(TypeTag::array_of(inner)),
            "option" => Ok(inner.nullable()),
            _ => Err(SchemaError::UnknownType(expr.to_string())),
        };
    }

    let tag = match expr {
        "bool" => TypeTag::Bool,
        "char" => TypeTag::Char,
        "i8" => TypeTag::Int(IntKind::I8),
        "i16" => TypeTag::Int(IntKind::I16),
        "i32" => TypeTag::Int(IntKind::I32),
        "i64" => TypeTag::Int(IntKind::I64),
        "u8" => TypeTag::Int(IntKind::U8),
        "u16" => TypeTag::Int(IntKind::U16),
        "u32" => TypeTag::Int(IntKind::U32),
        "u64" => TypeTag::Int(IntKind::U64),
        "f32" => TypeTag::Float(FloatKind::F32),
        "f64" => TypeTag::Float(FloatKind::F64),
        "string" => TypeTag::String,
        "decimal" => TypeTag::Decimal,
        "datetime" => TypeTag::DateTime,
        "any" => TypeTag::Any,
        "list" => TypeTag::List(None),
        "" => return Err(SchemaError::Malformed(expr.to_string())),
        name => match enums.get(name) {
            Some(descriptor) => TypeTag::Enum(descriptor.clone()),
            None => return Err(SchemaError::UnknownType(name.to_string())),
        },
    };

    Ok(tag)
}
