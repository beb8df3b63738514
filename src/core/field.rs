//! Field descriptors.

use crate::core::types::TypeTag;

/// Metadata for one named, typed member of an object.
///
/// Descriptors are produced per mapping call by
/// [`Projectable::fields`](crate::core::projectable::Projectable::fields)
/// and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name, matched case-sensitively
    pub name: String,

    /// Declared type
    pub ty: TypeTag,

    /// Whether the field may be read as a mapping source
    pub readable: bool,

    /// Whether the field may be assigned as a mapping target
    pub writable: bool,
}

impl FieldDescriptor {
    /// Create a readable and writable field.
    pub fn new(name: impl Into<String>, ty: TypeTag) -> Self {
        FieldDescriptor {
            name: name.into(),
            ty,
            readable: true,
            writable: true,
        }
    }

    /// Create a field that can be read but not assigned.
    pub fn read_only(name: impl Into<String>, ty: TypeTag) -> Self {
        FieldDescriptor {
            writable: false,
            ..Self::new(name, ty)
        }
    }

    /// Create a field that can be assigned but not read.
    pub fn write_only(name: impl Into<String>, ty: TypeTag) -> Self {
        FieldDescriptor {
            readable: false,
            ..Self::new(name, ty)
        }
    }
}
