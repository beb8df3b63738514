//! Field-by-field copy from a source object onto a target object.

use std::collections::HashMap;
use std::fmt;

use crate::convert::error::ConversionError;
use crate::convert::profile::MappingProfile;
use crate::convert::trait_def::Conversion;
use crate::core::field::FieldDescriptor;
use crate::core::projectable::Projectable;
use crate::mapping::dispatch::convert_value;

/// A field that matched but could not be assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    pub field: String,
    pub reason: ConversionError,
}

/// What happened to each source field during one mapping call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapReport {
    /// Fields assigned on the target
    pub mapped: Vec<String>,
    /// Source fields with no writable target field of the same name
    pub unmatched: Vec<String>,
    /// Source fields skipped because their value was null
    pub null_skipped: Vec<String>,
    /// Fields whose conversion or assignment failed; the target kept its default
    pub failed: Vec<FieldFailure>,
}

impl MapReport {
    /// True when no matched field failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Look up the failure recorded for `field`.
    pub fn failure(&self, field: &str) -> Option<&ConversionError> {
        self.failed
            .iter()
            .find(|f| f.field == field)
            .map(|f| &f.reason)
    }
}

impl fmt::Display for MapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mapped, {} unmatched, {} null, {} failed",
            self.mapped.len(),
            self.unmatched.len(),
            self.null_skipped.len(),
            self.failed.len()
        )
    }
}

/// Copies same-named fields from a source onto a target through a profile.
#[derive(Debug, Clone, Copy)]
pub struct PropertyMapper<'a> {
    profile: &'a MappingProfile,
}

impl<'a> PropertyMapper<'a> {
    pub fn new(profile: &'a MappingProfile) -> Self {
        PropertyMapper { profile }
    }

    /// Map every readable source field onto the writable target field with
    /// exactly the same name.
    ///
    /// Never fails. Unmatched, null and unconvertible fields are recorded in
    /// the report and leave the target field as it was.
    pub fn map_into(&self, source: &dyn Projectable, target: &mut dyn Projectable) -> MapReport {
        let writable: HashMap<String, FieldDescriptor> = target
            .fields()
            .into_iter()
            .filter(|f| f.writable)
            .map(|f| (f.name.clone(), f))
            .collect();

        let mut report = MapReport::default();

        for field in source.fields().into_iter().filter(|f| f.readable) {
            let Some(target_field) = writable.get(&field.name) else {
                tracing::trace!("`{}` has no writable counterpart", field.name);
                report.unmatched.push(field.name);
                continue;
            };

            let value = match source.get_field(&field.name) {
                Some(value) if !value.is_null() => value,
                _ => {
                    report.null_skipped.push(field.name);
                    continue;
                }
            };

            let assigned = match convert_value(&value, &target_field.ty, self.profile) {
                Conversion::Converted(converted) => target.set_field(&field.name, converted),
                Conversion::NotConvertible(Some(e)) => Err(e),
                Conversion::NotConvertible(None) => {
                    report.null_skipped.push(field.name);
                    continue;
                }
            };

            match assigned {
                Ok(()) => report.mapped.push(field.name),
                Err(reason) => {
                    tracing::debug!(
                        "skipping `{}.{}`: {}",
                        target.type_name(),
                        field.name,
                        reason
                    );
                    report.failed.push(FieldFailure {
                        field: field.name,
                        reason,
                    });
                }
            }
        }

        report
    }
}
