//! Test utilities for Loom unit tests.
//!
//! ```rust,ignore
//! use crate::test_support::{sample_user_dto, User};
//!
//! #[test]
//! fn test_example() {
//!     let user: User = Mapper::new().map(&sample_user_dto()).unwrap();
//!     assertions::assert_clean(&Mapper::new().map_into(&sample_user_dto(), &mut User::default()));
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;

/// Assertion helpers for testing.
pub mod assertions {
    use crate::core::projectable::Projectable;
    use crate::core::value::Value;
    use crate::mapping::property::MapReport;

    /// Assert that no matched field failed to convert.
    pub fn assert_clean(report: &MapReport) {
        assert!(
            report.is_clean(),
            "expected a clean mapping, got failures: {:?}",
            report.failed
        );
    }

    /// Assert that a projectable object holds `expected` in `field`.
    pub fn assert_field(object: &dyn Projectable, field: &str, expected: impl Into<Value>) {
        let expected = expected.into();
        let actual = object.get_field(field);
        assert_eq!(
            actual.as_ref(),
            Some(&expected),
            "field `{}` of {}",
            field,
            object.type_name()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::assertions::*;
    use super::*;
    use crate::mapping::Mapper;

    #[test]
    fn test_sample_user_maps_cleanly() {
        let mut user = User::default();
        let report = Mapper::new().map_into(&sample_user_dto(), &mut user);

        assert_clean(&report);
        assert_eq!(user.status, UserStatus::Active);
        assert_field(&user, "first_name", "Afiq");
    }

    #[test]
    fn test_record_and_dto_agree() {
        let mapper = Mapper::new();
        let from_dto: User = mapper.map(&sample_user_dto()).unwrap();
        let from_record: User = mapper.map(&sample_user_record()).unwrap();
        assert_eq!(from_dto, from_record);
    }
}
