//! Test fixtures for common mapping scenarios.
//!
//! Provides small projectable types and pre-built sources shared by the
//! unit tests.

use chrono::NaiveDateTime;

use crate::core::record::Record;
use crate::{projectable, projectable_enum};

projectable_enum! {
    /// Account state used by the user fixtures.
    pub enum UserStatus {
        Inactive = 0,
        Active = 1,
        Suspended = 2,
    }
}

/// Minimal two-field target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i32,
}

projectable!(Person { name, age });

/// Target with a read-only identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub id: u64,
    pub display_name: String,
    pub score: Option<i32>,
}

projectable!(Profile { display_name, score } readonly { id });

/// Loosely typed inbound user, as it arrives from a form or API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub status: Option<String>,
    pub roles: Option<Vec<String>>,
}

projectable!(UserDto {
    first_name,
    last_name,
    birth_date,
    status,
    roles,
});

/// Strongly typed user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDateTime,
    pub status: UserStatus,
    pub roles: Vec<String>,
}

projectable!(User {
    first_name,
    last_name,
    birth_date,
    status,
    roles,
});

/// A fully populated inbound user.
pub fn sample_user_dto() -> UserDto {
    UserDto {
        first_name: Some("Afiq".to_string()),
        last_name: Some("Rahman".to_string()),
        birth_date: Some("1995-12-10".to_string()),
        status: Some("active".to_string()),
        roles: Some(vec!["Admin".to_string(), "Editor".to_string()]),
    }
}

/// The same user as an anonymous record.
pub fn sample_user_record() -> Record {
    Record::anonymous()
        .with("first_name", "Afiq")
        .with("last_name", "Rahman")
        .with("birth_date", "1995-12-10")
        .with("status", "active")
        .with("roles", vec!["Admin", "Editor"])
}
