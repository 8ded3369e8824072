//! User data model: engineers and managers share one account type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty or not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The display name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The e-mail address was blank or structurally invalid.
    #[error("email must contain a local part and a domain")]
    InvalidEmail,
    /// The role label was not `engineer` or `manager`.
    #[error("role must be engineer or manager")]
    InvalidRole,
    /// The seniority label was not `junior`, `mid`, or `senior`.
    #[error("seniority must be junior, mid, or senior")]
    InvalidSeniority,
    /// The maximum capacity fell outside the allowed percentage range.
    #[error("max capacity must be between {min} and {max}")]
    CapacityOutOfRange {
        /// Lowest accepted percentage.
        min: i32,
        /// Highest accepted percentage.
        max: i32,
    },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role used by the authorization guard ahead of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Can view projects and assignments and edit their own profile.
    Engineer,
    /// Can additionally create projects and manage assignments.
    Manager,
}

impl Role {
    /// Stable lowercase label, as persisted and serialised.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineer => "engineer",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "engineer" => Ok(Self::Engineer),
            "manager" => Ok(Self::Manager),
            _ => Err(UserValidationError::InvalidRole),
        }
    }
}

/// Engineer seniority band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    /// Early-career engineer.
    Junior,
    /// Mid-level engineer.
    Mid,
    /// Senior engineer.
    Senior,
}

impl Seniority {
    /// Stable lowercase label, as persisted and serialised.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Seniority {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(Self::Junior),
            "mid" => Ok(Self::Mid),
            "senior" => Ok(Self::Senior),
            _ => Err(UserValidationError::InvalidSeniority),
        }
    }
}

/// Validated e-mail address used as the login subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an address from raw input.
    ///
    /// Trims surrounding whitespace; the remainder must contain a non-empty
    /// local part and domain around a single-character `@` check. Full RFC
    /// validation is left to the mail system.
    pub fn new(address: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = address.as_ref().trim();
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lowest accepted capacity percentage.
pub const MAX_CAPACITY_MIN: i32 = 0;
/// Highest accepted capacity percentage.
pub const MAX_CAPACITY_MAX: i32 = 100;

/// An engineer's total assignable percentage.
///
/// Conventionally 100 for full-time and 50 for part-time staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct MaxCapacity(i32);

impl MaxCapacity {
    /// Validate and construct a capacity percentage.
    pub fn new(value: i32) -> Result<Self, UserValidationError> {
        if (MAX_CAPACITY_MIN..=MAX_CAPACITY_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(UserValidationError::CapacityOutOfRange {
                min: MAX_CAPACITY_MIN,
                max: MAX_CAPACITY_MAX,
            })
        }
    }

    /// Full-time capacity.
    #[must_use]
    pub fn full_time() -> Self {
        Self(MAX_CAPACITY_MAX)
    }

    /// Underlying percentage.
    #[must_use]
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl From<MaxCapacity> for i32 {
    fn from(value: MaxCapacity) -> Self {
        value.0
    }
}

impl TryFrom<i32> for MaxCapacity {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Input payload for [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Stable identifier.
    pub id: UserId,
    /// Display name; must not be blank.
    pub name: String,
    /// Login subject.
    pub email: EmailAddress,
    /// Account role.
    pub role: Role,
    /// Skill labels, advisory only.
    pub skills: Vec<String>,
    /// Seniority band; absent for managers.
    pub seniority: Option<Seniority>,
    /// Total assignable percentage.
    pub max_capacity: MaxCapacity,
    /// Free-text department label.
    pub department: String,
}

/// Application user.
///
/// Engineers carry profile fields consumed by the capacity core
/// (`max_capacity`) and by advisory UI filtering (`skills`, `seniority`,
/// `department`). Managers reuse the same account type with the `Manager`
/// role.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    role: Role,
    skills: Vec<String>,
    seniority: Option<Seniority>,
    max_capacity: MaxCapacity,
    department: String,
}

impl User {
    /// Creates a validated user.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        Self::try_from(draft)
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login subject.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Account role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Skill labels in submission order.
    #[must_use]
    pub fn skills(&self) -> &[String] {
        self.skills.as_slice()
    }

    /// Seniority band, when recorded.
    #[must_use]
    pub fn seniority(&self) -> Option<Seniority> {
        self.seniority
    }

    /// Total assignable percentage.
    #[must_use]
    pub fn max_capacity(&self) -> MaxCapacity {
        self.max_capacity
    }

    /// Free-text department label.
    #[must_use]
    pub fn department(&self) -> &str {
        self.department.as_str()
    }
}

impl TryFrom<UserDraft> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDraft) -> Result<Self, Self::Error> {
        if value.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        Ok(Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            skills: value.skills,
            seniority: value.seniority,
            max_capacity: value.max_capacity,
            department: value.department,
        })
    }
}

/// Self-service profile changes applied to an engineer record.
///
/// `email` and `role` are immutable through this path; credential and role
/// changes are an administrative concern.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineerProfileUpdate {
    /// Replacement display name.
    pub name: String,
    /// Replacement skill labels.
    pub skills: Vec<String>,
    /// Replacement seniority band.
    pub seniority: Option<Seniority>,
    /// Replacement assignable percentage.
    pub max_capacity: MaxCapacity,
    /// Replacement department label.
    pub department: String,
}

impl EngineerProfileUpdate {
    /// Validate the update payload.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(())
    }
}
