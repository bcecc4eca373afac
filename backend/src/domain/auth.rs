//! Authentication primitives: login credentials and registration input.
//!
//! Handlers parse raw payloads into these types before talking to a port, so
//! services only ever see validated values.

use std::collections::HashSet;

use zeroize::Zeroizing;

use super::semester::Semester;
use super::student::{
    ClassGroup, EmailAddress, RollNumber, StudentIdentity, StudentValidationError, Username,
};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is normalised the same way stored addresses are.
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use scorecard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.edu", "pw").expect("valid");
/// assert_eq!(creds.email().as_ref(), "ada@example.edu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Address used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Errors raised while validating a registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// A required field was absent or blank.
    #[error("{field} is required")]
    MissingField {
        /// Wire name of the missing field.
        field: &'static str,
    },
    /// A field was present but malformed.
    #[error("{field}: {source}")]
    InvalidField {
        /// Wire name of the offending field.
        field: &'static str,
        /// Underlying validation failure.
        source: StudentValidationError,
    },
}

impl RegistrationValidationError {
    /// Wire name of the field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::InvalidField { field, .. } => field,
        }
    }
}

/// Raw registration input as received from a client.
///
/// All identity fields are optional here so absence can be reported by
/// field name rather than as a generic parse failure.
#[derive(Debug, Default, Clone)]
pub struct RegistrationParts {
    /// Display name.
    pub name: Option<String>,
    /// Roll number.
    pub roll_no: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Branch.
    pub branch: Option<String>,
    /// Year of study as entered, e.g. "2" or "Third".
    pub year: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<Zeroizing<String>>,
    /// Username.
    pub username: Option<String>,
    /// Semesters entered at sign-up.
    pub semesters: Vec<Semester>,
}

/// Validated registration ready for hashing and storage.
#[derive(Debug, Clone)]
pub struct StudentRegistration {
    identity: StudentIdentity,
    group: ClassGroup,
    password: Zeroizing<String>,
    semesters: Vec<Semester>,
}

fn require(
    field: &'static str,
    value: Option<String>,
) -> Result<String, RegistrationValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(RegistrationValidationError::MissingField { field })
}

fn invalid(
    field: &'static str,
) -> impl FnOnce(StudentValidationError) -> RegistrationValidationError {
    move |source| RegistrationValidationError::InvalidField { field, source }
}

impl StudentRegistration {
    /// Validate raw parts, reporting the first failing field.
    pub fn try_from_parts(parts: RegistrationParts) -> Result<Self, RegistrationValidationError> {
        let RegistrationParts {
            name,
            roll_no,
            department,
            branch,
            year,
            email,
            password,
            username,
            semesters,
        } = parts;

        let name = require("name", name)?;
        let roll_no = RollNumber::new(require("rollNo", roll_no)?).map_err(invalid("rollNo"))?;
        let department = require("department", department)?;
        let branch = require("branch", branch)?;
        let year = require("year", year)?;
        let email = EmailAddress::new(require("email", email)?).map_err(invalid("email"))?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or(RegistrationValidationError::MissingField { field: "password" })?;
        let username =
            Username::new(require("username", username)?).map_err(invalid("username"))?;

        let identity =
            StudentIdentity::new(name, roll_no, email, username).map_err(invalid("name"))?;
        let group = ClassGroup::new(department, branch, year).map_err(invalid("year"))?;

        let mut seen = HashSet::new();
        if let Some(repeat) = semesters.iter().find(|s| !seen.insert(s.number())) {
            return Err(RegistrationValidationError::InvalidField {
                field: "semesters",
                source: StudentValidationError::DuplicateSemester {
                    semester: repeat.number(),
                },
            });
        }

        Ok(Self {
            identity,
            group,
            password,
            semesters,
        })
    }

    /// Identity fields.
    pub fn identity(&self) -> &StudentIdentity {
        &self.identity
    }

    /// Class group.
    pub fn group(&self) -> &ClassGroup {
        &self.group
    }

    /// Plain-text password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Split into the parts needed to build a student record.
    pub fn into_parts(self) -> (StudentIdentity, ClassGroup, Vec<Semester>) {
        (self.identity, self.group, self.semesters)
    }
}
