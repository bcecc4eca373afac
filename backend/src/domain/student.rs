//! Student data model.
//!
//! A [`Student`] carries identity, class placement and semester records.
//! Identity fields are validated newtypes; `email`, `roll_no` and `username`
//! must be unique across the store, which the repository adapter enforces.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metrics;
use super::semester::Semester;

/// Maximum accepted length for a roll number.
pub const ROLL_NUMBER_MAX: usize = 32;
/// Minimum accepted length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum accepted length for a username.
pub const USERNAME_MAX: usize = 32;

/// Validation errors raised while building student records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    /// Identifier was blank.
    #[error("student id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("student id must be a valid UUID")]
    InvalidId,
    /// Display name was blank.
    #[error("name must not be empty")]
    EmptyName,
    /// Roll number was blank.
    #[error("roll number must not be empty")]
    EmptyRollNumber,
    /// Roll number exceeded the length cap.
    #[error("roll number must be at most {max} characters")]
    RollNumberTooLong {
        /// Maximum length.
        max: usize,
    },
    /// Email address failed the shape check.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Username failed the character or length check.
    #[error(
        "username must be {USERNAME_MIN}-{USERNAME_MAX} characters of letters, digits, '.', '-' or '_'"
    )]
    InvalidUsername,
    /// Department was blank.
    #[error("department must not be empty")]
    EmptyDepartment,
    /// Branch was blank.
    #[error("branch must not be empty")]
    EmptyBranch,
    /// Year of study was blank.
    #[error("year must not be empty")]
    EmptyYear,
    /// The student already has a record for this semester.
    #[error("semester {semester} is already recorded")]
    DuplicateSemester {
        /// Semester number that clashed.
        semester: u32,
    },
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Stable student identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(Uuid, String);

impl StudentId {
    /// Validate and construct a [`StudentId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, StudentValidationError> {
        if id.is_empty() {
            return Err(StudentValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| StudentValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<StudentId> for String {
    fn from(value: StudentId) -> Self {
        value.1
    }
}

impl TryFrom<String> for StudentId {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Generates a validated string newtype with the common accessors.
macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident, $validate:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Validate and construct a [`", stringify!($name), "`].")]
            pub fn new(value: impl Into<String>) -> Result<Self, StudentValidationError> {
                let validate: fn(String) -> Result<String, StudentValidationError> = $validate;
                validate(value.into()).map(Self)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }
    };
}

string_newtype!(
    /// Email address, trimmed and lower-cased so lookups are case-insensitive.
    EmailAddress,
    |raw| {
        let normalised = raw.trim().to_lowercase();
        if email_regex().is_match(&normalised) {
            Ok(normalised)
        } else {
            Err(StudentValidationError::InvalidEmail)
        }
    }
);

string_newtype!(
    /// Institution roll number.
    RollNumber,
    |raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::EmptyRollNumber);
        }
        if trimmed.chars().count() > ROLL_NUMBER_MAX {
            return Err(StudentValidationError::RollNumberTooLong {
                max: ROLL_NUMBER_MAX,
            });
        }
        Ok(trimmed.to_owned())
    }
);

string_newtype!(
    /// Login handle chosen at registration.
    Username,
    |raw| {
        let length = raw.chars().count();
        if (USERNAME_MIN..=USERNAME_MAX).contains(&length) && username_regex().is_match(&raw) {
            Ok(raw)
        } else {
            Err(StudentValidationError::InvalidUsername)
        }
    }
);

/// Who a student is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentIdentity {
    /// Display name.
    pub name: String,
    /// Unique roll number.
    pub roll_no: RollNumber,
    /// Unique email address.
    pub email: EmailAddress,
    /// Unique username.
    pub username: Username,
}

impl StudentIdentity {
    /// Build an identity, rejecting a blank name.
    pub fn new(
        name: impl Into<String>,
        roll_no: RollNumber,
        email: EmailAddress,
        username: Username,
    ) -> Result<Self, StudentValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        Ok(Self {
            name,
            roll_no,
            email,
            username,
        })
    }
}

/// Department, branch and year of study: the key of a peer group.
///
/// Two students are classmates exactly when their groups compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassGroup {
    department: String,
    branch: String,
    year: String,
}

impl ClassGroup {
    /// Build a class group from trimmed, non-empty parts.
    ///
    /// The year is free text ("2", "Third") and compared verbatim after
    /// trimming.
    ///
    /// # Examples
    /// ```
    /// use scorecard::domain::ClassGroup;
    ///
    /// let group = ClassGroup::new("Engineering", "CSE", " 2 ").expect("valid group");
    /// assert_eq!(group.branch(), "CSE");
    /// assert_eq!(group.year(), "2");
    /// ```
    pub fn new(
        department: impl Into<String>,
        branch: impl Into<String>,
        year: impl Into<String>,
    ) -> Result<Self, StudentValidationError> {
        let department = department.into().trim().to_owned();
        let branch = branch.into().trim().to_owned();
        let year = year.into().trim().to_owned();
        if department.is_empty() {
            return Err(StudentValidationError::EmptyDepartment);
        }
        if branch.is_empty() {
            return Err(StudentValidationError::EmptyBranch);
        }
        if year.is_empty() {
            return Err(StudentValidationError::EmptyYear);
        }
        Ok(Self {
            department,
            branch,
            year,
        })
    }

    /// Department name.
    pub fn department(&self) -> &str {
        self.department.as_str()
    }

    /// Branch within the department.
    pub fn branch(&self) -> &str {
        self.branch.as_str()
    }

    /// Year of study.
    pub fn year(&self) -> &str {
        self.year.as_str()
    }
}

impl fmt::Display for ClassGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.department, self.branch, self.year)
    }
}

/// Year of study as it arrives on the wire: free text, or a bare number
/// from records written before the year became text.
#[derive(Deserialize)]
#[serde(untagged)]
enum YearInput {
    Text(String),
    Number(u64),
}

impl From<YearInput> for String {
    fn from(value: YearInput) -> Self {
        match value {
            YearInput::Text(text) => text,
            YearInput::Number(number) => number.to_string(),
        }
    }
}

/// Deserialise a required year of study, accepting `"Third"`, `"2"` or `2`.
///
/// # Errors
/// Fails when the value is neither a string nor a non-negative integer.
pub fn year_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    YearInput::deserialize(deserializer).map(String::from)
}

/// Optional counterpart of [`year_text`]; `null` becomes `None`.
///
/// # Errors
/// Fails when a present value is neither a string nor a non-negative
/// integer.
pub fn optional_year_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<YearInput>::deserialize(deserializer).map(|year| year.map(String::from))
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an encoded hash produced by a password hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// A registered student and their academic record.
///
/// ## Invariants
/// - At most one [`Semester`] per semester number.
/// - `stored_cgpa` is a cached copy; read paths derive CGPA from the
///   semesters instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: StudentId,
    identity: StudentIdentity,
    group: ClassGroup,
    semesters: Vec<Semester>,
    stored_cgpa: Option<f64>,
    password: PasswordDigest,
}

impl Student {
    /// Create a student with no semesters recorded yet.
    pub fn new(
        id: StudentId,
        identity: StudentIdentity,
        group: ClassGroup,
        password: PasswordDigest,
    ) -> Self {
        Self {
            id,
            identity,
            group,
            semesters: Vec::new(),
            stored_cgpa: None,
            password,
        }
    }

    /// Attach initial semesters, rejecting repeated semester numbers.
    pub fn with_semesters(
        mut self,
        semesters: impl IntoIterator<Item = Semester>,
    ) -> Result<Self, StudentValidationError> {
        for semester in semesters {
            self.push_semester(semester)?;
        }
        Ok(self)
    }

    /// Restore the cached CGPA read from storage.
    #[must_use]
    pub fn with_stored_cgpa(mut self, stored_cgpa: Option<f64>) -> Self {
        self.stored_cgpa = stored_cgpa;
        self
    }

    /// Append a semester and refresh the cached CGPA.
    pub fn append_semester(&mut self, semester: Semester) -> Result<(), StudentValidationError> {
        self.push_semester(semester)?;
        self.refresh_stored_cgpa();
        Ok(())
    }

    /// Recompute the cached CGPA from the recorded semesters.
    pub fn refresh_stored_cgpa(&mut self) {
        self.stored_cgpa = Some(metrics::cgpa(self));
    }

    fn push_semester(&mut self, semester: Semester) -> Result<(), StudentValidationError> {
        if self.has_semester(semester.number()) {
            return Err(StudentValidationError::DuplicateSemester {
                semester: semester.number(),
            });
        }
        self.semesters.push(semester);
        Ok(())
    }

    /// Whether a record for `number` already exists.
    pub fn has_semester(&self, number: u32) -> bool {
        self.semesters.iter().any(|s| s.number() == number)
    }

    /// Stable identifier.
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    /// Identity fields.
    pub fn identity(&self) -> &StudentIdentity {
        &self.identity
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.identity.name.as_str()
    }

    /// Roll number.
    pub fn roll_no(&self) -> &RollNumber {
        &self.identity.roll_no
    }

    /// Email address.
    pub fn email(&self) -> &EmailAddress {
        &self.identity.email
    }

    /// Username.
    pub fn username(&self) -> &Username {
        &self.identity.username
    }

    /// Peer group key.
    pub fn group(&self) -> &ClassGroup {
        &self.group
    }

    /// Recorded semesters in entry order.
    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    /// Cached CGPA as last written to storage.
    pub fn stored_cgpa(&self) -> Option<f64> {
        self.stored_cgpa
    }

    /// Password hash.
    pub fn password(&self) -> &PasswordDigest {
        &self.password
    }
}
