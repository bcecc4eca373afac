//! Semester and subject records.
//!
//! Marks are optional: a subject whose marks were never entered is still a
//! subject and counts towards averages as zero. Input parsing is lenient so
//! blank form fields and numeric strings land as absent or parsed marks
//! respectively, while present marks outside `[0, 100]` are rejected.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Lowest mark a subject can record.
pub const MARKS_MIN: f64 = 0.0;
/// Highest mark a subject can record.
pub const MARKS_MAX: f64 = 100.0;

/// Validation errors raised while building semester records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SemesterValidationError {
    /// Subject name was missing or blank.
    #[error("subject name must not be empty")]
    EmptySubjectName,
    /// Semester numbers start at one.
    #[error("semester number must be at least 1")]
    SemesterNumberTooLow,
    /// Marks fell outside the accepted range.
    #[error("marks for {subject} must be between 0 and 100, got {marks}")]
    MarksOutOfRange {
        /// Subject the offending marks belong to.
        subject: String,
        /// Rejected value.
        marks: f64,
    },
}

/// Marks recorded for one subject, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Marks(f64);

impl Marks {
    /// Validate a raw mark.
    ///
    /// # Examples
    /// ```
    /// use scorecard::domain::Marks;
    ///
    /// assert!(Marks::new(87.5).is_some());
    /// assert!(Marks::new(101.0).is_none());
    /// ```
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && (MARKS_MIN..=MARKS_MAX).contains(&value)).then_some(Self(value))
    }

    /// Raw numeric value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// A named subject with optional marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SubjectDto")]
pub struct Subject {
    name: String,
    marks: Option<Marks>,
}

impl Subject {
    /// Build a subject from a trimmed, non-empty name, rejecting present
    /// marks outside the accepted range.
    pub fn new(
        name: impl Into<String>,
        marks: Option<f64>,
    ) -> Result<Self, SemesterValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(SemesterValidationError::EmptySubjectName);
        }
        let marks = match marks {
            None => None,
            Some(raw) => Some(Marks::new(raw).ok_or_else(|| {
                SemesterValidationError::MarksOutOfRange {
                    subject: name.clone(),
                    marks: raw,
                }
            })?),
        };
        Ok(Self { name, marks })
    }

    /// Subject name as entered.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Recorded marks, if any.
    pub fn marks(&self) -> Option<Marks> {
        self.marks
    }

    /// Marks used in averages: absent marks count as zero.
    pub fn effective_marks(&self) -> f64 {
        self.marks.map_or(MARKS_MIN, Marks::value)
    }
}

#[derive(Deserialize)]
struct SubjectDto {
    name: String,
    #[serde(default, deserialize_with = "lenient_marks")]
    marks: Option<f64>,
}

impl TryFrom<SubjectDto> for Subject {
    type Error = SemesterValidationError;

    fn try_from(value: SubjectDto) -> Result<Self, Self::Error> {
        Self::new(value.name, value.marks)
    }
}

/// Accepts numbers and numeric strings; anything else becomes `None`.
fn lenient_marks<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let parsed = match raw {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|value| value.is_finite()))
}

/// Subjects recorded for one semester.
///
/// ## Invariants
/// - `number` is at least 1.
/// - Subject order is preserved as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SemesterDto")]
pub struct Semester {
    #[serde(rename = "semester")]
    number: u32,
    subjects: Vec<Subject>,
}

impl Semester {
    /// Build a semester record.
    ///
    /// # Examples
    /// ```
    /// use scorecard::domain::{Semester, Subject};
    ///
    /// let maths = Subject::new("Maths", Some(90.0)).expect("valid marks");
    /// let semester = Semester::new(1, vec![maths]).expect("valid semester");
    /// assert_eq!(semester.number(), 1);
    /// ```
    pub fn new(number: u32, subjects: Vec<Subject>) -> Result<Self, SemesterValidationError> {
        if number == 0 {
            return Err(SemesterValidationError::SemesterNumberTooLow);
        }
        Ok(Self { number, subjects })
    }

    /// Semester number, starting at 1.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Subjects in entry order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "semester {}", self.number)
    }
}

#[derive(Deserialize)]
struct SemesterDto {
    semester: u32,
    #[serde(default)]
    subjects: Vec<Subject>,
}

impl TryFrom<SemesterDto> for Semester {
    type Error = SemesterValidationError;

    fn try_from(value: SemesterDto) -> Result<Self, Self::Error> {
        Self::new(value.semester, value.subjects)
    }
}
