//! Driving ports for reading and extending academic records.
//!
//! Reads fetch raw records and derive every metric on the way out; nothing
//! returned here was read from a cached aggregate.

use async_trait::async_trait;

use crate::domain::metrics::{AcademicSummary, PeerStanding};
use crate::domain::{ClassGroup, EmailAddress, Error, Semester, Student, StudentId};

/// A student together with their derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport {
    /// The stored record.
    pub student: Student,
    /// Per-semester GPA and CGPA.
    pub summary: AcademicSummary,
}

impl StudentReport {
    /// Derive the report for `student`.
    #[must_use]
    pub fn for_student(student: Student) -> Self {
        let summary = AcademicSummary::for_student(&student);
        Self { student, summary }
    }
}

/// Standings for one class group.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStandings {
    /// Group the standings describe.
    pub group: ClassGroup,
    /// One row per classmate in store order.
    pub standings: Vec<PeerStanding>,
    /// `false` when nobody is enrolled in the group.
    pub peer_data_available: bool,
}

/// Domain use-case port for academic record reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AcademicRecordsQuery: Send + Sync {
    /// Report for the student with `email`; `not_found` when absent.
    async fn student_report(&self, email: &EmailAddress) -> Result<StudentReport, Error>;

    /// Report for the student with `id`; `not_found` when absent.
    async fn student_report_by_id(&self, id: &StudentId) -> Result<StudentReport, Error>;

    /// Standings of every student in `group`.
    async fn class_standings(&self, group: &ClassGroup) -> Result<ClassStandings, Error>;

    /// Standings of the class the student with `email` belongs to.
    async fn classmates_of(&self, email: &EmailAddress) -> Result<ClassStandings, Error>;
}

/// Domain use-case port for recording marks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AcademicRecordsCommand: Send + Sync {
    /// Append a semester to the student's record and return the refreshed
    /// report. A repeated semester number fails with `conflict`.
    async fn record_semester(
        &self,
        id: &StudentId,
        semester: Semester,
    ) -> Result<StudentReport, Error>;
}
