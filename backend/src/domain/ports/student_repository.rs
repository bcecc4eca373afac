//! Port abstraction for student record storage and its errors.
//!
//! Adapters must enforce uniqueness of email, roll number and username
//! atomically with the insert: two concurrent registrations for the same
//! email must never both succeed.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{ClassGroup, EmailAddress, Error, Semester, Student, StudentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentPersistenceError {
        /// Backing store could not be reached.
        Connection { message: String } => "student store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } => "student store query failed: {message}",
        /// A unique field already belongs to another student.
        Duplicate { field: String } => "a student with this {field} already exists",
        /// The student already has a record for this semester.
        DuplicateSemester { semester: u32 } => "semester {semester} is already recorded",
        /// The addressed student does not exist.
        NotFound { id: String } => "student {id} not found",
    }
}

/// Storage for [`Student`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a new student.
    ///
    /// Fails with [`StudentPersistenceError::Duplicate`] naming the first
    /// clashing field (`email`, `rollNo` or `username`).
    async fn insert(&self, student: &Student) -> Result<(), StudentPersistenceError>;

    /// Fetch a student by identifier.
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError>;

    /// Fetch a student by email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Student>, StudentPersistenceError>;

    /// Every student in the class group, in insertion order.
    async fn find_by_group(&self, group: &ClassGroup)
    -> Result<Vec<Student>, StudentPersistenceError>;

    /// Append a semester to an existing student and return the updated
    /// record.
    async fn append_semester(
        &self,
        id: &StudentId,
        semester: &Semester,
    ) -> Result<Student, StudentPersistenceError>;
}

impl From<StudentPersistenceError> for Error {
    fn from(error: StudentPersistenceError) -> Self {
        match error {
            StudentPersistenceError::Connection { message } => {
                Self::service_unavailable(format!("student store unavailable: {message}"))
            }
            StudentPersistenceError::Query { message } => {
                Self::internal(format!("student store error: {message}"))
            }
            StudentPersistenceError::Duplicate { field } => {
                Self::conflict(format!("a student with this {field} already exists"))
                    .with_details(json!({ "field": field }))
            }
            StudentPersistenceError::DuplicateSemester { semester } => {
                Self::conflict(format!("semester {semester} is already recorded"))
                    .with_details(json!({ "field": "semester", "semester": semester }))
            }
            StudentPersistenceError::NotFound { .. } => Self::not_found("student not found"),
        }
    }
}
