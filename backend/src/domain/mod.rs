//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed student records and the pure metrics that
//! derive GPA, CGPA and class standings from them. Types validate on
//! construction and document their invariants in Rustdoc; serialisation to
//! the wire and to storage lives in the adapters.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Student, Semester, Subject: the academic record.
//! - metrics: semester GPA, CGPA and peer standings.
//! - AccountService, AcademicRecordsService: driving port implementations.

mod academic_records_service;
mod account_service;
pub mod auth;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod semester;
pub mod student;
mod trace_id;

pub use self::academic_records_service::AcademicRecordsService;
pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, RegistrationParts, RegistrationValidationError,
    StudentRegistration,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::metrics::{AcademicSummary, PeerStanding, SemesterGpa};
pub use self::semester::{Marks, Semester, SemesterValidationError, Subject};
pub use self::student::{
    ClassGroup, EmailAddress, PasswordDigest, RollNumber, Student, StudentId, StudentIdentity,
    StudentValidationError, Username, optional_year_text, year_text,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use scorecard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
