//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod academic_records_query;
mod login_service;
mod password_hasher;
mod student_repository;

#[cfg(test)]
pub use academic_records_query::{MockAcademicRecordsCommand, MockAcademicRecordsQuery};
pub use academic_records_query::{
    AcademicRecordsCommand, AcademicRecordsQuery, ClassStandings, StudentReport,
};
#[cfg(test)]
pub use login_service::{MockLoginService, MockRegistrationService};
pub use login_service::{LoginService, RegistrationService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentPersistenceError, StudentRepository};
