//! Driving ports for the account use-cases: sign-up and login.
//!
//! Inbound adapters authenticate and register through these traits without
//! importing persistence or hashing concerns.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Student, StudentId, StudentRegistration};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated student id.
    ///
    /// Unknown accounts and wrong passwords fail identically with
    /// `unauthorized`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<StudentId, Error>;
}

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a student from a validated registration.
    ///
    /// Clashing email, roll number or username fails with `conflict`.
    async fn register(&self, registration: StudentRegistration) -> Result<Student, Error>;
}
