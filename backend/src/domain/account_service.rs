//! Account domain service: registration and login.
//!
//! Password hashing is CPU bound, so both use-cases hop onto the blocking
//! pool before touching the hasher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, StudentRepository,
};
use crate::domain::{
    Error, LoginCredentials, PasswordDigest, Student, StudentId, StudentRegistration,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Account service implementing the login and registration ports.
#[derive(Clone)]
pub struct AccountService<R, H> {
    students: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new service over a student store and password hasher.
    pub fn new(students: Arc<R>, hasher: Arc<H>) -> Self {
        Self { students, hasher }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

impl<R, H> AccountService<R, H>
where
    H: PasswordHasher + 'static,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordDigest, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }

    async fn verify_password(&self, password: &str, digest: PasswordDigest) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &digest))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(map_hash_error)
    }
}

#[async_trait]
impl<R, H> RegistrationService for AccountService<R, H>
where
    R: StudentRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: StudentRegistration) -> Result<Student, Error> {
        let digest = self.hash_password(registration.password()).await?;
        let (identity, group, semesters) = registration.into_parts();
        let mut student = Student::new(StudentId::random(), identity, group, digest)
            .with_semesters(semesters)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        student.refresh_stored_cgpa();

        self.students.insert(&student).await?;
        info!(student_id = %student.id(), group = %student.group(), "student registered");
        Ok(student)
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: StudentRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<StudentId, Error> {
        let Some(student) = self
            .students
            .find_by_email(credentials.email())
            .await?
        else {
            warn!("login attempt for unknown account");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .verify_password(credentials.password(), student.password().clone())
            .await?;
        if !matches {
            warn!(student_id = %student.id(), "login attempt with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(student.id().clone())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
