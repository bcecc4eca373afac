//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AcademicRecordsCommand, AcademicRecordsQuery, LoginService, RegistrationService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub records: Arc<dyn AcademicRecordsQuery>,
    pub records_command: Arc<dyn AcademicRecordsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub records: Arc<dyn AcademicRecordsQuery>,
    pub records_command: Arc<dyn AcademicRecordsCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use scorecard::domain::{AccountService, AcademicRecordsService};
    /// use scorecard::inbound::http::state::{HttpState, HttpStatePorts};
    /// use scorecard::outbound::persistence::InMemoryStudentRepository;
    /// use scorecard::outbound::security::Argon2PasswordHasher;
    ///
    /// let repo = Arc::new(InMemoryStudentRepository::new());
    /// let accounts = Arc::new(AccountService::new(
    ///     Arc::clone(&repo),
    ///     Arc::new(Argon2PasswordHasher::default()),
    /// ));
    /// let records = Arc::new(AcademicRecordsService::new(repo));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts,
    ///     records: records.clone(),
    ///     records_command: records,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            records,
            records_command,
        } = ports;
        Self {
            login,
            registration,
            records,
            records_command,
        }
    }
}
