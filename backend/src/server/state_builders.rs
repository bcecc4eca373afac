//! Builders wiring the student store and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use scorecard::domain::{AcademicRecordsService, AccountService};
use scorecard::inbound::http::state::{HttpState, HttpStatePorts};
use scorecard::outbound::persistence::InMemoryStudentRepository;
use scorecard::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Open the student store, loading the records file when one is configured.
pub(super) async fn open_student_store(
    config: &ServerConfig,
) -> std::io::Result<Arc<InMemoryStudentRepository>> {
    let repository = match &config.records_path {
        Some(path) => {
            let repository = InMemoryStudentRepository::open(path)
                .await
                .map_err(|err| std::io::Error::other(format!("loading student records: {err}")))?;
            info!(path = %path.display(), "student records loaded");
            repository
        }
        None => {
            info!("no records path configured; students are kept in memory only");
            InMemoryStudentRepository::new()
        }
    };
    Ok(Arc::new(repository))
}

/// Build HTTP state over a shared student store.
pub(super) fn build_http_state(students: Arc<InMemoryStudentRepository>) -> web::Data<HttpState> {
    let accounts = Arc::new(AccountService::new(
        Arc::clone(&students),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let records = Arc::new(AcademicRecordsService::new(students));
    web::Data::new(HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        records: records.clone(),
        records_command: records,
    }))
}
