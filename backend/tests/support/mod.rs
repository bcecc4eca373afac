//! Shared app wiring for integration tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use scorecard::Trace;
use scorecard::domain::{AcademicRecordsService, AccountService};
use scorecard::inbound::http::auth::{login, logout, register};
use scorecard::inbound::http::classes::class_standings;
use scorecard::inbound::http::error::{json_error_handler, path_error_handler};
use scorecard::inbound::http::state::{HttpState, HttpStatePorts};
use scorecard::inbound::http::students::{
    classmates, current_student, record_semester, student_by_email,
};
use scorecard::outbound::persistence::InMemoryStudentRepository;
use scorecard::outbound::security::Argon2PasswordHasher;

/// Wire real services over `students`, the way the server binary does.
pub fn app(
    students: Arc<InMemoryStudentRepository>,
    key: Key,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let accounts = Arc::new(AccountService::new(
        Arc::clone(&students),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let records = Arc::new(AcademicRecordsService::new(students));
    let state = HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        records: records.clone(),
        records_command: records,
    });
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .service(register)
                .service(login)
                .service(logout)
                .service(current_student)
                .service(record_semester)
                .service(classmates)
                .service(student_by_email)
                .service(class_standings),
        )
}

/// Registration payload for a student in Engineering/CSE year 2.
pub fn registration(roll: &str, email: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "name": format!("Student {roll}"),
        "rollNo": roll,
        "department": "Engineering",
        "branch": "CSE",
        "year": "2",
        "email": email,
        "password": "correct horse battery staple",
        "username": username,
    })
}

/// Session cookie set by `response`.
pub fn session_cookie<B: MessageBody>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
