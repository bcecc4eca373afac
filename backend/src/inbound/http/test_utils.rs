//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    MockAcademicRecordsCommand, MockAcademicRecordsQuery, MockLoginService,
    MockRegistrationService,
};
use crate::domain::{
    ClassGroup, EmailAddress, PasswordDigest, RollNumber, Semester, Student, StudentId,
    StudentIdentity, Subject, Username,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Cookie name used by the test session middleware.
pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
///
/// # Panics
/// Panics when the response carries no session cookie.
pub fn session_cookie<B: MessageBody>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("response sets a session cookie")
}

/// Mock implementations of every port held by [`HttpState`].
///
/// Unset mocks have no expectations, so any unexpected call fails the test.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub records: MockAcademicRecordsQuery,
    pub records_command: MockAcademicRecordsCommand,
}

impl MockPorts {
    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            records: Arc::new(self.records),
            records_command: Arc::new(self.records_command),
        })
    }
}

/// Fixed id used by [`fixture_student`].
pub const FIXTURE_STUDENT_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// A student in Engineering/CSE year 2 with semesters of the given marks.
pub fn fixture_student(semesters: &[&[Option<f64>]]) -> Student {
    let identity = StudentIdentity::new(
        "Ada Lovelace",
        RollNumber::new("CS-042").expect("roll"),
        EmailAddress::new("ada@example.edu").expect("email"),
        Username::new("ada").expect("username"),
    )
    .expect("identity");
    let semesters = semesters.iter().zip(1_u32..).map(|(marks, number)| {
        let subjects = marks
            .iter()
            .enumerate()
            .map(|(i, m)| Subject::new(format!("Subject {i}"), *m).expect("subject"))
            .collect();
        Semester::new(number, subjects).expect("semester")
    });
    Student::new(
        StudentId::new(FIXTURE_STUDENT_ID).expect("fixture id"),
        identity,
        ClassGroup::new("Engineering", "CSE", "2").expect("group"),
        PasswordDigest::new("digest"),
    )
    .with_semesters(semesters)
    .expect("distinct semesters")
}
