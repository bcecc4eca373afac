//! Session helpers for HTTP handlers.
//!
//! Wraps the Actix cookie session so handlers deal only in student ids.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, StudentId};

pub(crate) const STUDENT_ID_KEY: &str = "student_id";

/// Session wrapper exposing student-level operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start an authenticated session for `id`.
    ///
    /// The session id is renewed so a pre-login cookie cannot be replayed.
    pub fn persist_student(&self, id: &StudentId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(STUDENT_ID_KEY, id.as_ref())
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))
    }

    /// Student id held by the session, if any.
    ///
    /// A tampered or stale value is treated as no session.
    pub fn student_id(&self) -> Result<Option<StudentId>, Error> {
        let raw = self
            .0
            .get::<String>(STUDENT_ID_KEY)
            .map_err(|err| Error::internal(format!("failed to read session: {err}")))?;
        Ok(raw.and_then(|value| {
            StudentId::new(value)
                .inspect_err(|err| warn!(error = %err, "invalid student id in session cookie"))
                .ok()
        }))
    }

    /// Require an authenticated student or fail with `401`.
    pub fn require_student_id(&self) -> Result<StudentId, Error> {
        self.student_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// End the session and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}
