//! Account HTTP handlers.
//!
//! ```text
//! POST /api/v1/auth/register {"name":"Ada","rollNo":"CS-042",...}
//! POST /api/v1/auth/login {"email":"ada@example.edu","password":"..."}
//! POST /api/v1/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::StudentReport;
use crate::domain::{
    LoginCredentials, RegistrationParts, Semester, StudentRegistration, optional_year_text,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_store_header;
use crate::inbound::http::records_dto::StudentProfileResponse;
use crate::inbound::http::schemas::{ErrorSchema, SemesterSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_login_error, map_registration_error};

/// Registration request body for `POST /api/v1/auth/register`.
///
/// Every identity field is optional at the wire level so a missing field is
/// reported by name instead of as a parse failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "CS-042")]
    pub roll_no: Option<String>,
    #[schema(example = "Engineering")]
    pub department: Option<String>,
    #[schema(example = "CSE")]
    pub branch: Option<String>,
    /// Free text such as "2" or "Third"; bare numbers are accepted too.
    #[serde(default, deserialize_with = "optional_year_text")]
    #[schema(example = "2")]
    pub year: Option<String>,
    #[schema(example = "ada@example.edu")]
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[serde(default)]
    #[schema(value_type = Vec<SemesterSchema>)]
    pub semesters: Vec<Semester>,
}

impl From<RegisterRequest> for RegistrationParts {
    fn from(value: RegisterRequest) -> Self {
        Self {
            name: value.name,
            roll_no: value.roll_no,
            department: value.department,
            branch: value.branch,
            year: value.year,
            email: value.email,
            password: value.password.map(Zeroizing::new),
            username: value.username,
            semesters: value.semesters,
        }
    }
}

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.edu")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = crate::domain::LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Create a student account and start a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (
            status = 201,
            description = "Student registered",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = StudentProfileResponse
        ),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 409, description = "Email, roll number or username taken", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        StudentRegistration::try_from_parts(RegistrationParts::from(payload.into_inner()))
            .map_err(map_registration_error)?;
    let student = state.registration.register(registration).await?;
    session.persist_student(student.id())?;
    info!(student_id = %student.id(), "session started after registration");
    Ok(HttpResponse::Created()
        .insert_header(private_no_store_header())
        .json(StudentProfileResponse::from(StudentReport::for_student(
            student,
        ))))
}

/// Authenticate by email and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_error)?;
    let student_id = state.login.authenticate(&credentials).await?;
    session.persist_student(&student_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session. Succeeds whether or not one exists.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
