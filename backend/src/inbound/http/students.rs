//! Student record HTTP handlers.
//!
//! ```text
//! GET  /api/v1/students/me
//! POST /api/v1/students/me/semesters {"semester":2,"subjects":[...]}
//! GET  /api/v1/students/email/{email}
//! GET  /api/v1/students/email/{email}/classmates
//! ```
//!
//! All routes require a session. Lookups by email are open to any signed-in
//! student, matching the class comparison view.

use actix_web::{HttpResponse, get, post, web};
use tracing::debug;

use crate::domain::Semester;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_store_header;
use crate::inbound::http::records_dto::{ClassStandingsResponse, StudentProfileResponse};
use crate::inbound::http::schemas::{ErrorSchema, SemesterSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_email;

/// Fetch the signed-in student's profile and academic summary.
#[utoipa::path(
    get,
    path = "/api/v1/students/me",
    responses(
        (status = 200, description = "Own profile", body = StudentProfileResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Student no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getOwnProfile"
)]
#[get("/students/me")]
pub async fn current_student(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let id = session.require_student_id()?;
    let report = state.records.student_report_by_id(&id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(StudentProfileResponse::from(report)))
}

/// Append a semester to the signed-in student's record.
#[utoipa::path(
    post,
    path = "/api/v1/students/me/semesters",
    request_body = SemesterSchema,
    responses(
        (status = 201, description = "Semester recorded", body = StudentProfileResponse),
        (status = 400, description = "Invalid semester or marks", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Semester already recorded", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "recordSemester"
)]
#[post("/students/me/semesters")]
pub async fn record_semester(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Semester>,
) -> ApiResult<HttpResponse> {
    let id = session.require_student_id()?;
    let report = state
        .records_command
        .record_semester(&id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_store_header())
        .json(StudentProfileResponse::from(report)))
}

/// Fetch a student's profile and academic summary by email.
#[utoipa::path(
    get,
    path = "/api/v1/students/email/{email}",
    params(("email" = String, Path, description = "Student email address")),
    responses(
        (status = 200, description = "Student profile", body = StudentProfileResponse),
        (status = 400, description = "Malformed email", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudentByEmail"
)]
#[get("/students/email/{email}")]
pub async fn student_by_email(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_student_id()?;
    let email = parse_email(&path.into_inner())?;
    let report = state.records.student_report(&email).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(StudentProfileResponse::from(report)))
}

/// Compare a student with every member of their class group.
///
/// The student appears in their own standings.
#[utoipa::path(
    get,
    path = "/api/v1/students/email/{email}/classmates",
    params(("email" = String, Path, description = "Student email address")),
    responses(
        (status = 200, description = "Class standings", body = ClassStandingsResponse),
        (status = 400, description = "Malformed email", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getClassmates"
)]
#[get("/students/email/{email}/classmates")]
pub async fn classmates(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_student_id()?;
    let email = parse_email(&path.into_inner())?;
    let standings = state.records.classmates_of(&email).await?;
    debug!(peers = standings.standings.len(), "classmates resolved");
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(ClassStandingsResponse::from(standings)))
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
