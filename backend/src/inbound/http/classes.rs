//! Class group HTTP handlers.
//!
//! ```text
//! GET /api/v1/class/{department}/{branch}/{year}
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::ClassGroup;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_store_header;
use crate::inbound::http::records_dto::ClassStandingsResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ValidationCode, field_error};

/// CGPA standings of every student in a department, branch and year.
///
/// An empty group is not an error: `peerDataAvailable` is false and
/// `standings` is empty.
#[utoipa::path(
    get,
    path = "/api/v1/class/{department}/{branch}/{year}",
    params(
        ("department" = String, Path, description = "Department name"),
        ("branch" = String, Path, description = "Branch name"),
        ("year" = String, Path, description = "Year of study as entered at registration")
    ),
    responses(
        (status = 200, description = "Class standings", body = ClassStandingsResponse),
        (status = 400, description = "Invalid class group", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getClassStandings"
)]
#[get("/class/{department}/{branch}/{year}")]
pub async fn class_standings(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String, String)>,
) -> ApiResult<HttpResponse> {
    session.require_student_id()?;
    let (department, branch, year) = path.into_inner();
    let group = ClassGroup::new(department, branch, year)
        .map_err(|err| field_error("class", ValidationCode::InvalidValue, err.to_string()))?;
    let standings = state.records.class_standings(&group).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(ClassStandingsResponse::from(standings)))
}
