//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers for domain
//! types (kept in the inbound adapter so the domain stays framework-free) and
//! the session cookie security scheme. Swagger UI serves it in debug builds
//! and `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::records_dto::{
    ClassStandingsResponse, SemesterReportResponse, StandingResponse, StudentProfileResponse,
    SubjectMarksResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, SemesterSchema, SubjectSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login or /api/v1/auth/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Scorecard API",
        description = "Student registration, academic records, GPA/CGPA summaries and class standings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::students::current_student,
        crate::inbound::http::students::record_semester,
        crate::inbound::http::students::student_by_email,
        crate::inbound::http::students::classmates,
        crate::inbound::http::classes::class_standings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        SemesterSchema,
        SubjectSchema,
        RegisterRequest,
        LoginRequest,
        StudentProfileResponse,
        SemesterReportResponse,
        SubjectMarksResponse,
        ClassStandingsResponse,
        StandingResponse
    )),
    tags(
        (name = "auth", description = "Registration and session management"),
        (name = "students", description = "Academic records and class comparison"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered OpenAPI surface.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const SEMESTER_SCHEMA_NAME: &str = "crate.domain.Semester";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn semester_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let semester = schemas.get(SEMESTER_SCHEMA_NAME).expect("Semester schema");
        assert_object_schema_has_field(semester, "semester");
        assert_object_schema_has_field(semester, "subjects");
    }

    #[rstest]
    #[case("/api/v1/auth/register")]
    #[case("/api/v1/students/me/semesters")]
    #[case("/api/v1/students/email/{email}/classmates")]
    #[case("/api/v1/class/{department}/{branch}/{year}")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
