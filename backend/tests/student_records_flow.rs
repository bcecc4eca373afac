//! End-to-end flows through the HTTP adapter, domain services and the
//! in-memory store: register, log in, record semesters, compare with
//! classmates.

mod support;

use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use scorecard::domain::TRACE_ID_HEADER;
use scorecard::outbound::persistence::InMemoryStudentRepository;
use support::{app, registration, session_cookie};

async fn json_body(response: actix_web::dev::ServiceResponse) -> Value {
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[actix_web::test]
async fn register_record_and_compare() {
    let app = test::init_service(app(
        Arc::new(InMemoryStudentRepository::new()),
        Key::generate(),
    ))
    .await;

    let mut ada = registration("CS-042", "ada@example.edu", "ada");
    ada["semesters"] = json!([
        { "semester": 1, "subjects": [{ "name": "Maths", "marks": 100 }] }
    ]);
    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(&ada)
            .to_request(),
    )
    .await;
    assert_eq!(registered.status(), StatusCode::CREATED);
    let ada_cookie = session_cookie(&registered);
    assert_eq!(json_body(registered).await["cgpa"], json!(100.0));

    let second = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/students/me/semesters")
            .cookie(ada_cookie.clone())
            .set_json(json!({
                "semester": 2,
                "subjects": [{ "name": "Physics", "marks": 0 }, { "name": "Chemistry", "marks": "" }]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CREATED);
    let profile = json_body(second).await;
    assert_eq!(profile["semesters"][0]["gpa"], json!(100.0));
    assert_eq!(profile["semesters"][1]["gpa"], json!(0.0));
    assert_eq!(profile["cgpa"], json!(33.33));

    let charles = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(registration("CS-041", "charles@example.edu", "charles"))
            .to_request(),
    )
    .await;
    assert_eq!(charles.status(), StatusCode::CREATED);

    let standings = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/students/email/ada@example.edu/classmates")
            .cookie(ada_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(standings.status(), StatusCode::OK);
    let body = json_body(standings).await;
    assert_eq!(body["peerDataAvailable"], true);
    assert_eq!(
        body["standings"],
        json!([
            { "rollNo": "CS-042", "name": "Student CS-042", "cgpa": 33.33 },
            { "rollNo": "CS-041", "name": "Student CS-041", "cgpa": 0.0 }
        ])
    );
}

#[actix_web::test]
async fn login_accepts_only_the_registered_password() {
    let app = test::init_service(app(
        Arc::new(InMemoryStudentRepository::new()),
        Key::generate(),
    ))
    .await;
    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(registration("CS-001", "grace@example.edu", "grace"))
            .to_request(),
    )
    .await;
    assert_eq!(registered.status(), StatusCode::CREATED);

    for (email, password, expected) in [
        ("GRACE@example.edu", "correct horse battery staple", StatusCode::OK),
        ("grace@example.edu", "wrong", StatusCode::UNAUTHORIZED),
        ("nobody@example.edu", "correct horse battery staple", StatusCode::UNAUTHORIZED),
    ] {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(json!({ "email": email, "password": password }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), expected, "login as {email}");
    }
}

#[rstest]
#[case::email("CS-002", "grace@example.edu", "other", "email")]
#[case::roll_no("CS-001", "other@example.edu", "other", "rollNo")]
#[case::username("CS-002", "other@example.edu", "grace", "username")]
#[actix_web::test]
async fn duplicate_identity_fields_conflict(
    #[case] roll: &str,
    #[case] email: &str,
    #[case] username: &str,
    #[case] field: &str,
) {
    let app = test::init_service(app(
        Arc::new(InMemoryStudentRepository::new()),
        Key::generate(),
    ))
    .await;
    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(registration("CS-001", "grace@example.edu", "grace"))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let clash = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(registration(roll, email, username))
            .to_request(),
    )
    .await;
    assert_eq!(clash.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(clash).await["details"]["field"], field);
}

#[actix_web::test]
async fn errors_carry_trace_ids() {
    let app = test::init_service(app(
        Arc::new(InMemoryStudentRepository::new()),
        Key::generate(),
    ))
    .await;
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/students/me").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body = json_body(response).await;
    assert_eq!(body["traceId"], header.as_str());
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn empty_class_reports_no_peer_data() {
    let app = test::init_service(app(
        Arc::new(InMemoryStudentRepository::new()),
        Key::generate(),
    ))
    .await;
    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(registration("CS-001", "grace@example.edu", "grace"))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&registered);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/class/Arts/History/3")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["peerDataAvailable"], false);
    assert_eq!(body["standings"], json!([]));
}

#[rstest]
#[case(json!("Third"), "Third")]
#[case(json!("2"), "2")]
#[actix_web::test]
async fn text_years_register_and_group_classmates(#[case] year: Value, #[case] path_year: &str) {
    let app = test::init_service(app(
        Arc::new(InMemoryStudentRepository::new()),
        Key::generate(),
    ))
    .await;
    let mut lin = registration("CS-007", "lin@example.edu", "lin");
    lin["year"] = year;
    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(&lin)
            .to_request(),
    )
    .await;
    assert_eq!(registered.status(), StatusCode::CREATED);
    let cookie = session_cookie(&registered);
    assert_eq!(json_body(registered).await["year"], path_year);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/class/Engineering/CSE/{path_year}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["peerDataAvailable"], true);
    assert_eq!(body["standings"][0]["rollNo"], "CS-007");
}
