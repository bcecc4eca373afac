//! Registrations written to the records file survive a restart.

mod support;

use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};
use tempfile::TempDir;

use scorecard::outbound::persistence::InMemoryStudentRepository;
use support::{app, registration, session_cookie};

#[actix_web::test]
async fn records_are_reloaded_after_restart() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("students.json");
    let key = Key::generate();

    {
        let store = InMemoryStudentRepository::open(&path).await.expect("open store");
        let app = test::init_service(app(Arc::new(store), key.clone())).await;
        let mut payload = registration("CS-007", "ada@example.edu", "ada");
        payload["semesters"] = json!([
            { "semester": 1, "subjects": [{ "name": "Maths", "marks": 70 }, { "name": "Art", "marks": 90 }] }
        ]);
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let stored: Value =
        serde_json::from_slice(&std::fs::read(&path).expect("records file")).expect("JSON array");
    assert_eq!(stored[0]["rollNo"], "CS-007");
    assert_eq!(stored[0]["cgpa"], json!(80.0));
    assert!(
        stored[0]["password"]
            .as_str()
            .is_some_and(|digest| digest.starts_with("$argon2")),
        "passwords are stored hashed"
    );

    let store = InMemoryStudentRepository::open(&path).await.expect("reopen store");
    let app = test::init_service(app(Arc::new(store), key)).await;
    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "ada@example.edu", "password": "correct horse battery staple" }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);

    let me = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/students/me")
            .cookie(session_cookie(&login))
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&test::read_body(me).await).expect("JSON body");
    assert_eq!(body["cgpa"], json!(80.0));
}
