mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::{assert_problem_details, unique_email, unique_str};
use serde_json::{json, Value};

use common::{bearer, seed_user};

#[actix_web::test]
async fn teacher_and_student_lifecycle() {
    let state = common::sqlite_state().await;
    let (_, token) = seed_user(&state, &unique_email("admin"), "Admin").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/teachers")
        .insert_header(bearer(&token))
        .set_json(json!({"name": "Ada", "subject": "Math"}))
        .to_request();
    let teacher: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(teacher["name"], "Ada");
    assert_eq!(teacher["subject"], "Math");
    assert_eq!(teacher["students"], json!([]));
    let teacher_id = teacher["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/students")
        .insert_header(bearer(&token))
        .set_json(json!({"name": "Sam", "marks": 88, "teacher_id": teacher_id}))
        .to_request();
    let student: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(student["name"], "Sam");
    assert_eq!(student["marks"], 88);
    assert_eq!(student["teacher_id"], teacher_id);
    assert_eq!(student["teacher"], json!({"name": "Ada", "subject": "Math"}));
    let student_id = student["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/teachers")
        .insert_header(bearer(&token))
        .to_request();
    let teachers: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        teachers[0]["students"],
        json!([{"id": student_id, "name": "Sam", "marks": 88}])
    );

    // Teacher still referenced.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/teachers/{teacher_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::CONFLICT, "STILL_REFERENCED", None).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/students/{student_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["id"], student_id);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/teachers/{teacher_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["id"], teacher_id);
    assert_eq!(deleted["students"], json!([]));
}

#[actix_web::test]
async fn student_with_unknown_teacher_is_rejected() {
    let state = common::sqlite_state().await;
    let (_, token) = seed_user(&state, &unique_email("admin"), "Admin").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/students")
        .insert_header(bearer(&token))
        .set_json(json!({"name": unique_str("student"), "marks": 50, "teacher_id": 404}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        StatusCode::BAD_REQUEST,
        "UNKNOWN_TEACHER",
        Some("does not exist"),
    )
    .await;
}

#[actix_web::test]
async fn deleting_missing_rows_is_not_found() {
    let state = common::sqlite_state().await;
    let (_, token) = seed_user(&state, &unique_email("admin"), "Admin").await;
    let app = test_app!(state);

    let req = test::TestRequest::delete()
        .uri("/api/v1/teachers/77")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        StatusCode::NOT_FOUND,
        "TEACHER_NOT_FOUND",
        Some("Teacher not found"),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/students/77")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        StatusCode::NOT_FOUND,
        "STUDENT_NOT_FOUND",
        Some("Student not found"),
    )
    .await;
}

#[actix_web::test]
async fn list_honours_skip_and_clamps_limit() {
    let state = common::sqlite_state().await;
    let (_, token) = seed_user(&state, &unique_email("admin"), "Admin").await;
    let app = test_app!(state);

    for i in 0..12 {
        let req = test::TestRequest::post()
            .uri("/api/v1/teachers")
            .insert_header(bearer(&token))
            .set_json(json!({"name": format!("T{i:02}"), "subject": "Art"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let list = |uri: &'static str| test::TestRequest::get().uri(uri).insert_header(bearer(&token));

    let page: Value = test::call_and_read_body_json(&app, list("/api/v1/teachers").to_request()).await;
    assert_eq!(page.as_array().unwrap().len(), 10);

    let page: Value =
        test::call_and_read_body_json(&app, list("/api/v1/teachers?skip=10").to_request()).await;
    let names: Vec<_> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["T10", "T11"]);

    let page: Value =
        test::call_and_read_body_json(&app, list("/api/v1/teachers?limit=0").to_request()).await;
    assert_eq!(page.as_array().unwrap().len(), 1);

    let page: Value =
        test::call_and_read_body_json(&app, list("/api/v1/teachers?limit=500").to_request()).await;
    assert_eq!(page.as_array().unwrap().len(), 12);
}

#[actix_web::test]
async fn oversized_skip_yields_an_empty_page() {
    let state = common::sqlite_state().await;
    let (_, token) = seed_user(&state, &unique_email("admin"), "Admin").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/teachers")
        .insert_header(bearer(&token))
        .set_json(json!({"name": "Ada", "subject": "Math"}))
        .to_request();
    let teacher: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/students")
        .insert_header(bearer(&token))
        .set_json(json!({"name": "Sam", "marks": 70, "teacher_id": teacher["id"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    for uri in [
        "/api/v1/students?skip=18446744073709551615",
        "/api/v1/teachers?skip=9223372036854775808",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let page: Value = test::read_body_json(resp).await;
        assert_eq!(page, json!([]), "{uri}");
    }
}

#[actix_web::test]
async fn invalid_input_is_a_problem_response() {
    let state = common::sqlite_state().await;
    let (_, token) = seed_user(&state, &unique_email("admin"), "Admin").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/teachers")
        .insert_header(bearer(&token))
        .set_json(json!({"name": "  ", "subject": "Math"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/students")
        .insert_header(bearer(&token))
        .set_json(json!({"name": "Sam"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST", None).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/students?skip=-1")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST", None).await;
}
