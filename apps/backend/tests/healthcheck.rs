mod common;

use actix_web::test;
use classroom_api::infra::state::build_state;

#[actix_web::test]
async fn health_returns_ok() {
    let state = common::sqlite_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
    let body = test::read_body(resp).await;
    assert_eq!(body, "ok");
}

#[actix_web::test]
async fn health_does_not_need_database() {
    let state = build_state()
        .with_security(common::test_security())
        .build()
        .await
        .unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
