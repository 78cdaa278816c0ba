use actix_web::{http::StatusCode, test};
use warded_login::{create_insecure_app, insecure::MSG_INVALID};

async fn post_login(username: &str, password: &str) -> (StatusCode, String) {
    let app = test::init_service(create_insecure_app()).await;
    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("username", username), ("password", password)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[actix_web::test]
async fn test_insecure_form_renders() {
    let app = test::init_service(create_insecure_app()).await;
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("<h2>Insecure Login</h2>"));
    assert!(!body.contains(MSG_INVALID));
}

#[actix_web::test]
async fn test_insecure_plaintext_login() {
    let (status, body) = post_login("admin", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Welcome, admin!</h1>"));

    let (_, body) = post_login("admin", "wrong").await;
    assert!(body.contains(MSG_INVALID));
}

#[actix_web::test]
async fn test_insecure_app_never_rate_limits() {
    let app = test::init_service(create_insecure_app()).await;
    for _ in 0..20 {
        let req = test::TestRequest::post()
            .uri("/")
            .set_form([("username", "user"), ("password", "nope")])
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("username", "user"), ("password", "letmein")])
        .to_request();
    let body = test::read_body(test::call_service(&app, req).await).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Welcome, user!"));
}

#[actix_web::test]
async fn test_insecure_bodyless_post_is_a_failed_login() {
    let app = test::init_service(create_insecure_app()).await;
    let req = test::TestRequest::post().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains(MSG_INVALID));
}
