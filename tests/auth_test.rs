//! Authentication tests: password hashing, CSRF tokens and the login guard
//! in front of every page but /login.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, http::StatusCode, test, App};

use jourj::auth::password;
use jourj::routes;

const TEST_PASSWORD: &str = "password123";

#[actix_web::test]
async fn test_hash_and_verify_password() {
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash password");
    assert!(hash.len() > 20);
    assert!(password::verify_password(TEST_PASSWORD, &hash).expect("Verification failed"));
    assert!(!password::verify_password("wrongpassword", &hash).expect("Verification failed"));
}

#[actix_web::test]
async fn test_hashes_are_salted() {
    let hash1 = password::hash_password(TEST_PASSWORD).expect("Failed to hash first password");
    let hash2 = password::hash_password(TEST_PASSWORD).expect("Failed to hash second password");
    assert_ne!(hash1, hash2);
}

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build()
}

#[actix_web::test]
async fn test_protected_pages_redirect_to_login() {
    let app = test::init_service(App::new().wrap(session_middleware()).configure(routes::configure)).await;

    for path in ["/", "/admin", "/events", "/admin/planning", "/participants/person/1"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(resp.headers().get("Location").unwrap(), "/login", "{path}");
    }
}

#[actix_web::test]
async fn test_json_endpoints_are_guarded_too() {
    let app = test::init_service(App::new().wrap(session_middleware()).configure(routes::configure)).await;

    let req = test::TestRequest::post()
        .uri("/admin/planning/reorder")
        .set_json(serde_json::json!({ "from": 0, "to": 1, "csrf_token": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn test_login_page_renders_with_csrf_token() {
    let app = test::init_service(App::new().wrap(session_middleware()).configure(routes::configure)).await;

    let req = test::TestRequest::get().uri("/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("name=\"csrf_token\""));
    assert!(html.contains("Jour J"));
}
