mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, App};
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use locamali::middleware::SESSION_COOKIE;
use locamali::services::admin_service::AdminService;
use locamali::startup::configure_app;
use locamali::utils::jwt;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, ITERATIONS, JWT_SECRET};

#[actix_web::test]
async fn test_login_env_admin_returns_token() {
    let state = common::setup().await;
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    for uri in ["/api/admin/login", "/api/login", "/api/connexion", "/login"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        let claims = jwt::verify_token(body["token"].as_str().unwrap(), JWT_SECRET).unwrap();
        assert_eq!(claims.email, ADMIN_EMAIL);
        assert_eq!(claims.exp - claims.iat, Duration::days(30).num_seconds());
    }
}

#[actix_web::test]
async fn test_invalid_credentials_are_indistinguishable() {
    let state = common::setup().await;
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let mut bodies = Vec::new();
    for (email, password) in [(ADMIN_EMAIL, "mauvais"), ("inconnu@locamali.test", ADMIN_PASSWORD)] {
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0], json!({ "error": "Identifiants invalides" }));
}

#[actix_web::test]
async fn test_login_requires_fields() {
    let state = common::setup().await;
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/session")
        .set_json(json!({ "email": ADMIN_EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Email et mot de passe requis");
}

#[actix_web::test]
async fn test_login_without_secret_is_server_error() {
    let mut config = common::test_config();
    config.jwt_secret = None;
    let state = common::setup_with(config).await;
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "JWT secret manquant");
}

#[actix_web::test]
async fn test_database_admin_takes_priority() {
    let state = common::setup().await;
    AdminService::upsert(&state.db, ADMIN_EMAIL, "mot-de-passe-bd", ITERATIONS)
        .await
        .unwrap();
    AdminService::upsert(&state.db, "second@locamali.test", "autre", ITERATIONS)
        .await
        .unwrap();
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let login = |email: &'static str, password: &'static str| {
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request()
    };

    // Mot de passe de la base accepté
    let resp = test::call_service(&app, login(ADMIN_EMAIL, "mot-de-passe-bd")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Le mot de passe de l'environnement ne sert plus pour cet email
    let resp = test::call_service(&app, login(ADMIN_EMAIL, ADMIN_PASSWORD)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Un admin présent seulement en base
    let resp = test::call_service(&app, login("second@locamali.test", "autre")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_cookie_session_lifecycle() {
    let state = common::setup().await;
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    // 1. Connexion : cookie http-only
    let req = test::TestRequest::post()
        .uri("/api/session")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("session cookie")
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(actix_web::cookie::time::Duration::days(30)));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "ok": true }));

    // 2. Le cookie suffit pour la session et les routes protégées
    let req = test::TestRequest::get()
        .uri("/api/session")
        .cookie(Cookie::new(SESSION_COOKIE, cookie.value().to_string()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "email": ADMIN_EMAIL }));

    let req = test::TestRequest::get()
        .uri("/api/admin/vendeurs")
        .cookie(Cookie::new(SESSION_COOKIE, cookie.value().to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 3. Déconnexion : cookie supprimé
    let req = test::TestRequest::delete().uri("/api/session").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let removal = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("removal cookie");
    assert_eq!(removal.value(), "");
    assert_eq!(removal.max_age(), Some(actix_web::cookie::time::Duration::ZERO));
}

#[actix_web::test]
async fn test_session_without_cookie_is_unauthorized() {
    let state = common::setup().await;
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get().uri("/session").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_protected_routes_reject_bad_tokens() {
    let state = common::setup().await;
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let expired = jwt::generate_token(ADMIN_EMAIL, JWT_SECRET, Duration::seconds(-10)).unwrap();
    let wrong_secret = jwt::generate_token(ADMIN_EMAIL, "autre-secret", Duration::days(1)).unwrap();

    let headers = [
        None,
        Some(format!("Bearer {}", expired)),
        Some(format!("Bearer {}", wrong_secret)),
        Some("Bearer pas.un.jwt".to_string()),
    ];

    for header in headers {
        let mut req = test::TestRequest::get().uri("/api/admin/livreurs");
        if let Some(value) = header {
            req = req.insert_header(("Authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }
}

#[actix_web::test]
async fn test_health_and_diag() {
    let state = common::setup().await;
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    for uri in ["/api/health", "/health"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ok"], true);
        assert!(body["time"].is_string());
    }

    let req = test::TestRequest::get().uri("/api/diag").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["env"],
        json!({
            "databaseUrl": true,
            "jwtSecret": true,
            "adminEmail": true,
            "adminPasswordHash": true,
        })
    );
    assert!(!body.to_string().contains(JWT_SECRET));
}
