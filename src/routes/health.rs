use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use crate::config::AppConfig;
use crate::models::dto::{DiagEnv, DiagResponse};
use crate::models::health::HealthResponse;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        ok: true,
        time: Utc::now(),
    };

    HttpResponse::Ok().json(response)
}

/// GET /diag - Présence des variables de configuration (jamais leurs valeurs)
#[get("/diag")]
pub async fn diag(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok().json(DiagResponse {
        ok: true,
        env: DiagEnv {
            database_url: !config.database_url.is_empty(),
            jwt_secret: config.jwt_secret.is_some(),
            admin_email: config.admin_email.is_some(),
            admin_password_hash: config.admin_password_hash.is_some(),
        },
        cors_origin: config.cors_origin.clone(),
        production: config.production,
    })
}
