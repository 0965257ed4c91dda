use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::middleware::{AdminUser, SESSION_COOKIE};
use crate::models::dto::{LoginRequest, SessionResponse, TokenResponse};
use crate::services::auth_service::AuthService;
use crate::utils::jwt;

/// Vérifie les identifiants et génère le JWT (commun aux deux variantes)
async fn issue_token(
    body: &LoginRequest,
    config: &AppConfig,
    auth: &AuthService,
) -> Result<String, ApiError> {
    // 1. Champs requis
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest("Email et mot de passe requis".to_string()));
    }

    // 2. Secret de signature
    let secret = config
        .jwt_secret
        .as_deref()
        .ok_or(ApiError::Configuration("JWT secret manquant"))?;

    // 3. Vérifier les identifiants (base puis environnement)
    let email = auth.authenticate(body.email.trim(), &body.password).await?;

    // 4. Générer le JWT
    jwt::generate_token(&email, secret, config.session_ttl()).map_err(ApiError::Internal)
}

/// POST /login | /connexion - Se connecter, token Bearer (PUBLIC)
pub async fn login(
    body: web::Json<LoginRequest>,
    config: web::Data<AppConfig>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, ApiError> {
    let token = issue_token(&body, &config, &auth).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// POST /session - Se connecter, cookie http-only (PUBLIC)
pub async fn create_session(
    body: web::Json<LoginRequest>,
    config: web::Data<AppConfig>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, ApiError> {
    let token = issue_token(&body, &config, &auth).await?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .http_only(true)
        .secure(config.production)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(CookieDuration::days(config.session_ttl_days))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "ok": true })))
}

/// GET /session - Vérifier la session (PROTÉGÉE)
pub async fn get_session(admin: AdminUser) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse { email: admin.email })
}

/// DELETE /session - Se déconnecter
pub async fn delete_session() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::NoContent().cookie(cookie).finish()
}

pub fn login_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/login", "/connexion"]).route(web::post().to(login)));
}

pub fn session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/session")
            .route(web::post().to(create_session))
            .route(web::get().to(get_session))
            .route(web::delete().to(delete_session)),
    );
}
