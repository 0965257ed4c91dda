use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::utils::jwt;

/// Nom du cookie de session admin (http-only)
pub const SESSION_COOKIE: &str = "admin_session";

/// Structure qui contient les infos de l'administrateur authentifié
/// Utilisée comme extracteur dans les routes protégées
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub email: String,
}

/// Implémentation de FromRequest pour AdminUser
/// Le token est lu dans le header Authorization (Bearer), sinon dans le cookie de session
impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Error::from))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AdminUser, ApiError> {
    // 1. Récupérer le secret depuis la configuration
    let config = req
        .app_data::<web::Data<AppConfig>>()
        .ok_or_else(|| ApiError::Internal("AppConfig not registered".to_string()))?;

    let secret = config.jwt_secret.as_deref().ok_or(ApiError::Unauthorized)?;

    // 2. Extraire le token (format: "Bearer <token>" ou cookie)
    let token = bearer_token(req)
        .or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
        .ok_or(ApiError::Unauthorized)?;

    // 3. Vérifier le token JWT
    let claims = jwt::verify_token(&token, secret).map_err(|e| {
        tracing::debug!(error = %e, "Rejected admin token");
        ApiError::Unauthorized
    })?;

    Ok(AdminUser { email: claims.email })
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
