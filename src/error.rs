use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

use crate::models::lien_localisation;
use crate::models::vendeur::Indisponibilite;

pub const LIEN_EXISTANT: &str = "Un lien existe déjà pour ce livreur. Utilisez /api/admin/livreurs/:id/regenerate-link pour régénérer le lien.";

/// Erreurs renvoyées par l'API, toujours sous la forme `{"error": ...}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Identifiants invalides")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Service indisponible")]
    ServiceIndisponible(Indisponibilite),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{}", LIEN_EXISTANT)]
    LienExistant(Box<lien_localisation::Model>),

    #[error("{0}")]
    Configuration(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

/// Contrainte UNIQUE violée (deux requêtes concurrentes passées toutes les deux
/// par la vérification préalable)
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::ServiceIndisponible(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::LienExistant(_) => StatusCode::CONFLICT,
            ApiError::Configuration(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::ServiceIndisponible(reason) => json!({
                "error": self.to_string(),
                "reason": reason,
            }),
            ApiError::LienExistant(lien) => json!({
                "error": self.to_string(),
                "lien": lien,
            }),
            // Les détails internes restent dans les logs
            ApiError::Database(_) | ApiError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                json!({ "error": "Erreur serveur" })
            }
            _ => json!({ "error": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(error: ApiError) -> serde_json::Value {
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[actix_web::test]
    async fn test_indisponible_avec_raison() {
        let error = ApiError::ServiceIndisponible(Indisponibilite::Expired);
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);

        let json = body_json(error).await;
        assert_eq!(json["error"], "Service indisponible");
        assert_eq!(json["reason"], "expired");
    }

    #[actix_web::test]
    async fn test_erreur_base_masquee() {
        let error = ApiError::Database(DbErr::Custom("relation \"vendeurs\" does not exist".into()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(error).await;
        assert_eq!(json, json!({ "error": "Erreur serveur" }));
    }

    #[actix_web::test]
    async fn test_configuration_visible() {
        let json = body_json(ApiError::Configuration("JWT secret manquant")).await;
        assert_eq!(json["error"], "JWT secret manquant");
    }
}
