use std::sync::Arc;

use actix_cors::Cors;
use actix_web::web;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::routes;
use crate::services::auth_service::AuthService;

/// État partagé, cloné pour chaque worker actix
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
}

/// Enregistre les données partagées, les extracteurs et les routes
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let auth = AuthService::from_config(state.db.clone(), &state.config);

        cfg.app_data(web::Data::new(state.db))
            .app_data(web::Data::from(state.config))
            .app_data(web::Data::new(auth))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|_err, _req| {
                ApiError::BadRequest("Identifiant invalide".to_string()).into()
            }))
            .configure(routes::configure_routes);
    }
}

/// CORS_ORIGIN="*" accepte toutes les origines (avec cookies)
pub fn cors(config: &AppConfig) -> Cors {
    let cors = if config.cors_origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(&config.cors_origin)
    };

    cors.allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
