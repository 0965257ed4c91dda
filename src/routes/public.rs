use actix_web::{web, HttpResponse};
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::error::ApiError;
use crate::services::public_service::PublicService;

/// GET /public/localisation/{token} (alias /public/lien/{token}) - (PUBLIC)
pub async fn resolve_token(
    path: web::Path<String>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let livreur = PublicService::resolve(db.get_ref(), &path.into_inner(), Utc::now()).await?;
    Ok(HttpResponse::Ok().json(livreur))
}

pub fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/public").service(
            web::resource(["/localisation/{token}", "/lien/{token}"])
                .route(web::get().to(resolve_token)),
        ),
    );
}
