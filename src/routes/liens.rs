use actix_web::{delete, get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::ApiError;
use crate::middleware::AdminUser;
use crate::models::dto::CreateLienRequest;
use crate::services::lien_service::LienService;

#[get("/liens")]
pub async fn list_liens(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let liens = LienService::list(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(liens))
}

#[get("/liens/{id}")]
pub async fn get_lien(
    _admin: AdminUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let lien = LienService::get(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(lien))
}

/// POST /liens - 409 avec le lien existant si le livreur en a déjà un
#[post("/liens")]
pub async fn create_lien(
    _admin: AdminUser,
    body: web::Json<CreateLienRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let lien = LienService::create(db.get_ref(), body.livreur_id).await?;
    Ok(HttpResponse::Created().json(lien))
}

#[delete("/liens/{id}")]
pub async fn delete_lien(
    _admin: AdminUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    LienService::delete(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn liens_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_liens)
        .service(get_lien)
        .service(create_lien)
        .service(delete_lien);
}
