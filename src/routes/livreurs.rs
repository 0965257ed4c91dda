use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AdminUser;
use crate::models::dto::{CreateLivreurRequest, UpdateLivreurRequest};
use crate::services::lien_service::LienService;
use crate::services::livreur_service::LivreurService;

#[get("/livreurs")]
pub async fn list_livreurs(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let livreurs = LivreurService::list(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(livreurs))
}

#[get("/livreurs/{id}")]
pub async fn get_livreur(
    _admin: AdminUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let livreur = LivreurService::get(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(livreur))
}

/// POST /livreurs - Créer un livreur, son lien est créé automatiquement
#[post("/livreurs")]
pub async fn create_livreur(
    _admin: AdminUser,
    body: web::Json<CreateLivreurRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let livreur = LivreurService::create(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(livreur))
}

#[put("/livreurs/{id}")]
pub async fn update_livreur(
    _admin: AdminUser,
    path: web::Path<i32>,
    body: web::Json<UpdateLivreurRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let livreur = LivreurService::update(db.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(livreur))
}

#[delete("/livreurs/{id}")]
pub async fn delete_livreur(
    _admin: AdminUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    LivreurService::delete(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /livreurs/{id}/regenerate-link - Nouveau token, l'ancien ne fonctionne plus
#[post("/livreurs/{id}/regenerate-link")]
pub async fn regenerate_link(
    _admin: AdminUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let lien = LienService::regenerate(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(lien))
}

pub fn livreurs_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_livreurs)
        .service(get_livreur)
        .service(create_livreur)
        .service(update_livreur)
        .service(delete_livreur)
        .service(regenerate_link);
}
