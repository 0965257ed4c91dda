use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::middleware::AdminUser;
use crate::models::dto::{CreateVendeurRequest, UpdateVendeurRequest};
use crate::services::vendeur_service::VendeurService;

/// GET /vendeurs - Vendeurs avec livreurs et liens (PROTÉGÉE)
#[get("/vendeurs")]
pub async fn list_vendeurs(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let vendeurs = VendeurService::list(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(vendeurs))
}

#[get("/vendeurs/{id}")]
pub async fn get_vendeur(
    _admin: AdminUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let vendeur = VendeurService::get(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(vendeur))
}

/// POST /vendeurs - Créer un vendeur (PROTÉGÉE)
#[post("/vendeurs")]
pub async fn create_vendeur(
    _admin: AdminUser,
    body: web::Json<CreateVendeurRequest>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let vendeur = VendeurService::create(db.get_ref(), body.into_inner(), config.password_iterations).await?;
    Ok(HttpResponse::Created().json(vendeur))
}

/// PUT /vendeurs/{id} - Mise à jour partielle (ex: activer / désactiver)
#[put("/vendeurs/{id}")]
pub async fn update_vendeur(
    _admin: AdminUser,
    path: web::Path<i32>,
    body: web::Json<UpdateVendeurRequest>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let vendeur = VendeurService::update(
        db.get_ref(),
        path.into_inner(),
        body.into_inner(),
        config.password_iterations,
    )
    .await?;
    Ok(HttpResponse::Ok().json(vendeur))
}

/// DELETE /vendeurs/{id} - Supprime aussi ses livreurs et leurs liens
#[delete("/vendeurs/{id}")]
pub async fn delete_vendeur(
    _admin: AdminUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    VendeurService::delete(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn vendeurs_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_vendeurs)
        .service(get_vendeur)
        .service(create_vendeur)
        .service(update_vendeur)
        .service(delete_vendeur);
}
