#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, EntityTrait};

use locamali::config::AppConfig;
use locamali::db;
use locamali::models::dto::{CreateLivreurRequest, CreateVendeurRequest, LivreurAvecLien};
use locamali::models::{lien_localisation, vendeur};
use locamali::services::livreur_service::LivreurService;
use locamali::services::vendeur_service::VendeurService;
use locamali::startup::AppState;
use locamali::utils::jwt;

pub const ADMIN_EMAIL: &str = "admin@locamali.test";
pub const ADMIN_PASSWORD: &str = "secret-admin";
pub const JWT_SECRET: &str = "test-secret";
pub const ITERATIONS: u32 = 1000;

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: Some(JWT_SECRET.to_string()),
        admin_email: Some(ADMIN_EMAIL.to_string()),
        admin_password_hash: Some(bcrypt::hash(ADMIN_PASSWORD, 4).unwrap()),
        cors_origin: "*".to_string(),
        production: false,
        session_ttl_days: 30,
        password_iterations: ITERATIONS,
    }
}

pub async fn test_db() -> DatabaseConnection {
    db::memory_database().await.unwrap()
}

pub async fn setup_with(config: AppConfig) -> AppState {
    AppState {
        db: test_db().await,
        config: Arc::new(config),
    }
}

pub async fn setup() -> AppState {
    setup_with(test_config()).await
}

pub fn admin_token() -> String {
    jwt::generate_token(ADMIN_EMAIL, JWT_SECRET, Duration::days(1)).unwrap()
}

pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", admin_token()))
}

pub async fn seed_vendeur(
    db: &DatabaseConnection,
    email: &str,
    actif: bool,
    debut: DateTime<Utc>,
    fin: Option<DateTime<Utc>>,
) -> vendeur::Model {
    VendeurService::create(
        db,
        CreateVendeurRequest {
            nom: "Traoré".to_string(),
            prenom: "Awa".to_string(),
            email: email.to_string(),
            password: "vendeur-pass".to_string(),
            date_debut: debut.to_rfc3339(),
            date_fin: fin.map(|d| d.to_rfc3339()),
            actif: Some(actif),
        },
        ITERATIONS,
    )
    .await
    .unwrap()
}

pub async fn seed_active_vendeur(db: &DatabaseConnection, email: &str) -> vendeur::Model {
    seed_vendeur(db, email, true, Utc::now() - Duration::days(1), None).await
}

pub async fn seed_livreur(db: &DatabaseConnection, vendeur_id: i32) -> LivreurAvecLien {
    LivreurService::create(
        db,
        CreateLivreurRequest {
            nom: "Diarra".to_string(),
            prenom: Some("Moussa".to_string()),
            numero_whatsapp: Some("+223 70 00 00 00".to_string()),
            vendeur_id,
        },
    )
    .await
    .unwrap()
}

pub async fn clicks(db: &DatabaseConnection, lien_id: i32) -> i32 {
    lien_localisation::Entity::find_by_id(lien_id)
        .one(db)
        .await
        .unwrap()
        .expect("lien should exist")
        .clicks
}
