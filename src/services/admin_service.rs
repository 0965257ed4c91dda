use chrono::Utc;
use sea_orm::*;

use crate::error::ApiError;
use crate::models::admin;
use crate::utils::password;

pub struct AdminService;

impl AdminService {
    /// Crée l'admin ou remplace son mot de passe s'il existe déjà
    pub async fn upsert(
        db: &DatabaseConnection,
        email: &str,
        plain_password: &str,
        iterations: u32,
    ) -> Result<admin::Model, ApiError> {
        let password_hash = password::hash_password(plain_password, iterations)
            .map_err(ApiError::Internal)?;

        let existing = admin::Entity::find()
            .filter(admin::Column::Email.eq(email))
            .one(db)
            .await?;

        let admin = match existing {
            Some(admin) => {
                let mut active_model: admin::ActiveModel = admin.into();
                active_model.password_hash = Set(password_hash);
                active_model.update(db).await?
            }
            None => {
                admin::ActiveModel {
                    email: Set(email.to_string()),
                    password_hash: Set(password_hash),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(db)
                .await?
            }
        };

        Ok(admin)
    }
}
