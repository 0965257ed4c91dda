use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::error::{is_unique_violation, ApiError};
use crate::models::dto::LienAvecLivreur;
use crate::models::{lien_localisation, livreur};

pub struct LienService;

impl LienService {
    /// Génère un token opaque (UUID v4, unicité garantie par la contrainte UNIQUE)
    pub fn generate_token() -> String {
        Uuid::new_v4().to_string()
    }

    /// Insère un nouveau lien pour le livreur (dans une transaction ou non)
    pub async fn insert_for_livreur<C: ConnectionTrait>(
        db: &C,
        livreur_id: i32,
    ) -> Result<lien_localisation::Model, DbErr> {
        lien_localisation::ActiveModel {
            token: Set(Self::generate_token()),
            livreur_id: Set(livreur_id),
            clicks: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_livreur<C: ConnectionTrait>(
        db: &C,
        livreur_id: i32,
    ) -> Result<Option<lien_localisation::Model>, DbErr> {
        lien_localisation::Entity::find()
            .filter(lien_localisation::Column::LivreurId.eq(livreur_id))
            .one(db)
            .await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<LienAvecLivreur>, ApiError> {
        let liens = lien_localisation::Entity::find()
            .find_also_related(livreur::Entity)
            .order_by_asc(lien_localisation::Column::Id)
            .all(db)
            .await?;

        Ok(liens
            .into_iter()
            .map(|(lien, livreur)| LienAvecLivreur { lien, livreur })
            .collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<LienAvecLivreur, ApiError> {
        let (lien, livreur) = lien_localisation::Entity::find_by_id(id)
            .find_also_related(livreur::Entity)
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Lien introuvable"))?;

        Ok(LienAvecLivreur { lien, livreur })
    }

    /// Crée un lien pour un livreur qui n'en a pas encore.
    /// Un lien existant est renvoyé dans l'erreur 409.
    pub async fn create(
        db: &DatabaseConnection,
        livreur_id: Option<i32>,
    ) -> Result<lien_localisation::Model, ApiError> {
        // 1. Valider l'id du livreur
        let livreur_id = livreur_id
            .filter(|id| *id > 0)
            .ok_or_else(|| ApiError::BadRequest("livreurId invalide".to_string()))?;

        let exists = livreur::Entity::find_by_id(livreur_id).one(db).await?.is_some();
        if !exists {
            return Err(ApiError::BadRequest("livreurId invalide".to_string()));
        }

        // 2. Un seul lien par livreur
        if let Some(existing) = Self::find_by_livreur(db, livreur_id).await? {
            return Err(ApiError::LienExistant(Box::new(existing)));
        }

        // 3. Créer le lien
        let lien = Self::insert_unique(db, livreur_id).await?;
        tracing::info!(livreur_id, lien_id = lien.id, "Lien created");

        Ok(lien)
    }

    /// Insère le lien ; si un autre lien a été créé entre-temps pour ce livreur,
    /// la contrainte UNIQUE le signale et le lien existant est renvoyé en 409
    pub async fn insert_unique(
        db: &DatabaseConnection,
        livreur_id: i32,
    ) -> Result<lien_localisation::Model, ApiError> {
        match Self::insert_for_livreur(db, livreur_id).await {
            Ok(lien) => Ok(lien),
            Err(err) if is_unique_violation(&err) => match Self::find_by_livreur(db, livreur_id).await? {
                Some(existing) => Err(ApiError::LienExistant(Box::new(existing))),
                None => Err(err.into()),
            },
            Err(err) => Err(err.into()),
        }
    }

    /// Remplace le lien du livreur : l'ancien token devient introuvable
    pub async fn regenerate(
        db: &DatabaseConnection,
        livreur_id: i32,
    ) -> Result<lien_localisation::Model, ApiError> {
        let txn = db.begin().await?;

        livreur::Entity::find_by_id(livreur_id)
            .one(&txn)
            .await?
            .ok_or(ApiError::NotFound("Livreur introuvable"))?;

        // Supprimer l'ancien lien s'il existe
        lien_localisation::Entity::delete_many()
            .filter(lien_localisation::Column::LivreurId.eq(livreur_id))
            .exec(&txn)
            .await?;

        let lien = Self::insert_for_livreur(&txn, livreur_id).await?;
        txn.commit().await?;

        tracing::info!(livreur_id, lien_id = lien.id, "Lien regenerated");
        Ok(lien)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
        let result = lien_localisation::Entity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(ApiError::NotFound("Lien introuvable"));
        }

        tracing::info!(lien_id = id, "Lien deleted");
        Ok(())
    }
}
