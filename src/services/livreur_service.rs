use std::collections::HashMap;

use chrono::Utc;
use sea_orm::*;

use crate::error::ApiError;
use crate::models::dto::{CreateLivreurRequest, LivreurAvecLien, LivreurDetail, UpdateLivreurRequest};
use crate::models::{lien_localisation, livreur, vendeur};
use crate::services::lien_service::LienService;

pub struct LivreurService;

impl LivreurService {
    /// Liste les livreurs avec leur vendeur et leur lien
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<LivreurDetail>, ApiError> {
        let livreurs = livreur::Entity::find()
            .find_also_related(vendeur::Entity)
            .order_by_asc(livreur::Column::Id)
            .all(db)
            .await?;

        let mut liens: HashMap<i32, lien_localisation::Model> = lien_localisation::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|lien| (lien.livreur_id, lien))
            .collect();

        Ok(livreurs
            .into_iter()
            .map(|(livreur, vendeur)| LivreurDetail {
                lien_localisation: liens.remove(&livreur.id),
                livreur,
                vendeur,
            })
            .collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<LivreurDetail, ApiError> {
        let (livreur, vendeur) = livreur::Entity::find_by_id(id)
            .find_also_related(vendeur::Entity)
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Livreur introuvable"))?;

        let lien_localisation = LienService::find_by_livreur(db, livreur.id).await?;

        Ok(LivreurDetail { livreur, vendeur, lien_localisation })
    }

    /// Crée le livreur et son lien de localisation dans la même transaction
    pub async fn create(
        db: &DatabaseConnection,
        request: CreateLivreurRequest,
    ) -> Result<LivreurAvecLien, ApiError> {
        let txn = db.begin().await?;

        // 1. Vérifier le vendeur (clé étrangère)
        ensure_vendeur_exists(&txn, request.vendeur_id).await?;

        // 2. Créer le livreur
        let livreur = livreur::ActiveModel {
            nom: Set(request.nom),
            prenom: Set(request.prenom),
            numero_whatsapp: Set(request.numero_whatsapp),
            vendeur_id: Set(request.vendeur_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // 3. Créer automatiquement son lien
        let lien = LienService::insert_for_livreur(&txn, livreur.id).await?;

        txn.commit().await?;
        tracing::info!(livreur_id = livreur.id, vendeur_id = livreur.vendeur_id, "Livreur created");

        Ok(LivreurAvecLien {
            livreur,
            lien_localisation: Some(lien),
        })
    }

    /// Mise à jour partielle du livreur
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        request: UpdateLivreurRequest,
    ) -> Result<livreur::Model, ApiError> {
        let existing = livreur::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Livreur introuvable"))?;

        if let Some(vendeur_id) = request.vendeur_id {
            ensure_vendeur_exists(db, vendeur_id).await?;
        }

        let mut active_model: livreur::ActiveModel = existing.clone().into();

        if let Some(nom) = request.nom {
            active_model.nom = Set(nom);
        }
        if let Some(prenom) = request.prenom {
            active_model.prenom = Set(prenom);
        }
        if let Some(numero) = request.numero_whatsapp {
            active_model.numero_whatsapp = Set(numero);
        }
        if let Some(vendeur_id) = request.vendeur_id {
            active_model.vendeur_id = Set(vendeur_id);
        }

        if !active_model.is_changed() {
            return Ok(existing);
        }

        Ok(active_model.update(db).await?)
    }

    /// Supprime le lien puis le livreur
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
        let txn = db.begin().await?;

        livreur::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ApiError::NotFound("Livreur introuvable"))?;

        lien_localisation::Entity::delete_many()
            .filter(lien_localisation::Column::LivreurId.eq(id))
            .exec(&txn)
            .await?;

        livreur::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(livreur_id = id, "Livreur deleted");
        Ok(())
    }
}

async fn ensure_vendeur_exists<C: ConnectionTrait>(db: &C, vendeur_id: i32) -> Result<(), ApiError> {
    match vendeur::Entity::find_by_id(vendeur_id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::BadRequest("vendeurId invalide".to_string())),
    }
}
