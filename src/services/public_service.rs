use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::error::ApiError;
use crate::models::dto::{PublicLivreur, PublicVendeur};
use crate::models::{lien_localisation, livreur, vendeur};
use crate::utils::whatsapp;

pub struct PublicService;

impl PublicService {
    /// Résout un token public :
    ///   1. token inconnu -> 404
    ///   2. vendeur indisponible (inactif, expiré, pas commencé) -> 403, sans effet de bord
    ///   3. sinon clicks + 1 et projection publique du livreur
    pub async fn resolve(
        db: &DatabaseConnection,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<PublicLivreur, ApiError> {
        // 1. Trouver le lien et son livreur
        let (lien, livreur) = lien_localisation::Entity::find()
            .filter(lien_localisation::Column::Token.eq(token))
            .find_also_related(livreur::Entity)
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Lien introuvable"))?;

        let livreur = livreur.ok_or(ApiError::NotFound("Vendeur introuvable"))?;

        let vendeur = vendeur::Entity::find_by_id(livreur.vendeur_id)
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Vendeur introuvable"))?;

        // 2. Règle de disponibilité
        if let Err(reason) = vendeur.disponibilite(now) {
            tracing::info!(lien_id = lien.id, ?reason, "Public link refused");
            return Err(ApiError::ServiceIndisponible(reason));
        }

        // 3. Compter le clic
        Self::record_click(db, lien.id).await?;

        Ok(PublicLivreur {
            id: livreur.id,
            lien_whatsapp: whatsapp::lien_whatsapp(livreur.numero_whatsapp.as_deref()),
            nom: livreur.nom,
            prenom: livreur.prenom,
            numero_whatsapp: livreur.numero_whatsapp,
            vendeur: PublicVendeur {
                nom: vendeur.nom,
                prenom: vendeur.prenom,
                actif: vendeur.actif,
                date_debut: vendeur.date_debut,
                date_fin: vendeur.date_fin,
            },
        })
    }

    /// Incrément atomique (UPDATE ... SET clicks = clicks + 1).
    /// Aucune ligne touchée : le lien a été supprimé ou régénéré entre-temps.
    pub async fn record_click(db: &DatabaseConnection, lien_id: i32) -> Result<(), ApiError> {
        let result = lien_localisation::Entity::update_many()
            .col_expr(
                lien_localisation::Column::Clicks,
                Expr::col(lien_localisation::Column::Clicks).add(1),
            )
            .filter(lien_localisation::Column::Id.eq(lien_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ApiError::NotFound("Lien introuvable"));
        }

        Ok(())
    }
}
