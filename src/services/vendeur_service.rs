use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::error::{is_unique_violation, ApiError};
use crate::models::dto::{CreateVendeurRequest, LivreurAvecLien, UpdateVendeurRequest, VendeurAvecLivreurs};
use crate::models::{lien_localisation, livreur, vendeur};
use crate::utils::{dates, password};

pub struct VendeurService;

impl VendeurService {
    /// Liste les vendeurs avec leurs livreurs et le lien de chaque livreur
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<VendeurAvecLivreurs>, ApiError> {
        let vendeurs = vendeur::Entity::find()
            .order_by_asc(vendeur::Column::Id)
            .all(db)
            .await?;

        Self::with_livreurs(db, vendeurs).await
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<VendeurAvecLivreurs, ApiError> {
        let vendeur = Self::find(db, id).await?;

        Self::with_livreurs(db, vec![vendeur])
            .await?
            .pop()
            .ok_or(ApiError::NotFound("Vendeur introuvable"))
    }

    pub async fn create(
        db: &DatabaseConnection,
        request: CreateVendeurRequest,
        iterations: u32,
    ) -> Result<vendeur::Model, ApiError> {
        // 1. Valider les dates
        let date_debut = parse_required_date(&request.date_debut, "dateDebut")?;
        let date_fin = match request.date_fin.as_deref() {
            Some(value) if !value.trim().is_empty() => Some(parse_required_date(value, "dateFin")?),
            _ => None,
        };

        // 2. Vérifier que l'email est libre
        Self::ensure_email_available(db, &request.email, None).await?;

        // 3. Hash le mot de passe
        let password_hash = password::hash_password(&request.password, iterations)
            .map_err(ApiError::Internal)?;

        // 4. Créer le vendeur
        let new_vendeur = vendeur::ActiveModel {
            nom: Set(request.nom),
            prenom: Set(request.prenom),
            email: Set(request.email),
            password_hash: Set(password_hash),
            actif: Set(request.actif.unwrap_or(true)),
            date_debut: Set(date_debut),
            date_fin: Set(date_fin),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let vendeur = new_vendeur.insert(db).await.map_err(email_conflict)?;
        tracing::info!(vendeur_id = vendeur.id, "Vendeur created");

        Ok(vendeur)
    }

    /// Mise à jour partielle : seuls les champs présents sont modifiés
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        request: UpdateVendeurRequest,
        iterations: u32,
    ) -> Result<vendeur::Model, ApiError> {
        let existing = Self::find(db, id).await?;

        if let Some(email) = request.email.as_deref() {
            if email != existing.email {
                Self::ensure_email_available(db, email, Some(id)).await?;
            }
        }

        let mut active_model: vendeur::ActiveModel = existing.clone().into();

        if let Some(nom) = request.nom {
            active_model.nom = Set(nom);
        }
        if let Some(prenom) = request.prenom {
            active_model.prenom = Set(prenom);
        }
        if let Some(email) = request.email {
            active_model.email = Set(email);
        }
        if let Some(plain) = request.password.filter(|p| !p.is_empty()) {
            let hash = password::hash_password(&plain, iterations).map_err(ApiError::Internal)?;
            active_model.password_hash = Set(hash);
        }
        if let Some(value) = request.date_debut.filter(|d| !d.trim().is_empty()) {
            active_model.date_debut = Set(parse_required_date(&value, "dateDebut")?);
        }
        match request.date_fin {
            Some(Some(value)) if !value.trim().is_empty() => {
                active_model.date_fin = Set(Some(parse_required_date(&value, "dateFin")?));
            }
            Some(_) => active_model.date_fin = Set(None),
            None => {}
        }
        if let Some(actif) = request.actif {
            active_model.actif = Set(actif);
        }

        if !active_model.is_changed() {
            return Ok(existing);
        }

        let vendeur = active_model.update(db).await.map_err(email_conflict)?;
        tracing::info!(vendeur_id = vendeur.id, actif = vendeur.actif, "Vendeur updated");

        Ok(vendeur)
    }

    /// Supprime le vendeur, ses livreurs et leurs liens (cascade explicite)
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
        let txn = db.begin().await?;

        let vendeur = vendeur::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ApiError::NotFound("Vendeur introuvable"))?;

        let livreur_ids: Vec<i32> = livreur::Entity::find()
            .filter(livreur::Column::VendeurId.eq(vendeur.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect();

        if !livreur_ids.is_empty() {
            lien_localisation::Entity::delete_many()
                .filter(lien_localisation::Column::LivreurId.is_in(livreur_ids.clone()))
                .exec(&txn)
                .await?;

            livreur::Entity::delete_many()
                .filter(livreur::Column::Id.is_in(livreur_ids.clone()))
                .exec(&txn)
                .await?;
        }

        vendeur::Entity::delete_by_id(vendeur.id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(vendeur_id = id, livreurs_deleted = livreur_ids.len(), "Vendeur deleted");
        Ok(())
    }

    pub async fn find(db: &DatabaseConnection, id: i32) -> Result<vendeur::Model, ApiError> {
        vendeur::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Vendeur introuvable"))
    }

    async fn ensure_email_available(
        db: &DatabaseConnection,
        email: &str,
        except_id: Option<i32>,
    ) -> Result<(), ApiError> {
        let mut query = vendeur::Entity::find().filter(vendeur::Column::Email.eq(email));
        if let Some(id) = except_id {
            query = query.filter(vendeur::Column::Id.ne(id));
        }

        match query.one(db).await? {
            Some(_) => Err(ApiError::Conflict("Email déjà utilisé")),
            None => Ok(()),
        }
    }

    /// Charge les livreurs et liens de plusieurs vendeurs en 2 requêtes
    async fn with_livreurs(
        db: &DatabaseConnection,
        vendeurs: Vec<vendeur::Model>,
    ) -> Result<Vec<VendeurAvecLivreurs>, ApiError> {
        if vendeurs.is_empty() {
            return Ok(Vec::new());
        }

        let vendeur_ids: Vec<i32> = vendeurs.iter().map(|v| v.id).collect();

        let livreurs = livreur::Entity::find()
            .filter(livreur::Column::VendeurId.is_in(vendeur_ids))
            .order_by_asc(livreur::Column::Id)
            .all(db)
            .await?;

        let livreur_ids: Vec<i32> = livreurs.iter().map(|l| l.id).collect();

        // HashMap pour lookup O(1) au lieu de N queries
        let mut liens: HashMap<i32, lien_localisation::Model> = lien_localisation::Entity::find()
            .filter(lien_localisation::Column::LivreurId.is_in(livreur_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|lien| (lien.livreur_id, lien))
            .collect();

        let mut par_vendeur: HashMap<i32, Vec<LivreurAvecLien>> = HashMap::new();
        for livreur in livreurs {
            let lien_localisation = liens.remove(&livreur.id);
            par_vendeur
                .entry(livreur.vendeur_id)
                .or_default()
                .push(LivreurAvecLien { livreur, lien_localisation });
        }

        Ok(vendeurs
            .into_iter()
            .map(|vendeur| VendeurAvecLivreurs {
                livreurs: par_vendeur.remove(&vendeur.id).unwrap_or_default(),
                vendeur,
            })
            .collect())
    }
}

/// Email pris par une requête concurrente après la vérification
fn email_conflict(err: DbErr) -> ApiError {
    if is_unique_violation(&err) {
        ApiError::Conflict("Email déjà utilisé")
    } else {
        err.into()
    }
}

fn parse_required_date(value: &str, field: &str) -> Result<DateTime<Utc>, ApiError> {
    dates::parse_date(value).ok_or_else(|| ApiError::BadRequest(format!("{} invalide", field)))
}
