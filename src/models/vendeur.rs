// ============================================================================
// MODÈLE : VENDEUR
// ============================================================================
//
// Description:
//   Compte vendeur géré par l'administrateur. Un vendeur possède zéro ou
//   plusieurs livreurs.
//
// Colonnes de la table vendeurs:
//   - id (INTEGER, PRIMARY KEY)
//   - nom, prenom (VARCHAR, NOT NULL)
//   - email (VARCHAR, UNIQUE, NOT NULL)
//   - password_hash (VARCHAR, NOT NULL) - jamais exposé en JSON
//   - actif (BOOLEAN, NOT NULL)
//   - date_debut (TIMESTAMP, NOT NULL)
//   - date_fin (TIMESTAMP, NULL) - pas de fin si NULL
//   - created_at (TIMESTAMP, NOT NULL)
//
// Points d'attention:
//   - Le service public n'est disponible que si actif = true ET
//     date_debut <= maintenant <= date_fin (voir disponibilite)
//   - ON DELETE CASCADE vers livreurs
//
// ============================================================================

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "vendeurs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nom: String,

    pub prenom: String,

    #[sea_orm(unique)]
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub actif: bool,

    pub date_debut: DateTimeUtc,

    pub date_fin: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

/// Raison pour laquelle le service d'un vendeur est indisponible
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indisponibilite {
    Inactive,
    Expired,
    NotStarted,
}

impl Model {
    /// Vérifie si le vendeur est disponible à l'instant `now`.
    /// L'ordre des vérifications donne la raison renvoyée au client.
    pub fn disponibilite(&self, now: DateTime<Utc>) -> Result<(), Indisponibilite> {
        if !self.actif {
            return Err(Indisponibilite::Inactive);
        }

        if let Some(fin) = self.date_fin {
            if now > fin {
                return Err(Indisponibilite::Expired);
            }
        }

        if now < self.date_debut {
            return Err(Indisponibilite::NotStarted);
        }

        Ok(())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::livreur::Entity")]
    Livreur,
}

impl Related<super::livreur::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Livreur.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn vendeur(actif: bool, debut: DateTime<Utc>, fin: Option<DateTime<Utc>>) -> Model {
        Model {
            id: 1,
            nom: "Traoré".to_string(),
            prenom: "Awa".to_string(),
            email: "awa@locamali.ml".to_string(),
            password_hash: String::new(),
            actif,
            date_debut: debut,
            date_fin: fin,
            created_at: debut,
        }
    }

    #[test]
    fn test_disponible_dans_la_fenetre() {
        let now = Utc::now();
        let v = vendeur(true, now - Duration::days(1), Some(now + Duration::days(1)));
        assert_eq!(v.disponibilite(now), Ok(()));

        let sans_fin = vendeur(true, now - Duration::days(1), None);
        assert_eq!(sans_fin.disponibilite(now), Ok(()));
    }

    #[test]
    fn test_bornes_incluses() {
        let now = Utc::now();
        let v = vendeur(true, now, Some(now));
        assert_eq!(v.disponibilite(now), Ok(()));
    }

    #[test]
    fn test_inactif_prioritaire() {
        let now = Utc::now();
        // Inactif et expiré : la raison est "inactive"
        let v = vendeur(false, now - Duration::days(10), Some(now - Duration::days(1)));
        assert_eq!(v.disponibilite(now), Err(Indisponibilite::Inactive));
    }

    #[test]
    fn test_expire_et_pas_commence() {
        let now = Utc::now();
        let expire = vendeur(true, now - Duration::days(10), Some(now - Duration::seconds(1)));
        assert_eq!(expire.disponibilite(now), Err(Indisponibilite::Expired));

        let futur = vendeur(true, now + Duration::days(2), None);
        assert_eq!(futur.disponibilite(now), Err(Indisponibilite::NotStarted));
    }

    #[test]
    fn test_raison_serialisee() {
        let json = serde_json::to_string(&Indisponibilite::NotStarted).unwrap();
        assert_eq!(json, "\"not_started\"");
    }

    #[test]
    fn test_password_hash_non_expose() {
        let mut v = vendeur(true, Utc::now(), None);
        v.password_hash = "pbkdf2:sha256:1$abc$def".to_string();

        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["dateDebut"], serde_json::to_value(v.date_debut).unwrap());
    }
}
