//pour les requêtes et réponses structurées
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::{lien_localisation, livreur, vendeur};

/// Distingue un champ absent (None) d'un champ explicitement null (Some(None))
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Authentification
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub email: String,
}

// ---------------------------------------------------------------------------
// Vendeurs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendeurRequest {
    #[validate(length(min = 1, message = "nom requis"))]
    pub nom: String,
    #[validate(length(min = 1, message = "prenom requis"))]
    pub prenom: String,
    #[validate(email(message = "email invalide"))]
    pub email: String,
    #[validate(length(min = 1, message = "mot de passe requis"))]
    pub password: String,
    pub date_debut: String,         // RFC 3339 ou "2025-01-31"
    pub date_fin: Option<String>,
    pub actif: Option<bool>,        // true par défaut
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendeurRequest {
    #[validate(length(min = 1, message = "nom requis"))]
    pub nom: Option<String>,
    #[validate(length(min = 1, message = "prenom requis"))]
    pub prenom: Option<String>,
    #[validate(email(message = "email invalide"))]
    pub email: Option<String>,
    pub password: Option<String>,   // re-hashé si présent et non vide
    pub date_debut: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub date_fin: Option<Option<String>>, // null = supprimer la date de fin
    pub actif: Option<bool>,
}

// ---------------------------------------------------------------------------
// Livreurs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLivreurRequest {
    #[validate(length(min = 1, message = "nom requis"))]
    pub nom: String,
    pub prenom: Option<String>,
    #[serde(rename = "numeroWhatsApp")]
    pub numero_whatsapp: Option<String>,
    pub vendeur_id: i32,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLivreurRequest {
    #[validate(length(min = 1, message = "nom requis"))]
    pub nom: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub prenom: Option<Option<String>>,
    #[serde(default, rename = "numeroWhatsApp", deserialize_with = "deserialize_some")]
    pub numero_whatsapp: Option<Option<String>>,
    pub vendeur_id: Option<i32>,
}

// ---------------------------------------------------------------------------
// Liens
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLienRequest {
    pub livreur_id: Option<i32>,
}

// ---------------------------------------------------------------------------
// Réponses admin (modèles + relations)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivreurAvecLien {
    #[serde(flatten)]
    pub livreur: livreur::Model,
    pub lien_localisation: Option<lien_localisation::Model>,
}

#[derive(Debug, Serialize)]
pub struct VendeurAvecLivreurs {
    #[serde(flatten)]
    pub vendeur: vendeur::Model,
    pub livreurs: Vec<LivreurAvecLien>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivreurDetail {
    #[serde(flatten)]
    pub livreur: livreur::Model,
    pub vendeur: Option<vendeur::Model>,
    pub lien_localisation: Option<lien_localisation::Model>,
}

#[derive(Debug, Serialize)]
pub struct LienAvecLivreur {
    #[serde(flatten)]
    pub lien: lien_localisation::Model,
    pub livreur: Option<livreur::Model>,
}

// ---------------------------------------------------------------------------
// Réponse publique (aucun hash, aucun id interne sauf celui du livreur)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicVendeur {
    pub nom: String,
    pub prenom: String,
    pub actif: bool,
    pub date_debut: DateTime<Utc>,
    pub date_fin: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLivreur {
    pub id: i32,
    pub nom: String,
    pub prenom: Option<String>,
    #[serde(rename = "numeroWhatsApp")]
    pub numero_whatsapp: Option<String>,
    #[serde(rename = "lienWhatsApp")]
    pub lien_whatsapp: String,
    pub vendeur: PublicVendeur,
}

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagEnv {
    pub database_url: bool,
    pub jwt_secret: bool,
    pub admin_email: bool,
    pub admin_password_hash: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagResponse {
    pub ok: bool,
    pub env: DiagEnv,
    pub cors_origin: String,
    pub production: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_fin_absente_ou_null() {
        let absente: UpdateVendeurRequest = serde_json::from_str(r#"{"actif": false}"#).unwrap();
        assert_eq!(absente.date_fin, None);
        assert_eq!(absente.actif, Some(false));

        let nulle: UpdateVendeurRequest = serde_json::from_str(r#"{"dateFin": null}"#).unwrap();
        assert_eq!(nulle.date_fin, Some(None));

        let valeur: UpdateVendeurRequest =
            serde_json::from_str(r#"{"dateFin": "2030-01-01"}"#).unwrap();
        assert_eq!(valeur.date_fin, Some(Some("2030-01-01".to_string())));
    }

    #[test]
    fn test_validation_vendeur() {
        let request: CreateVendeurRequest = serde_json::from_str(
            r#"{"nom": "", "prenom": "Awa", "email": "pas-un-email", "password": "x", "dateDebut": "2025-01-01"}"#,
        )
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("nom"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("prenom"));
    }

    #[test]
    fn test_livreur_camel_case() {
        let request: CreateLivreurRequest = serde_json::from_str(
            r#"{"nom": "Diarra", "numeroWhatsApp": "+223 70 00 00 00", "vendeurId": 3}"#,
        )
        .unwrap();
        assert_eq!(request.vendeur_id, 3);
        assert_eq!(request.numero_whatsapp.as_deref(), Some("+223 70 00 00 00"));
    }
}
