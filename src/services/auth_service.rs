// ============================================================================
// SERVICE : AUTHENTIFICATION ADMIN
// ============================================================================
//
// Description:
//   Vérifie les identifiants admin via une chaîne ordonnée de fournisseurs:
//     1. DatabaseAdminProvider : table admins
//     2. EnvAdminProvider : ADMIN_EMAIL / ADMIN_PASSWORD_HASH
//   Le premier fournisseur qui connaît l'email décide : un mauvais mot de
//   passe ne passe pas au fournisseur suivant.
//
// Points d'attention:
//   - Email inconnu et mauvais mot de passe renvoient la même erreur
//   - Une erreur BD est loggée puis traitée comme "inconnu"
//
// ============================================================================

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::admin;
use crate::utils::password;

/// Identifiants connus d'un fournisseur
#[derive(Debug, Clone)]
pub struct AdminCredential {
    pub email: String,
    pub password_hash: String,
}

//trait = Interface
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Some si ce fournisseur connaît l'email, None sinon
    async fn lookup(&self, email: &str) -> Result<Option<AdminCredential>, ApiError>;
}

pub struct DatabaseAdminProvider {
    db: DatabaseConnection,
}

impl DatabaseAdminProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialProvider for DatabaseAdminProvider {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn lookup(&self, email: &str) -> Result<Option<AdminCredential>, ApiError> {
        let admin = admin::Entity::find()
            .filter(admin::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(admin.map(|a| AdminCredential {
            email: a.email,
            password_hash: a.password_hash,
        }))
    }
}

pub struct EnvAdminProvider {
    email: Option<String>,
    password_hash: Option<String>,
}

impl EnvAdminProvider {
    pub fn new(email: Option<String>, password_hash: Option<String>) -> Self {
        Self { email, password_hash }
    }
}

#[async_trait]
impl CredentialProvider for EnvAdminProvider {
    fn name(&self) -> &'static str {
        "environment"
    }

    async fn lookup(&self, email: &str) -> Result<Option<AdminCredential>, ApiError> {
        // Les deux variables doivent être définies
        let (Some(env_email), Some(hash)) = (&self.email, &self.password_hash) else {
            return Ok(None);
        };

        if env_email != email {
            return Ok(None);
        }

        Ok(Some(AdminCredential {
            email: env_email.clone(),
            password_hash: hash.clone(),
        }))
    }
}

pub struct AuthService {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl AuthService {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    /// Chaîne standard : admin en base, puis admin de l'environnement
    pub fn from_config(db: DatabaseConnection, config: &AppConfig) -> Self {
        Self::new(vec![
            Box::new(DatabaseAdminProvider::new(db)),
            Box::new(EnvAdminProvider::new(
                config.admin_email.clone(),
                config.admin_password_hash.clone(),
            )),
        ])
    }

    /// Vérifie les identifiants et retourne l'email de l'admin authentifié
    pub async fn authenticate(&self, email: &str, plain_password: &str) -> Result<String, ApiError> {
        for provider in &self.providers {
            // 1. Chercher l'email chez ce fournisseur
            let credential = match provider.lookup(email).await {
                Ok(Some(credential)) => credential,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "Credential lookup failed, trying next provider");
                    continue;
                }
            };

            // 2. Vérifier le mot de passe (pas de repli si incorrect)
            let is_valid = password::verify_password(plain_password, &credential.password_hash)
                .map_err(|e| {
                    tracing::error!(provider = provider.name(), error = %e, "Stored admin hash is unreadable");
                    ApiError::Internal(format!("Password verification error: {}", e))
                })?;

            if !is_valid {
                tracing::warn!(provider = provider.name(), "Login failed: invalid password");
                return Err(ApiError::InvalidCredentials);
            }

            tracing::info!(provider = provider.name(), "Admin authenticated");
            return Ok(credential.email);
        }

        tracing::warn!("Login failed: unknown admin email");
        Err(ApiError::InvalidCredentials)
    }
}
