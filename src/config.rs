// ============================================================================
// CONFIGURATION
// ============================================================================
//
// Description:
//   Configuration de l'application, construite une seule fois au démarrage
//   à partir des variables d'environnement (après chargement du .env),
//   puis passée aux composants via web::Data.
//
// Variables:
//   - DATABASE_URL (obligatoire)
//   - HOST, PORT
//   - JWT_SECRET
//   - ADMIN_EMAIL, ADMIN_PASSWORD_HASH : admin de secours
//   - CORS_ORIGIN ("*" = toutes les origines)
//   - APP_ENV / NODE_ENV ("production" active le cookie Secure)
//   - SESSION_TTL_DAYS, PASSWORD_HASH_ITERATIONS
//
// ============================================================================

use std::env;

use thiserror::Error;

use crate::utils::password::DEFAULT_ITERATIONS;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_SESSION_TTL_DAYS: i64 = 30;
const MAX_SESSION_TTL_DAYS: i64 = 3650;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password_hash: Option<String>,
    pub cors_origin: String,
    pub production: bool,
    pub session_ttl_days: i64,
    pub password_iterations: u32,
}

impl AppConfig {
    /// Lit la configuration depuis les variables d'environnement du process
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construit la configuration à partir d'une fonction de lecture
    /// (permet de tester sans toucher à l'environnement global)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Les valeurs vides sont traitées comme absentes
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match get("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        // La durée doit rester représentable (cookie, JWT et date d'expiration)
        let session_ttl_days = match get("SESSION_TTL_DAYS") {
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0 && *days <= MAX_SESSION_TTL_DAYS)
                .ok_or(ConfigError::InvalidNumber { name: "SESSION_TTL_DAYS", value })?,
            None => DEFAULT_SESSION_TTL_DAYS,
        };

        let password_iterations = parse_iterations(get("PASSWORD_HASH_ITERATIONS"))?;

        let production = get("APP_ENV")
            .or_else(|| get("NODE_ENV"))
            .is_some_and(|value| value.eq_ignore_ascii_case("production"));

        Ok(Self {
            database_url,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            jwt_secret: get("JWT_SECRET"),
            admin_email: get("ADMIN_EMAIL"),
            admin_password_hash: get("ADMIN_PASSWORD_HASH"),
            cors_origin: get("CORS_ORIGIN").unwrap_or_else(|| "*".to_string()),
            production,
            session_ttl_days,
            password_iterations,
        })
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.session_ttl_days)
    }

    /// PASSWORD_HASH_ITERATIONS seul, pour les outils qui n'ont pas besoin de la base
    pub fn password_iterations_from_env() -> Result<u32, ConfigError> {
        parse_iterations(env::var("PASSWORD_HASH_ITERATIONS").ok().filter(|v| !v.trim().is_empty()))
    }
}

fn parse_iterations(value: Option<String>) -> Result<u32, ConfigError> {
    match value {
        Some(value) => value
            .parse::<u32>()
            .ok()
            .filter(|iterations| *iterations > 0)
            .ok_or(ConfigError::InvalidNumber { name: "PASSWORD_HASH_ITERATIONS", value }),
        None => Ok(DEFAULT_ITERATIONS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4000);
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.session_ttl_days, 30);
        assert_eq!(config.password_iterations, DEFAULT_ITERATIONS);
        assert!(config.jwt_secret.is_none());
        assert!(!config.production);
    }

    #[test]
    fn test_missing_database_url() {
        let result = AppConfig::from_lookup(lookup(&[("PORT", "8080")]));
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn test_invalid_port() {
        let result = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "abc"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidNumber { name: "PORT", .. })));
    }

    #[test]
    fn test_session_ttl_bounds() {
        for value in ["0", "-3", "3651", "200000000000", "abc"] {
            let result = AppConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("SESSION_TTL_DAYS", value),
            ]));
            assert!(
                matches!(result, Err(ConfigError::InvalidNumber { name: "SESSION_TTL_DAYS", .. })),
                "{}",
                value
            );
        }

        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SESSION_TTL_DAYS", "3650"),
        ]))
        .unwrap();
        assert_eq!(config.session_ttl(), chrono::Duration::days(3650));
    }

    #[test]
    fn test_invalid_iterations() {
        assert!(matches!(
            parse_iterations(Some("beaucoup".to_string())),
            Err(ConfigError::InvalidNumber { name: "PASSWORD_HASH_ITERATIONS", .. })
        ));
        assert!(parse_iterations(Some("0".to_string())).is_err());
        assert_eq!(parse_iterations(Some("1000".to_string())).unwrap(), 1000);
        assert_eq!(parse_iterations(None).unwrap(), DEFAULT_ITERATIONS);
    }

    #[test]
    fn test_production_and_empty_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/locamali"),
            ("NODE_ENV", "production"),
            ("JWT_SECRET", "   "),
            ("ADMIN_EMAIL", "admin@locamali.ml"),
        ]))
        .unwrap();

        assert!(config.production);
        assert!(config.jwt_secret.is_none());
        assert_eq!(config.admin_email.as_deref(), Some("admin@locamali.ml"));
    }
}
