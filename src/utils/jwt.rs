use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Deserialize, Serialize};
use chrono::{Utc, Duration};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,        // émis le (timestamp)
    pub exp: i64,        // expiration timestamp
}

/// Génère un JWT token pour l'administrateur, valable `ttl`
pub fn generate_token(email: &str, secret: &str, ttl: Duration) -> Result<String, String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or("Failed to calculate expiration")?
        .timestamp();

    let claims = Claims {
        email: email.to_string(),
        iat: now.timestamp(),
        exp: expiration,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
        .map_err(|e| format!("Failed to generate token: {}", e))
}

/// Vérifie et décode un JWT token (signature + expiration)
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
        .map(|data| data.claims)
        .map_err(|e| format!("Invalid token: {}", e))
}
