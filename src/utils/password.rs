use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_ITERATIONS: u32 = 260000;
const KEY_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;

/// Hash stocké, une fois analysé
enum StoredHash<'a> {
    Bcrypt(&'a str),
    Pbkdf2 {
        iterations: u32,
        salt: Vec<u8>,
        key: Vec<u8>,
    },
}

/// Hash au format Werkzeug : `pbkdf2:sha256:<iterations>$<salt>$<hash>`
/// (salt et hash en base64 URL-safe sans padding)
pub fn hash_password(password: &str, iterations: u32) -> Result<String, String> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill(&mut salt);

    let key = derive(password, &salt, iterations, KEY_LENGTH)?;

    Ok(format!(
        "pbkdf2:sha256:{}${}${}",
        iterations,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(key)
    ))
}

/// Vérifie un mot de passe contre un hash PBKDF2 (Werkzeug) ou bcrypt ($2a$, $2b$, $2y$).
/// Un hash illisible est une erreur, pas un simple refus.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, String> {
    match parse_stored(stored_hash)? {
        StoredHash::Bcrypt(hash) => {
            bcrypt::verify(password, hash).map_err(|e| format!("Invalid bcrypt hash: {}", e))
        }
        StoredHash::Pbkdf2 { iterations, salt, key } => {
            let computed = derive(password, &salt, iterations, key.len())?;
            Ok(constant_time_eq(&computed, &key))
        }
    }
}

fn parse_stored(stored: &str) -> Result<StoredHash<'_>, String> {
    if stored.starts_with("$2") {
        return Ok(StoredHash::Bcrypt(stored));
    }

    let mut sections = stored.split('$');
    let (Some(method), Some(salt), Some(key), None) =
        (sections.next(), sections.next(), sections.next(), sections.next())
    else {
        return Err("Invalid hash format".to_string());
    };

    let iterations = match method.split(':').collect::<Vec<_>>().as_slice() {
        ["pbkdf2", "sha256", n] => n.parse::<u32>().map_err(|_| "Invalid iterations".to_string())?,
        _ => return Err(format!("Unsupported hash method: {}", method)),
    };

    let key = decode_part(key)?;
    if key.is_empty() {
        return Err("Empty hash".to_string());
    }

    Ok(StoredHash::Pbkdf2 {
        iterations,
        salt: decode_part(salt)?,
        key,
    })
}

fn derive(password: &str, salt: &[u8], iterations: u32, length: usize) -> Result<Vec<u8>, String> {
    let mut key = vec![0u8; length];
    pbkdf2::<HmacSha256>(password.as_bytes(), salt, iterations, &mut key)
        .map_err(|e| format!("PBKDF2 failed: {}", e))?;
    Ok(key)
}

/// Les hash générés ailleurs encodent le digest en hexadécimal (64 caractères)
/// ou en base64 standard / URL-safe, avec ou sans padding.
fn decode_part(input: &str) -> Result<Vec<u8>, String> {
    if input.len() == KEY_LENGTH * 2 && input.chars().all(|c| c.is_ascii_hexdigit()) {
        return hex::decode(input).map_err(|e| format!("Hex decode failed: {}", e));
    }

    let trimmed = input.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|_| format!("Undecodable hash section: {}", input))
}

/// La durée ne dépend pas de la position du premier octet différent
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
