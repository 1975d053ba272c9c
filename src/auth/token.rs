use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use bson::oid::ObjectId;
use hkdf::Hkdf;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::errors::AppError;
use crate::user::User;

const VERSION: u8 = 1;
const NONCE_LEN: usize = 12;

/// The reduced user projection embedded in a login token. Built from the
/// stored record; the password is not part of this type and can never be
/// encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub fullname: String,
    pub is_admin: bool,
}

impl AuthUser {
    pub(crate) fn reduced(user: &User) -> Result<Self, AppError> {
        let id = user.id.ok_or_else(|| AppError::Store("user without id".to_string()))?;
        Ok(Self {
            id,
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            is_admin: user.is_admin,
        })
    }
}

/// Issues and validates opaque login tokens: the reduced projection as JSON,
/// sealed with AES-256-GCM under a key derived from the configured secret
/// via HKDF-SHA256, hex-encoded behind a format-version byte.
pub struct TokenCodec {
    cipher: Aes256Gcm,
}

impl TokenCodec {
    /// Fails on an empty secret; there is no fallback key.
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.trim().is_empty() {
            return Err(AppError::Config("token secret must not be empty".to_string()));
        }
        let hk = Hkdf::<Sha256>::new(None, secret.as_bytes());
        let mut key: Zeroizing<[u8; 32]> = Zeroizing::new([0u8; 32]);
        hk.expand(b"toystore:token:v1", &mut *key)
            .map_err(|e| AppError::Config(format!("token key derivation: {e}")))?;
        let cipher = Aes256Gcm::new_from_slice(&*key)
            .map_err(|e| AppError::Config(format!("token key: {e}")))?;
        Ok(Self { cipher })
    }

    pub fn issue(&self, user: &AuthUser) -> Result<String, AppError> {
        let claims =
            serde_json::to_vec(user).map_err(|e| AppError::Token(e.to_string()))?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ct = self
            .cipher
            .encrypt(&nonce, claims.as_ref())
            .map_err(|e| AppError::Token(format!("encrypt: {e}")))?;
        let mut buf = Vec::with_capacity(1 + NONCE_LEN + ct.len());
        buf.push(VERSION);
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(&ct);
        Ok(hex::encode(buf))
    }

    /// Total from the caller's perspective: malformed input, a wrong key or a
    /// corrupt ciphertext all yield `None`, never an error.
    pub fn validate(&self, token: &str) -> Option<AuthUser> {
        let raw = hex::decode(token).ok()?;
        if raw.len() <= 1 + NONCE_LEN || raw[0] != VERSION {
            log::warn!("invalid login token");
            return None;
        }
        let nonce = Nonce::from_slice(&raw[1..1 + NONCE_LEN]);
        let claims = self.cipher.decrypt(nonce, &raw[1 + NONCE_LEN..]).ok()?;
        serde_json::from_slice(&claims).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthUser {
        AuthUser {
            id: ObjectId::new(),
            username: "muki".to_string(),
            fullname: "Muki Purple".to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn issue_then_validate_round_trips() {
        let codec = TokenCodec::new("unit-test-secret").unwrap();
        let user = sample_user();
        let token = codec.issue(&user).unwrap();
        assert_eq!(codec.validate(&token), Some(user));
    }

    #[test]
    fn token_is_opaque_and_password_free() {
        let codec = TokenCodec::new("unit-test-secret").unwrap();
        let token = codec.issue(&sample_user()).unwrap();
        // Hex only, no trace of the claims in the clear.
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!token.contains("muki"));
        assert!(!token.contains("password"));
    }

    #[test]
    fn garbage_input_yields_none() {
        let codec = TokenCodec::new("unit-test-secret").unwrap();
        assert_eq!(codec.validate(""), None);
        assert_eq!(codec.validate("not hex at all!"), None);
        assert_eq!(codec.validate("deadbeef"), None);
        // Valid hex, wrong version byte.
        assert_eq!(codec.validate(&hex::encode([9u8; 40])), None);
    }

    #[test]
    fn wrong_key_yields_none() {
        let a = TokenCodec::new("secret-a").unwrap();
        let b = TokenCodec::new("secret-b").unwrap();
        let token = a.issue(&sample_user()).unwrap();
        assert_eq!(b.validate(&token), None);
    }

    #[test]
    fn corrupt_ciphertext_yields_none() {
        let codec = TokenCodec::new("unit-test-secret").unwrap();
        let mut token = codec.issue(&sample_user()).unwrap();
        let flipped = if token.ends_with('0') { '1' } else { '0' };
        token.pop();
        token.push(flipped);
        assert_eq!(codec.validate(&token), None);
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(TokenCodec::new(""), Err(AppError::Config(_))));
        assert!(matches!(TokenCodec::new("   "), Err(AppError::Config(_))));
    }
}
