use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token claims. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl TokenPair {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self { access_token, refresh_token, token_type: "Bearer".to_string(), expires_in }
    }
}

/// Refresh tokens travel as `base64("<row id>.<secret>")`.
pub fn construct_token(id: &str, secret: &str) -> String {
    URL_SAFE_NO_PAD.encode(format!("{id}.{secret}"))
}

pub fn extract_token_parts(token: &str) -> Option<(String, String)> {
    let raw = URL_SAFE_NO_PAD.decode(token.trim()).ok()?;
    let raw = String::from_utf8(raw).ok()?;
    let (id, secret) = raw.split_once('.')?;
    if id.is_empty() || secret.is_empty() {
        return None;
    }
    Some((id.to_string(), secret.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_parts_survive_construction() {
        let token = construct_token("abc123", "tok_secret-value");
        assert_eq!(
            extract_token_parts(&token),
            Some(("abc123".to_string(), "tok_secret-value".to_string()))
        );
    }

    #[test]
    fn garbage_tokens_have_no_parts() {
        assert_eq!(extract_token_parts("not base64 at all!"), None);
        assert_eq!(extract_token_parts(&URL_SAFE_NO_PAD.encode("no-separator")), None);
        assert_eq!(extract_token_parts(&URL_SAFE_NO_PAD.encode(".secret")), None);
    }
}
