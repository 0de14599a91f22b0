use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::warn;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::types::{error::AppError, token::Claims};

/// Issues and checks HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_ttl_minutes),
            refresh_ttl: Duration::days(config.refresh_ttl_days),
        }
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Returns the encoded token and its lifetime in seconds.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<(String, i64), AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))?;
        Ok((token, self.access_ttl.num_seconds()))
    }

    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("rejected access token: {e}");
                AppError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(access_ttl_minutes: i64) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_ttl_minutes,
            refresh_ttl_days: 30,
        })
    }

    #[test]
    fn issued_token_decodes_to_the_same_user() {
        let jwt = service(15);
        let user = Uuid::new_v4();
        let (token, expires_in) = jwt.issue(user, "ana@example.com").unwrap();

        let claims = jwt.decode(&token).unwrap();
        assert_eq!(claims.user_id(), Some(user));
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(expires_in, 15 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = service(-10);
        let (token, _) = jwt.issue(Uuid::new_v4(), "ana@example.com").unwrap();
        assert!(matches!(jwt.decode(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = JwtService::new(&JwtConfig {
            secret: "someone-else".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 30,
        });
        let (token, _) = other.issue(Uuid::new_v4(), "eve@example.com").unwrap();
        assert!(service(15).decode(&token).is_err());
    }
}
