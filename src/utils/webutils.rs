use std::future::{ready, Ready};

use actix_web::{
    dev::{Payload, ServiceRequest},
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web, FromRequest, HttpMessage, HttpRequest,
};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use tracing::error;
use uuid::Uuid;

use crate::types::{error::AppError, token::Claims};
use crate::utils::jwt::JwtService;

/// Bearer validator for `HttpAuthentication`. Stores the decoded claims in the request
/// extensions for `AuthUser` to pick up. A missing or non-bearer `Authorization` header
/// arrives as `None` and is answered with the same envelope as a bad token.
pub async fn validate_token(
    req: ServiceRequest,
    credentials: Option<BearerAuth>,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let Some(credentials) = credentials else {
        return Err((AppError::Unauthorized.into(), req));
    };

    let jwt = req.app_data::<web::Data<JwtService>>().cloned();
    let Some(jwt) = jwt else {
        error!("JwtService missing from app data");
        return Err((AppError::Internal("auth not configured".into()).into(), req));
    };

    match jwt.decode(credentials.token()) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(req)
        }
        Err(err) => Err((err.into(), req)),
    }
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<Claims>()
            .and_then(|claims| {
                claims.user_id().map(|id| AuthUser { id, email: claims.email.clone() })
            })
            .ok_or(AppError::Unauthorized);
        ready(user)
    }
}

/// Extractor configs that route body/path/query failures through the `AppError` envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err: JsonPayloadError, _| AppError::BadRequest(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err: PathError, _| AppError::BadRequest(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _| AppError::BadRequest(err.to_string()).into())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
