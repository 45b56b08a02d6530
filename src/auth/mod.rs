use axum::{
    Json, async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::config::config_loader;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

const USER_TOKEN_DAYS: i64 = 30;
const ADMIN_TOKEN_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub phone: Option<String>,
    pub role: String,
    pub exp: usize,
}

/// Authenticated storefront customer, extracted from `Authorization: Bearer`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub phone: Option<String>,
}

/// Authenticated back-office principal.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub username: String,
}

#[derive(Debug)]
pub struct AuthError {
    pub status: StatusCode,
    pub message: String,
}

impl AuthError {
    fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
    }

    fn forbidden(message: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "success": false, "message": self.message })),
        )
            .into_response()
    }
}

pub fn issue_user_token(secret: &str, user_id: Uuid, phone: &str) -> anyhow::Result<String> {
    let exp = Utc::now() + Duration::days(USER_TOKEN_DAYS);
    let claims = Claims {
        sub: user_id.to_string(),
        phone: Some(phone.to_string()),
        role: ROLE_USER.to_string(),
        exp: exp.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn issue_admin_token(secret: &str, username: &str) -> anyhow::Result<String> {
    let exp = Utc::now() + Duration::hours(ADMIN_TOKEN_HOURS);
    let claims = Claims {
        sub: username.to_string(),
        phone: None,
        role: ROLE_ADMIN.to_string(),
        exp: exp.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn validate_token(secret: &str, token: &str) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

fn bearer_token(parts: &Parts) -> Result<String, AuthError> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| AuthError::unauthorized("Authentication required"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::unauthorized("Invalid Authorization header"))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::unauthorized("Invalid Authorization header format"))?;

    Ok(token.to_string())
}

fn decode_request_claims(parts: &Parts) -> Result<Claims, AuthError> {
    let token = bearer_token(parts)?;

    let secret = config_loader::get_jwt_secret()
        .map_err(|_| AuthError::unauthorized("Invalid or expired token"))?;

    validate_token(&secret.secret, &token)
        .map_err(|_| AuthError::unauthorized("Invalid or expired token"))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = decode_request_claims(parts)?;

        if claims.role != ROLE_USER {
            return Err(AuthError::forbidden("User access required"));
        }

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::unauthorized("Invalid user ID in token"))?;

        Ok(AuthUser {
            user_id,
            phone: claims.phone,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = decode_request_claims(parts)?;

        if claims.role != ROLE_ADMIN {
            return Err(AuthError::forbidden("Admin access required"));
        }

        Ok(AuthAdmin {
            username: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests;
