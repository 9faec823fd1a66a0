use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{auth::repo::Role, error::ApiError, state::AppState};

/// Identity asserted by a signed token. Field names match the JSON the
/// admin UI stores and sends back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    /// Role gate applied by admin-only endpoints. The auth gate itself only
    /// establishes identity; every caller decides what that identity may do.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::User => {
                warn!(user_id = self.user_id, "rejected non-admin token");
                Err(ApiError::auth("Authentication required"))
            }
        }
    }
}

/// Signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let jwt = &state.config.jwt;
        JwtKeys::new(&jwt.secret, Duration::from_secs((jwt.ttl_hours as u64) * 3600))
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a token asserting the given identity, expiring `ttl` from now.
    pub fn sign(&self, user_id: i32, username: &str, role: Role) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            user_id,
            username: username.to_string(),
            role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    /// Decode and validate a token. Fails closed: malformed, tampered and
    /// expired tokens all come back as `None`, never as an error.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding, &Validation::default()) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "jwt rejected");
                None
            }
        }
    }
}

/// Turn an `Authorization` header value into a verified identity. The
/// `Bearer ` prefix is optional; a bare token is accepted as well.
pub fn authorize(header: Option<&str>, keys: &JwtKeys) -> Option<Claims> {
    let raw = header?.trim();
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);
    keys.verify(token)
}

/// Extractor for endpoints that need an authenticated caller. Rejects with
/// 401 before the handler body runs, so persistence is never touched on an
/// unauthenticated request.
pub struct AuthClaims(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        match authorize(header, &keys) {
            Some(claims) => Ok(AuthClaims(claims)),
            None => {
                warn!("missing or invalid bearer token");
                Err(ApiError::auth("Authentication required"))
            }
        }
    }
}
