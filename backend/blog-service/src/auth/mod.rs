/// Session tokens for Blog Service
///
/// Tokens are HS256 JWTs signed with the server secret. The claim set is
/// whatever object the client posted to `/jwt`, plus `iat` and `exp`. The
/// token travels only in the `token` cookie, never in a response body.
use crate::config::SessionConfig;
use crate::error::{AppError, Result};
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

// ============================================================================
// Constants
// ============================================================================

pub const SESSION_COOKIE: &str = "token";

const SESSION_EXPIRY_HOURS: i64 = 5;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Claims
// ============================================================================

/// Decoded session claims, attached to the request by the session middleware.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionClaims(pub Map<String, Value>);

impl SessionClaims {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `email` claim, which the client app uses as the user identity.
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }
}

// ============================================================================
// Issuer / verifier
// ============================================================================

/// Signs and verifies session tokens and builds the cookies carrying them.
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    cross_site: bool,
}

impl SessionManager {
    pub fn new(cfg: &SessionConfig) -> Self {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.leeway = 0;
        // Claims are client-chosen; an `aud` in them is carried, not enforced
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(cfg.secret.as_bytes()),
            validation,
            cross_site: cfg.cross_site,
        }
    }

    /// Sign `payload` with a fixed five hour lifetime.
    ///
    /// Any `iat`/`exp` the client sent is overwritten.
    pub fn issue(&self, mut payload: Map<String, Value>) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(SESSION_EXPIRY_HOURS);
        payload.insert("iat".to_string(), Value::from(now.timestamp()));
        payload.insert("exp".to_string(), Value::from(exp.timestamp()));

        Ok(encode(&Header::new(JWT_ALGORITHM), &payload, &self.encoding_key)?)
    }

    /// Check signature and expiry and return the claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map(|data| SessionClaims(data.claims))
            .map_err(|e| {
                tracing::debug!(error = %e, "session token rejected");
                AppError::Unauthorized("invalid or expired token".to_string())
            })
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        self.cookie_builder(token).finish()
    }

    /// Expired replacement cookie used to log a session out.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        self.cookie_builder(String::new())
            .max_age(CookieDuration::ZERO)
            .finish()
    }

    fn cookie_builder(&self, value: String) -> actix_web::cookie::CookieBuilder<'static> {
        let same_site = if self.cross_site {
            SameSite::None
        } else {
            SameSite::Strict
        };

        Cookie::build(SESSION_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.cross_site)
            .same_site(same_site)
    }
}
