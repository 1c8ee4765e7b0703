// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Admin authentication
//!
//! A single fixed credential pair is exchanged for an HS256 JWT. Tokens are
//! stateless: there is no session store and no revocation, a token is good
//! until its signature or expiry check fails.

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ADMIN_USERNAME: &str = "Camryn";
const ADMIN_PASSWORD: &str = "Elliot";

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn credentials_match(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}

/// Issues and verifies admin tokens with a server-held secret
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user: &str) -> ServerResult<String> {
        self.issue_at(user, Utc::now())
    }

    pub fn issue_at(&self, user: &str, now: DateTime<Utc>) -> ServerResult<String> {
        let claims = Claims {
            user: user.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| ServerError::Internal(format!("Failed to generate token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> ServerResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Check signature and expiry against `now`. A token is valid while
    /// `now < exp`, with no leeway. Every failure maps to the same error.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> ServerResult<Claims> {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token verification failed");
                ServerError::InvalidToken
            })?;

        if claims.exp <= now.timestamp() {
            debug!(user = %claims.user, exp = claims.exp, "Token expired");
            return Err(ServerError::InvalidToken);
        }

        Ok(claims)
    }
}

/// Extract the token from `Authorization: <scheme> <token>`
pub fn bearer_token(headers: &HeaderMap) -> ServerResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(ServerError::MissingToken)?;
    let value = value.to_str().map_err(|_| ServerError::InvalidToken)?;

    value.split_whitespace().nth(1).ok_or(ServerError::InvalidToken)
}

/// Authentication middleware for the protected route group
///
/// On success the verified [`Claims`] are available as a request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> ServerResult<Response> {
    let claims = match bearer_token(req.headers()).and_then(|token| state.tokens.verify(token)) {
        Ok(claims) => claims,
        Err(err) => {
            debug!(path = %req.uri().path(), reason = %err, "Rejected unauthenticated request");
            return Err(err);
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", Duration::hours(24))
    }

    #[test]
    fn only_the_fixed_pair_matches() {
        assert!(credentials_match("Camryn", "Elliot"));
        assert!(!credentials_match("camryn", "Elliot"));
        assert!(!credentials_match("Camryn", "elliot"));
        assert!(!credentials_match("", ""));
    }

    #[test]
    fn issued_token_verifies_and_carries_user() {
        let issuer = issuer();
        let now = Utc::now();
        let token = issuer.issue_at(ADMIN_USERNAME, now).unwrap();

        let claims = issuer.verify_at(&token, now).unwrap();
        assert_eq!(claims.user, ADMIN_USERNAME);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn token_expires_at_twenty_four_hours() {
        let issuer = issuer();
        let issued = Utc::now();
        let token = issuer.issue_at(ADMIN_USERNAME, issued).unwrap();

        let almost = issued + Duration::hours(23) + Duration::minutes(59);
        assert!(issuer.verify_at(&token, almost).is_ok());

        let past = issued + Duration::hours(24) + Duration::minutes(1);
        assert!(matches!(
            issuer.verify_at(&token, past),
            Err(ServerError::InvalidToken)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let forged = TokenIssuer::new("someone-else", Duration::hours(24))
            .issue(ADMIN_USERNAME)
            .unwrap();
        assert!(matches!(issuer().verify(&forged), Err(ServerError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            issuer().verify("not.a.jwt"),
            Err(ServerError::InvalidToken)
        ));
    }

    #[test]
    fn bearer_token_takes_second_segment() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def");

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Token xyz"));
        assert_eq!(bearer_token(&headers).unwrap(), "xyz");
    }

    #[test]
    fn bearer_token_rejects_malformed_headers() {
        let headers = HeaderMap::new();
        assert!(matches!(bearer_token(&headers), Err(ServerError::MissingToken)));

        for raw in ["Bearer", "Bearer ", "abc.def", ""] {
            let mut headers = HeaderMap::new();
            headers.insert(header::AUTHORIZATION, HeaderValue::from_static(raw));
            assert!(
                matches!(bearer_token(&headers), Err(ServerError::InvalidToken)),
                "{raw:?} should be invalid"
            );
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        assert!(matches!(bearer_token(&headers), Err(ServerError::InvalidToken)));
    }
}
