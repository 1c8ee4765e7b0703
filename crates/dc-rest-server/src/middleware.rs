// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Custom middleware

use crate::config::ALLOWED_ORIGINS;
use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};

const ALLOWED_HEADERS: &str = "Content-Type,Authorization,Accept";
const ALLOWED_METHODS: &str = "GET,PUT,POST,DELETE,OPTIONS";
const EXPOSED_HEADERS: &str = "Content-Type,Authorization";

/// CORS middleware
///
/// Preflight requests are answered here with an empty 204 for any path,
/// without reaching routing or authentication. Every other response passes
/// through and gets the CORS headers attached on the way out.
pub async fn cors(req: Request, next: Next) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let mut response = if req.method() == Method::OPTIONS {
        let mut preflight = Response::new(Body::empty());
        *preflight.status_mut() = StatusCode::NO_CONTENT;
        preflight
    } else {
        next.run(req).await
    };

    apply_cors_headers(response.headers_mut(), origin.as_deref());
    response
}

pub fn is_allowed_origin(origin: &str) -> bool {
    ALLOWED_ORIGINS.contains(&origin)
}

/// Attach CORS headers. Credentials are always disallowed; origin-specific
/// headers are only added when `origin` is on the allow-list.
pub fn apply_cors_headers(headers: &mut HeaderMap, origin: Option<&str>) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("false"),
    );
    headers.append(header::VARY, HeaderValue::from_static("Origin"));

    let Some(origin) = origin.filter(|origin| is_allowed_origin(origin)) else {
        return;
    };
    let Ok(origin) = HeaderValue::from_str(origin) else {
        return;
    };

    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(EXPOSED_HEADERS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_origin_gets_full_header_set() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, Some("http://localhost:5173"));

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "false");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_EXPOSE_HEADERS], EXPOSED_HEADERS);
        assert_eq!(headers[header::VARY], "Origin");
    }

    #[test]
    fn unknown_origin_is_not_echoed() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, Some("https://evil.example"));

        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).is_none());
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "false");
    }

    #[test]
    fn missing_origin_still_disallows_credentials() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, None);

        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "false");
    }

    #[test]
    fn origin_match_is_exact() {
        assert!(is_allowed_origin("https://deal-cost-calculator.netlify.app"));
        assert!(!is_allowed_origin("https://deal-cost-calculator.netlify.app/"));
        assert!(!is_allowed_origin("http://localhost:5174"));
        assert!(!is_allowed_origin("HTTP://LOCALHOST:5173"));
    }
}
