// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use dc_rest_server::{server::build_router, AppState, ServerConfig};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub document_path: PathBuf,
    dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// App backed by `config.json` in a fresh temporary directory
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let document_path = dir.path().join("config.json");
        Self::with_document(dir, document_path)
    }

    pub fn with_document(dir: TempDir, document_path: PathBuf) -> Self {
        let config = ServerConfig {
            document_path: document_path.clone(),
            jwt_secret: TEST_SECRET.to_string(),
            ..Default::default()
        };
        Self {
            router: build_router(AppState::new(&config)),
            document_path,
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// JSON request with an optional bearer token
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn login(&self) -> String {
        let response = self
            .json(
                Method::POST,
                "/api/admin/login",
                None,
                Some(json!({"username": "Camryn", "password": "Elliot"})),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }

    /// Document as persisted on disk
    pub fn stored_document(&self) -> Value {
        let raw = std::fs::read_to_string(&self.document_path).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}
