//! HTTP host for the override interceptor.
//!
//! Accepts JSON-RPC POSTs, answers matched requests from the override table
//! and forwards everything else, byte for byte, to the upstream node.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use color_eyre::eyre::{Context, Result};
use devkit_rpc::{Interception, Interceptor, OverrideResponse};
use serde_json::json;

/// Timeout for a forwarded upstream request.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC "internal error" code used when the upstream cannot be reached.
const UPSTREAM_ERROR_CODE: i64 = -32603;

#[derive(Debug, Clone)]
pub struct ProxyState {
    interceptor: Arc<Interceptor>,
    client: reqwest::Client,
    upstream: reqwest::Url,
}

impl ProxyState {
    /// # Errors
    /// Returns error if `upstream` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(interceptor: Interceptor, upstream: &str) -> Result<Self> {
        let upstream = reqwest::Url::parse(upstream)
            .wrap_err_with(|| format!("invalid upstream URL: {upstream}"))?;
        // The upstream is normally a local node; never route it through
        // HTTP_PROXY.
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .no_proxy()
            .build()
            .wrap_err("failed to build upstream HTTP client")?;

        Ok(Self {
            interceptor: Arc::new(interceptor),
            client,
            upstream,
        })
    }

    pub fn upstream(&self) -> &reqwest::Url {
        &self.upstream
    }
}

/// Build the proxy router.
///
/// Request bodies are unbounded: forwarded calls such as large
/// `eth_sendRawTransaction` payloads must reach the node as sent.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/", post(handle_rpc))
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

async fn handle_rpc(State(state): State<ProxyState>, headers: HeaderMap, body: Bytes) -> Response {
    match state.interceptor.intercept(&body) {
        Interception::Override(resp) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, OverrideResponse::CONTENT_TYPE)],
            resp.into_body(),
        )
            .into_response(),
        Interception::PassThrough => forward(&state, &headers, body).await,
    }
}

async fn forward(state: &ProxyState, headers: &HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(OverrideResponse::CONTENT_TYPE)
        .to_string();

    let upstream = state
        .client
        .post(state.upstream.clone())
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(resp) => resp,
        Err(e) => return upstream_failure(&state.upstream, e),
    };

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(OverrideResponse::CONTENT_TYPE)
        .to_string();

    match upstream.bytes().await {
        Ok(bytes) => {
            tracing::debug!(status = %status, bytes = bytes.len(), "relayed upstream response");
            (status, [(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(e) => upstream_failure(&state.upstream, e),
    }
}

fn upstream_failure(upstream: &reqwest::Url, error: reqwest::Error) -> Response {
    tracing::error!(upstream = %upstream, error = %error, "upstream request failed");

    let body = json!({
        "jsonrpc": "2.0",
        "id": null,
        "error": {
            "code": UPSTREAM_ERROR_CODE,
            "message": format!("upstream request failed: {error}"),
        },
    });
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, OverrideResponse::CONTENT_TYPE)],
        body.to_string(),
    )
        .into_response()
}
