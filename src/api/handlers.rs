use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::AppState;

use super::response::{ApiError, JSend};

// ============================================================================
// Request / response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct IssueRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn issue_credentials(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<IssueRequest>,
) -> Result<Json<JSend<CredentialPairResponse>>, ApiError> {
    if req.user_id.is_empty() {
        return Err(ApiError::bad_request("user_id must not be empty"));
    }

    let origin = client_origin(&headers, peer);
    let pair = state.authority.issue(&req.user_id, &origin)?;

    Ok(JSend::success(CredentialPairResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_secret,
    }))
}

pub async fn refresh_credentials(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<JSend<CredentialPairResponse>>, ApiError> {
    if req.access_token.is_empty() || req.refresh_token.is_empty() {
        return Err(ApiError::bad_request(
            "access_token and refresh_token must not be empty",
        ));
    }

    let origin = client_origin(&headers, peer);
    let pair = state
        .authority
        .rotate(&req.access_token, &req.refresh_token, &origin)?;

    Ok(JSend::success(CredentialPairResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_secret,
    }))
}

pub async fn health() -> Json<JSend<HealthResponse>> {
    JSend::success(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Infer the client origin: first hop of `X-Forwarded-For` when present
/// (the usual reverse-proxy deployment), otherwise the peer address.
fn client_origin(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}
