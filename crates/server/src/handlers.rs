use crate::{ServerState, metadata::TokenMetadata};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use pharos_config::MintConfig;
use serde_json::{Value, json};
use std::sync::Arc;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "Pharos Russia NFT Minting" }))
}

pub async fn config(State(state): State<Arc<ServerState>>) -> Json<MintConfig> {
    Json(state.config.clone())
}

pub async fn metadata(Path(token_id): Path<String>, headers: HeaderMap) -> Response {
    let base_url = base_url(&headers);
    match token_id.parse().ok().and_then(|id| TokenMetadata::for_token(id, &base_url)) {
        Some(metadata) => Json(metadata).into_response(),
        None => {
            debug!(target: "server", %token_id, "unknown token");
            (StatusCode::NOT_FOUND, Json(json!({ "error": "Invalid token ID" }))).into_response()
        }
    }
}

/// `<scheme>://<host>` as seen by the client, honoring a reverse proxy's forwarded headers.
fn base_url(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };
    let scheme = header("x-forwarded-proto").unwrap_or("http");
    let host =
        header("x-forwarded-host").or_else(|| header(header::HOST.as_str())).unwrap_or("localhost");
    format!("{scheme}://{host}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_headers_win() {
        let mut headers = HeaderMap::new();
        assert_eq!(base_url(&headers), "http://localhost");

        headers.insert(header::HOST, HeaderValue::from_static("127.0.0.1:5000"));
        assert_eq!(base_url(&headers), "http://127.0.0.1:5000");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("mint.example.org"));
        assert_eq!(base_url(&headers), "https://mint.example.org");
    }
}
