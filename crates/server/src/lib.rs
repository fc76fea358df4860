//! # pharos-server
//!
//! Backend of the mint page: the configuration endpoint the page loads on start, token metadata
//! for the contract's base URI, a health check and the static files of the page.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

use axum::{Router, routing::get};
use pharos_config::{CONFIG_PATH, MintConfig};
use std::{io, net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

mod handlers;

pub mod metadata;
pub use metadata::{MAX_TOKEN_ID, TokenMetadata};

/// Shared by all handlers.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: MintConfig,
}

/// What the server serves besides the API.
#[derive(Clone, Debug, Default)]
pub struct ServerOptions {
    /// Served under `/static`.
    pub static_dir: Option<PathBuf>,
    /// Served at `/`.
    pub index: Option<PathBuf>,
}

/// Builds the router of the site.
pub fn router(config: MintConfig, options: &ServerOptions) -> Router {
    let state = Arc::new(ServerState { config });
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route(CONFIG_PATH, get(handlers::config))
        .route("/metadata/{token_id}", get(handlers::metadata));
    if let Some(index) = &options.index {
        router = router.route_service("/", ServeFile::new(index));
    }
    if let Some(dir) = &options.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }
    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Serves the site on `listener` until ctrl-c.
pub async fn serve(
    listener: TcpListener,
    config: MintConfig,
    options: ServerOptions,
) -> io::Result<()> {
    let addr = listener.local_addr()?;
    info!(target: "server", %addr, contract = %config.contract_address, "listening");
    axum::serve(listener, router(config, &options))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Binds `addr` and serves the site.
pub async fn bind_and_serve(
    addr: SocketAddr,
    config: MintConfig,
    options: ServerOptions,
) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, config, options).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target: "server", %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!(target: "server", "shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header("host", "mint.example.org")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn site() -> Router {
        router(MintConfig::fallback(), &ServerOptions::default())
    }

    #[tokio::test]
    async fn serves_config() {
        let config = MintConfig::fallback()
            .with_contract_address("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        let (status, body) = get(router(config, &ServerOptions::default()), "/api/config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contractAddress"], "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(body["chainId"], 688688);
        assert_eq!(body["chainIdHex"], "0xA8230");
        assert_eq!(body["currency"]["symbol"], "PHRS");
        assert_eq!(body["currency"]["decimals"], 18);

        let parsed: MintConfig = serde_json::from_value(body).unwrap();
        assert!(parsed.contract().is_some());
    }

    #[tokio::test]
    async fn health() {
        let (status, body) = get(site(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn token_metadata() {
        let (status, body) = get(site(), "/metadata/42").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Pharos Russia #42");
        assert_eq!(body["image"], "http://mint.example.org/static/images/pharosRussia.jpg");
        assert_eq!(body["external_url"], "https://t.me/hrumdrops");

        for uri in ["/metadata/0", "/metadata/10001", "/metadata/abc"] {
            let (status, body) = get(site(), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"], "Invalid token ID");
        }
    }
}
