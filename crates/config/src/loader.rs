use crate::{ConfigError, MintConfig};
use url::Url;

/// Path of the config endpoint relative to the site root.
pub const CONFIG_PATH: &str = "/api/config";

/// Fetches the [`MintConfig`] from the site that serves the mint page.
#[derive(Clone, Debug)]
pub struct ConfigLoader {
    endpoint: Url,
    client: reqwest::Client,
}

impl ConfigLoader {
    /// Creates a loader for the site rooted at `base`.
    pub fn new(base: &str) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(base)?.join(CONFIG_PATH)?;
        Ok(Self { endpoint, client: reqwest::Client::new() })
    }

    /// The full url that is requested.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Requests the config, surfacing any failure.
    pub async fn fetch(&self) -> Result<MintConfig, ConfigError> {
        let config = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<MintConfig>()
            .await?;
        debug!(target: "config", ?config, "config loaded");
        Ok(config)
    }

    /// Requests the config, using [`MintConfig::fallback`] if that fails for any reason.
    pub async fn load(&self) -> MintConfig {
        match self.fetch().await {
            Ok(config) => config,
            Err(err) => {
                warn!(target: "config", %err, endpoint = %self.endpoint, "using fallback config");
                MintConfig::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    /// Serves `router` on a free local port, returning its base url.
    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        format!("http://{addr}")
    }

    fn site(payload: Value) -> Router {
        Router::new().route(CONFIG_PATH, get(move || async move { Json(payload) }))
    }

    #[tokio::test]
    async fn loads_served_config() {
        let base = spawn(site(json!({
            "contractAddress": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "chainId": 31337,
            "chainIdHex": "0x7a69",
            "rpcUrl": "http://localhost:8545",
            "chainName": "Anvil",
            "currency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
            "blockExplorerUrls": ["http://localhost:4000"]
        })))
        .await;

        let config = ConfigLoader::new(&base).unwrap().load().await;
        assert_ne!(config, MintConfig::fallback());
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.chain_id_hex, "0x7a69");
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.currency.symbol, "ETH");
        assert_eq!(config.block_explorer_urls, ["http://localhost:4000"]);
        assert_eq!(
            config.contract(),
            Some("0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap())
        );
    }

    #[tokio::test]
    async fn bad_responses_fall_back() {
        let base = spawn(site(json!({ "contractAddress": "0x00" }))).await;
        let loader = ConfigLoader::new(&base).unwrap();
        assert!(matches!(loader.fetch().await, Err(ConfigError::Fetch(_))));
        assert_eq!(loader.load().await, MintConfig::fallback());

        let broken = Router::new().route(CONFIG_PATH, get(|| async { StatusCode::BAD_GATEWAY }));
        let base = spawn(broken).await;
        assert_eq!(ConfigLoader::new(&base).unwrap().load().await, MintConfig::fallback());
    }

    #[test]
    fn joins_config_path() {
        let loader = ConfigLoader::new("https://mint.example.org/some/page").unwrap();
        assert_eq!(loader.endpoint().as_str(), "https://mint.example.org/api/config");
    }

    #[test]
    fn rejects_relative_base() {
        assert!(matches!(ConfigLoader::new("not a url"), Err(ConfigError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        let loader = ConfigLoader::new("http://127.0.0.1:1").unwrap();
        assert!(loader.fetch().await.is_err());

        let config = loader.load().await;
        assert_eq!(config, MintConfig::fallback());
        assert_eq!(config.contract(), None);
    }
}
