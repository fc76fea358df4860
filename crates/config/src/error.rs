//! Configuration errors.

/// Errors raised while obtaining or validating a [`MintConfig`](crate::MintConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CONTRACT_ADDRESS is not set. Deploy the contract first and set CONTRACT_ADDRESS")]
    ContractNotConfigured,
    #[error("invalid config endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to fetch config: {0}")]
    Fetch(#[from] reqwest::Error),
}
