//! The seam between this crate and an injected wallet.

use crate::ProviderError;
use alloy_primitives::Address;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt, sync::Arc};
use tokio::sync::broadcast;

/// Shared handle to a wallet provider.
pub type ProviderHandle = Arc<dyn WalletProvider>;

/// Standard EIP-1193 provider interface.
///
/// Reference: <https://eips.ethereum.org/EIPS/eip-1193>
#[async_trait]
pub trait WalletProvider: fmt::Debug + Send + Sync {
    /// Submits an RPC request to the wallet, e.g. `eth_requestAccounts`.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// Subscribes to `accountsChanged` / `chainChanged`, if the provider emits events.
    fn subscribe(&self) -> Option<broadcast::Receiver<ProviderEvent>> {
        None
    }
}

/// Events emitted by a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderEvent {
    /// `accountsChanged`. An empty list means the wallet revoked access.
    AccountsChanged(Vec<Address>),
    /// `chainChanged`, already decoded from its hex form.
    ChainChanged(u64),
}

/// Sends a request and decodes the result into `T`.
pub async fn request_as<T: DeserializeOwned>(
    provider: &dyn WalletProvider,
    method: &str,
    params: Value,
) -> Result<T, ProviderError> {
    trace!(target: "wallets", method, %params, "request");
    let value = provider.request(method, params).await?;
    serde_json::from_value(value).map_err(|err| {
        ProviderError::invalid_response(format!("invalid `{method}` response: {err}"))
    })
}

/// Reads the active chain of the wallet via `eth_chainId`.
pub async fn current_chain_id(provider: &dyn WalletProvider) -> Result<u64, ProviderError> {
    let hex: String = request_as(provider, "eth_chainId", Value::Array(vec![])).await?;
    parse_chain_id(&hex)
        .ok_or_else(|| ProviderError::invalid_response(format!("invalid chain id `{hex}`")))
}

/// Parses a `0x`-prefixed hex quantity. Case-insensitive, so `0xA8230` equals `0xa8230`.
pub fn parse_chain_id(hex: &str) -> Option<u64> {
    let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_parsing() {
        assert_eq!(parse_chain_id("0xA8230"), Some(688688));
        assert_eq!(parse_chain_id("0xa8230"), Some(688688));
        assert_eq!(parse_chain_id("0x1"), Some(1));
        assert_eq!(parse_chain_id("688688"), None);
        assert_eq!(parse_chain_id("0xzz"), None);
    }
}
