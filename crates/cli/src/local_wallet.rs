//! A private-key account exposed as an injected wallet, so the page flow runs in the terminal.

use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider};
use alloy_rpc_types::TransactionRequest;
use alloy_transport::TransportError;
use async_trait::async_trait;
use pharos_wallets::{ProviderError, ProviderErrorCode, WalletProvider, provider::parse_chain_id};
use serde_json::{Value, json};
use std::fmt;

/// Answers account requests itself, signs `eth_sendTransaction` locally and forwards everything
/// else to the node.
#[derive(Clone)]
pub struct LocalWallet {
    provider: DynProvider,
    address: Address,
    chain_id: u64,
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl LocalWallet {
    /// `provider` must sign for `address`. `chain_id` is the chain of the node behind it.
    pub fn new(provider: DynProvider, address: Address, chain_id: u64) -> Self {
        Self { provider, address, chain_id }
    }

    /// Reads the chain id from the node.
    pub async fn connect(provider: DynProvider, address: Address) -> Result<Self, TransportError> {
        let chain_id = provider.get_chain_id().await?;
        Ok(Self::new(provider, address, chain_id))
    }

    /// The node cannot change chains, so only its own chain can be switched to.
    fn switch_chain(&self, params: &Value) -> Result<Value, ProviderError> {
        let requested = params[0]["chainId"].as_str().and_then(parse_chain_id);
        if requested == Some(self.chain_id) {
            Ok(Value::Null)
        } else {
            Err(ProviderError::unrecognized_chain())
        }
    }

    async fn send_transaction(&self, params: Value) -> Result<Value, ProviderError> {
        let tx: TransactionRequest =
            serde_json::from_value(params[0].clone()).map_err(|err| {
                ProviderError::with_message(ProviderErrorCode::InvalidParams, err.to_string())
            })?;
        let pending = self.provider.send_transaction(tx).await.map_err(provider_error)?;
        Ok(json!(pending.tx_hash()))
    }
}

#[async_trait]
impl WalletProvider for LocalWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        match method {
            "eth_accounts" | "eth_requestAccounts" => Ok(json!([self.address])),
            "wallet_switchEthereumChain" => self.switch_chain(&params),
            "wallet_addEthereumChain" => Err(ProviderError::unsupported_method(method)),
            "eth_sendTransaction" => self.send_transaction(params).await,
            _ => self
                .provider
                .raw_request::<_, Value>(method.to_owned().into(), params)
                .await
                .map_err(provider_error),
        }
    }
}

/// Keeps the JSON-RPC error object of the node, revert data included.
fn provider_error(err: TransportError) -> ProviderError {
    let Some(payload) = err.as_error_resp() else {
        return ProviderError::with_message(ProviderErrorCode::Disconnected, err.to_string());
    };
    let error = ProviderError::with_message(payload.code.into(), payload.message.to_string());
    match payload.data.as_ref().and_then(|data| serde_json::from_str(data.get()).ok()) {
        Some(data) => error.with_data(data),
        None => error,
    }
}
