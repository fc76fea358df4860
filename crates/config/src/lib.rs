//! # pharos-config
//!
//! Deployment parameters of the Pharos Russia mint: which contract to talk to, on which chain,
//! and how to describe that chain to a wallet that has never seen it.
//!
//! The record is immutable once loaded. A reload replaces it wholesale.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

mod error;
pub use error::ConfigError;

mod loader;
pub use loader::{CONFIG_PATH, ConfigLoader};

/// Contract address value meaning "not deployed yet".
pub const PLACEHOLDER_CONTRACT_ADDRESS: &str = "PASTE_CONTRACT_ADDRESS_HERE";

/// PHAROS testnet chain id.
pub const PHAROS_TESTNET_CHAIN_ID: u64 = 688688;

/// Public PHAROS testnet RPC endpoint.
pub const PHAROS_TESTNET_RPC: &str = "https://rpc.testnet.pharos.network";

/// Public PHAROS testnet block explorer.
pub const PHAROS_TESTNET_EXPLORER: &str = "https://pharos-testnet.blockscout.com/";

/// Native currency of the target chain, as wallets expect it in `wallet_addEthereumChain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Deployment parameters served by `/api/config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintConfig {
    /// Address of the deployed contract, or [`PLACEHOLDER_CONTRACT_ADDRESS`].
    pub contract_address: String,
    pub chain_id: u64,
    /// `chain_id` as a `0x`-prefixed hex quantity.
    pub chain_id_hex: String,
    pub rpc_url: String,
    pub chain_name: String,
    pub currency: NativeCurrency,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_explorer_urls: Vec<String>,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

impl MintConfig {
    /// The literal configuration used whenever the config endpoint cannot be reached.
    pub fn fallback() -> Self {
        Self {
            contract_address: PLACEHOLDER_CONTRACT_ADDRESS.to_string(),
            chain_id: PHAROS_TESTNET_CHAIN_ID,
            chain_id_hex: chain_id_to_hex(PHAROS_TESTNET_CHAIN_ID),
            rpc_url: PHAROS_TESTNET_RPC.to_string(),
            chain_name: "PHAROS Testnet".to_string(),
            currency: NativeCurrency {
                name: "PHAROS".to_string(),
                symbol: "PHRS".to_string(),
                decimals: 18,
            },
            block_explorer_urls: vec![PHAROS_TESTNET_EXPLORER.to_string()],
        }
    }

    /// Returns a copy with the contract address replaced.
    pub fn with_contract_address(mut self, address: impl Into<String>) -> Self {
        self.contract_address = address.into();
        self
    }

    /// Returns a copy with the RPC url replaced.
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    /// The configured contract, if any.
    ///
    /// The placeholder and anything that does not parse as an address count as "not
    /// configured".
    pub fn contract(&self) -> Option<Address> {
        let address = self.contract_address.trim();
        if address.is_empty() || address == PLACEHOLDER_CONTRACT_ADDRESS {
            return None;
        }
        address.parse().ok()
    }

    /// Same as [`Self::contract`] but fails with [`ConfigError::ContractNotConfigured`].
    pub fn require_contract(&self) -> Result<Address, ConfigError> {
        self.contract().ok_or(ConfigError::ContractNotConfigured)
    }

    /// Parameter object for `wallet_addEthereumChain`.
    pub fn add_chain_params(&self) -> Value {
        json!({
            "chainId": self.chain_id_hex,
            "chainName": self.chain_name,
            "nativeCurrency": self.currency,
            "rpcUrls": [self.rpc_url],
            "blockExplorerUrls": self.block_explorer_urls,
        })
    }

    /// Parameter object for `wallet_switchEthereumChain`.
    pub fn switch_chain_params(&self) -> Value {
        json!({ "chainId": self.chain_id_hex })
    }
}

/// Formats a chain id the way wallets report it, e.g. `688688` as `0xA8230`.
pub fn chain_id_to_hex(chain_id: u64) -> String {
    format!("0x{chain_id:X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_pharos_testnet() {
        let config = MintConfig::fallback();
        assert_eq!(config.chain_id, 688688);
        assert_eq!(config.chain_id_hex, "0xA8230");
        assert_eq!(config.currency.decimals, 18);
        assert_eq!(config.contract(), None);
    }

    #[test]
    fn parses_endpoint_payload() {
        let payload = r#"{
            "contractAddress": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "chainId": 688688,
            "chainIdHex": "0xA8230",
            "rpcUrl": "https://rpc.testnet.pharos.network",
            "chainName": "PHAROS Testnet",
            "currency": { "name": "PHAROS", "symbol": "PHRS", "decimals": 18 }
        }"#;
        let config: MintConfig = serde_json::from_str(payload).unwrap();
        assert!(config.block_explorer_urls.is_empty());
        assert_eq!(
            config.contract(),
            Some("0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap())
        );
    }

    #[test]
    fn garbage_address_is_not_configured() {
        let config = MintConfig::fallback().with_contract_address("0x1234");
        assert!(matches!(config.require_contract(), Err(ConfigError::ContractNotConfigured)));
    }

    #[test]
    fn add_chain_params_shape() {
        let params = MintConfig::fallback().add_chain_params();
        assert_eq!(params["chainId"], "0xA8230");
        assert_eq!(params["nativeCurrency"]["symbol"], "PHRS");
        assert_eq!(params["rpcUrls"][0], PHAROS_TESTNET_RPC);
        assert_eq!(params["blockExplorerUrls"][0], PHAROS_TESTNET_EXPLORER);
    }
}
