use crate::opts::RpcOpts;
use alloy_primitives::Address;
use clap::Parser;
use eyre::Result;
use pharos_config::{MintConfig, PLACEHOLDER_CONTRACT_ADDRESS};

/// The deployed PharosRussia contract.
#[derive(Clone, Debug, Parser)]
pub struct ContractOpts {
    /// Address of the deployed contract.
    #[arg(
        long = "contract",
        env = "CONTRACT_ADDRESS",
        default_value = PLACEHOLDER_CONTRACT_ADDRESS,
        value_name = "ADDRESS"
    )]
    pub address: String,
}

impl Default for ContractOpts {
    fn default() -> Self {
        Self { address: PLACEHOLDER_CONTRACT_ADDRESS.to_string() }
    }
}

impl ContractOpts {
    /// The configuration record the site serves for these options.
    pub fn mint_config(&self, rpc: &RpcOpts) -> MintConfig {
        MintConfig::fallback().with_contract_address(self.address.trim()).with_rpc_url(&rpc.url)
    }

    /// The contract address, refusing the placeholder.
    pub fn require(&self) -> Result<Address> {
        let config = MintConfig::fallback().with_contract_address(self.address.trim());
        Ok(config.require_contract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_refused() {
        assert!(ContractOpts::default().require().is_err());
        let opts = ContractOpts { address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".into() };
        assert!(opts.require().is_ok());
        let config = opts.mint_config(&RpcOpts { url: "http://localhost:8545".into() });
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert!(config.contract().is_some());
    }
}
