use crate::opts::{RpcOpts, WalletOpts};
use alloy_network::TransactionBuilder;
use alloy_primitives::Bytes;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use clap::Parser;
use eyre::{OptionExt, Result, WrapErr};
use pharos_mint::PharosRussia;
use serde_json::Value;
use std::{fs, path::PathBuf};

/// CLI arguments for `pharos deploy`.
#[derive(Clone, Debug, Parser)]
pub struct DeployArgs {
    /// Compiled PharosRussia artifact, hardhat or forge JSON.
    #[arg(long, value_name = "PATH")]
    pub artifact: PathBuf,

    /// Set this base URI right after deployment, e.g. `https://mint.example.org/metadata/`.
    #[arg(long, value_name = "URI")]
    pub base_uri: Option<String>,

    #[command(flatten)]
    pub rpc: RpcOpts,

    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl DeployArgs {
    pub async fn run(self) -> Result<()> {
        let artifact = fs::read_to_string(&self.artifact)
            .wrap_err_with(|| format!("failed to read {}", self.artifact.display()))?;
        let artifact: Value = serde_json::from_str(&artifact)
            .wrap_err_with(|| format!("invalid artifact {}", self.artifact.display()))?;
        let code = creation_code(&artifact)?;

        let signer = self.wallet.signer()?;
        let deployer = signer.address();
        println!("Deployer: {deployer}");

        let provider = self.rpc.signing_provider(signer).await?;
        let tx = TransactionRequest::default().from(deployer).with_deploy_code(code);
        let receipt = provider.send_transaction(tx).await?.get_receipt().await?;
        if !receipt.status() {
            eyre::bail!("deployment transaction {} reverted", receipt.transaction_hash);
        }
        let address = receipt.contract_address.ok_or_eyre("receipt has no contract address")?;
        println!("PharosRussia deployed at: {address}");

        if let Some(uri) = &self.base_uri {
            let contract = PharosRussia::new(address, &provider);
            let receipt = contract.setBaseURI(uri.clone()).send().await?.get_receipt().await?;
            println!("Base URI set to {uri} in {}", receipt.transaction_hash);
        }

        println!("\nNext steps:");
        println!("1. Set CONTRACT_ADDRESS to {address}");
        if self.base_uri.is_none() {
            println!("2. Set the base URI with `pharos set-base-uri`");
        }
        Ok(())
    }
}

/// Reads the creation bytecode of a hardhat (`bytecode`) or forge (`bytecode.object`) artifact.
pub fn creation_code(artifact: &Value) -> Result<Bytes> {
    let bytecode = &artifact["bytecode"];
    let hex = bytecode
        .as_str()
        .or_else(|| bytecode["object"].as_str())
        .ok_or_eyre("artifact has no bytecode")?;
    let code: Bytes = hex.parse().wrap_err("artifact bytecode is not hex")?;
    if code.is_empty() {
        eyre::bail!("artifact bytecode is empty, is the contract abstract?");
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_both_artifact_layouts() {
        let hardhat = json!({ "contractName": "PharosRussia", "bytecode": "0x6080" });
        assert_eq!(creation_code(&hardhat).unwrap(), Bytes::from_static(&[0x60, 0x80]));

        let forge = json!({ "bytecode": { "object": "0x6080", "linkReferences": {} } });
        assert_eq!(creation_code(&forge).unwrap(), Bytes::from_static(&[0x60, 0x80]));

        assert!(creation_code(&json!({ "bytecode": "0x" })).is_err());
        assert!(creation_code(&json!({ "abi": [] })).is_err());
    }
}
