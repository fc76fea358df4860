use alloy_network::EthereumWallet;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use clap::Parser;
use eyre::{Result, WrapErr};
use pharos_config::PHAROS_TESTNET_RPC;

/// RPC endpoint of the PHAROS node.
#[derive(Clone, Debug, Parser)]
#[command(next_help_heading = "RPC options")]
pub struct RpcOpts {
    /// The RPC endpoint URL.
    #[arg(
        long = "rpc-url",
        short = 'r',
        env = "PHAROS_RPC",
        default_value = PHAROS_TESTNET_RPC,
        value_name = "URL"
    )]
    pub url: String,
}

impl Default for RpcOpts {
    fn default() -> Self {
        Self { url: PHAROS_TESTNET_RPC.to_string() }
    }
}

impl RpcOpts {
    /// A read-only provider.
    pub async fn provider(&self) -> Result<DynProvider> {
        let provider = ProviderBuilder::new()
            .connect(&self.url)
            .await
            .wrap_err_with(|| format!("failed to connect to {}", self.url))?;
        Ok(provider.erased())
    }

    /// A provider that signs with `signer`.
    pub async fn signing_provider(&self, signer: PrivateKeySigner) -> Result<DynProvider> {
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(&self.url)
            .await
            .wrap_err_with(|| format!("failed to connect to {}", self.url))?;
        Ok(provider.erased())
    }
}
