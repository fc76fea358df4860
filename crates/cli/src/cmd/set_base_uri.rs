use crate::{
    cmd::ensure_owner,
    opts::{ContractOpts, RpcOpts, WalletOpts},
};
use clap::Parser;
use eyre::Result;
use pharos_mint::PharosRussia;

/// CLI arguments for `pharos set-base-uri`.
#[derive(Clone, Debug, Parser)]
pub struct SetBaseUriArgs {
    /// Public url of the site serving `/metadata/{id}`.
    #[arg(long, env = "SITE_URL", value_name = "URL")]
    pub site_url: String,

    #[command(flatten)]
    pub contract: ContractOpts,

    #[command(flatten)]
    pub rpc: RpcOpts,

    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl SetBaseUriArgs {
    pub async fn run(self) -> Result<()> {
        let address = self.contract.require()?;
        let signer = self.wallet.signer()?;
        let account = signer.address();
        println!("Using account: {account}");

        let provider = self.rpc.signing_provider(signer).await?;
        let contract = PharosRussia::new(address, &provider);
        ensure_owner(&contract, account).await?;

        let base_uri = base_uri(&self.site_url);
        println!("Setting base URI to: {base_uri}");
        let pending = contract.setBaseURI(base_uri.clone()).send().await?;
        println!("Transaction hash: {}", pending.tx_hash());
        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            eyre::bail!("transaction {} reverted", receipt.transaction_hash);
        }

        println!("Base URI set");
        println!("Metadata of token #1: {base_uri}1");
        Ok(())
    }
}

/// `<site>/metadata/`
pub fn base_uri(site_url: &str) -> String {
    format!("{}/metadata/", site_url.trim().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_base_uri() {
        assert_eq!(base_uri("https://mint.example.org"), "https://mint.example.org/metadata/");
        assert_eq!(base_uri("https://mint.example.org/ "), "https://mint.example.org/metadata/");
    }
}
