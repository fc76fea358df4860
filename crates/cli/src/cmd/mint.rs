use crate::{
    local_wallet::LocalWallet,
    opts::{ContractOpts, RpcOpts, WalletOpts},
    terminal::{TerminalStatus, print_page},
};
use clap::Parser;
use eyre::Result;
use pharos_mint::{AppOptions, MintApp};
use pharos_wallets::{ProviderFlags, ProviderHandle, WalletEnvironment};
use std::sync::Arc;

/// CLI arguments for `pharos mint`.
#[derive(Clone, Debug, Parser)]
pub struct MintArgs {
    /// How many tokens to mint, clamped to 1..=10.
    #[arg(long, short, default_value = "1", value_name = "N")]
    pub quantity: String,

    #[command(flatten)]
    pub contract: ContractOpts,

    #[command(flatten)]
    pub rpc: RpcOpts,

    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl MintArgs {
    /// Runs the page flow against a local account: connect, pick a quantity, mint.
    pub async fn run(self) -> Result<()> {
        let config = self.contract.mint_config(&self.rpc);
        let signer = self.wallet.signer()?;
        let account = signer.address();
        let provider = self.rpc.signing_provider(signer).await?;
        let wallet = LocalWallet::connect(provider, account).await?;

        let handle: ProviderHandle = Arc::new(wallet);
        let env = WalletEnvironment::ethereum(handle, ProviderFlags::default());
        let options = AppOptions { auto_reconnect: false, ..Default::default() };
        let mut app = MintApp::new(config, options, TerminalStatus);

        app.connect(&env).await?;
        app.set_quantity_input(&self.quantity);
        print_page(&app.page());

        let receipt = app.mint().await?;
        debug!(tx = %receipt.transaction_hash, block = ?receipt.block_number, "mint confirmed");
        print_page(&app.page());
        Ok(())
    }
}
