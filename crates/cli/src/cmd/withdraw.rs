use crate::{
    cmd::ensure_owner,
    opts::{ContractOpts, RpcOpts, WalletOpts},
};
use alloy_primitives::Address;
use alloy_provider::Provider;
use clap::Parser;
use eyre::Result;
use pharos_mint::{PharosRussia, format_amount};

/// CLI arguments for `pharos withdraw`.
#[derive(Clone, Debug, Parser)]
pub struct WithdrawArgs {
    /// Recipient of the contract balance.
    #[arg(long, env = "WITHDRAW_ADDRESS", value_name = "ADDRESS")]
    pub to: Address,

    #[command(flatten)]
    pub contract: ContractOpts,

    #[command(flatten)]
    pub rpc: RpcOpts,

    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl WithdrawArgs {
    pub async fn run(self) -> Result<()> {
        let address = self.contract.require()?;
        let config = self.contract.mint_config(&self.rpc);
        let (symbol, decimals) = (&config.currency.symbol, config.currency.decimals);
        let signer = self.wallet.signer()?;
        let account = signer.address();
        println!("Using account: {account}");

        let provider = self.rpc.signing_provider(signer).await?;
        let balance = provider.get_balance(address).await?;
        println!("Contract balance: {} {symbol}", format_amount(balance, decimals));
        if balance.is_zero() {
            println!("Nothing to withdraw");
            return Ok(());
        }

        let contract = PharosRussia::new(address, &provider);
        ensure_owner(&contract, account).await?;

        println!("Withdrawing to: {}", self.to);
        let pending = contract.withdraw(self.to).send().await?;
        println!("Transaction hash: {}", pending.tx_hash());
        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            eyre::bail!("transaction {} reverted", receipt.transaction_hash);
        }

        let balance = provider.get_balance(address).await?;
        println!("Funds withdrawn");
        println!("New contract balance: {} {symbol}", format_amount(balance, decimals));
        Ok(())
    }
}
