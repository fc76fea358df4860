use crate::opts::{ContractOpts, RpcOpts};
use clap::Parser;
use eyre::Result;
use pharos_mint::{PharosRussia, SupplyStats, format_amount};

/// CLI arguments for `pharos stats`.
#[derive(Clone, Debug, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub contract: ContractOpts,

    #[command(flatten)]
    pub rpc: RpcOpts,
}

impl StatsArgs {
    pub async fn run(self) -> Result<()> {
        let address = self.contract.require()?;
        let config = self.contract.mint_config(&self.rpc);
        let provider = self.rpc.provider().await?;
        let contract = PharosRussia::new(address, &provider);

        let price = contract.MINT_PRICE().call().await?;
        let stats = SupplyStats {
            max_supply: contract.MAX_SUPPLY().call().await?,
            total_minted: contract.totalMinted().call().await?,
        };
        let owner = contract.owner().call().await?;

        let symbol = &config.currency.symbol;
        println!("Contract:   {address}");
        println!("Owner:      {owner}");
        println!("Mint price: {} {symbol}", format_amount(price, config.currency.decimals));
        println!("Max supply: {}", stats.max_supply);
        println!("Minted:     {}", stats.total_minted);
        println!("Remaining:  {}", stats.remaining());
        Ok(())
    }
}
