use crate::opts::{ContractOpts, RpcOpts};
use clap::Parser;
use eyre::Result;
use pharos_server::ServerOptions;
use std::{net::SocketAddr, path::PathBuf};

/// CLI arguments for `pharos serve`.
#[derive(Clone, Debug, Parser)]
pub struct ServeArgs {
    /// The address to listen on.
    #[arg(long, env = "PHAROS_LISTEN", default_value = "0.0.0.0:5000", value_name = "ADDR")]
    pub listen: SocketAddr,

    /// Directory served under `/static`.
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,

    /// Page served at `/`.
    #[arg(long, value_name = "FILE")]
    pub index: Option<PathBuf>,

    #[command(flatten)]
    pub contract: ContractOpts,

    #[command(flatten)]
    pub rpc: RpcOpts,
}

impl ServeArgs {
    pub async fn run(self) -> Result<()> {
        let config = self.contract.mint_config(&self.rpc);
        if config.contract().is_none() {
            warn!("CONTRACT_ADDRESS is not set, minting stays disabled on the page");
        }
        let options = ServerOptions { static_dir: self.static_dir, index: self.index };
        pharos_server::bind_and_serve(self.listen, config, options).await?;
        Ok(())
    }
}
