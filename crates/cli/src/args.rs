use crate::{
    cmd::{
        deploy::DeployArgs, mint::MintArgs, serve::ServeArgs, set_base_uri::SetBaseUriArgs,
        stats::StatsArgs, withdraw::WithdrawArgs,
    },
    handler, utils,
};
use clap::{Parser, Subcommand};
use eyre::Result;

/// Serve and operate the Pharos Russia NFT mint.
#[derive(Debug, Parser)]
#[command(
    name = "pharos",
    version,
    after_help = "Settings are read from the environment and from `.env` in the working directory.",
    next_display_order = None,
)]
pub struct Pharos {
    #[command(subcommand)]
    pub cmd: PharosSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum PharosSubcommand {
    /// Serve the mint page, its configuration and the token metadata.
    #[command(visible_alias = "s")]
    Serve(ServeArgs),

    /// Deploy the PharosRussia contract from a compiled artifact.
    Deploy(DeployArgs),

    /// Point the contract's token URIs at this site's metadata endpoint.
    #[command(name = "set-base-uri")]
    SetBaseUri(SetBaseUriArgs),

    /// Transfer the mint proceeds to an address.
    Withdraw(WithdrawArgs),

    /// Print price and supply of the contract.
    Stats(StatsArgs),

    /// Mint tokens from a local account, the way the page does it.
    Mint(MintArgs),
}

/// Run the `pharos` command-line interface.
pub fn run() -> Result<()> {
    setup();

    let args = Pharos::parse();
    tokio::runtime::Builder::new_multi_thread().enable_all().build()?.block_on(run_command(args))
}

/// Setup the global logger and other utilities.
pub fn setup() {
    handler::install();
    utils::load_dotenv();
    utils::subscriber();
    utils::enable_paint();
}

/// Run the subcommand.
pub async fn run_command(args: Pharos) -> Result<()> {
    match args.cmd {
        PharosSubcommand::Serve(cmd) => cmd.run().await,
        PharosSubcommand::Deploy(cmd) => cmd.run().await,
        PharosSubcommand::SetBaseUri(cmd) => cmd.run().await,
        PharosSubcommand::Withdraw(cmd) => cmd.run().await,
        PharosSubcommand::Stats(cmd) => cmd.run().await,
        PharosSubcommand::Mint(cmd) => cmd.run().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Pharos::command().debug_assert();
    }

    #[test]
    fn parses_mint() {
        let args = Pharos::try_parse_from([
            "pharos",
            "mint",
            "-q",
            "3",
            "--contract",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "--rpc-url",
            "http://localhost:8545",
        ])
        .unwrap();
        let PharosSubcommand::Mint(mint) = args.cmd else { panic!("expected mint") };
        assert_eq!(mint.quantity, "3");
        assert_eq!(mint.rpc.url, "http://localhost:8545");
        assert!(mint.contract.require().is_ok());
    }

    #[test]
    fn parses_serve() {
        let args =
            Pharos::try_parse_from(["pharos", "serve", "--listen", "127.0.0.1:8080"]).unwrap();
        let PharosSubcommand::Serve(serve) = args.cmd else { panic!("expected serve") };
        assert_eq!(serve.listen.port(), 8080);
        assert!(serve.static_dir.is_none());
    }

    #[test]
    fn withdraw_needs_a_recipient() {
        let args = Pharos::try_parse_from(["pharos", "withdraw", "--to", "not-an-address"]);
        assert!(args.is_err());
    }
}
