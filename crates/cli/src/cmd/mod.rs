//! Subcommands of `pharos`.

pub mod deploy;
pub mod mint;
pub mod serve;
pub mod set_base_uri;
pub mod stats;
pub mod withdraw;

use alloy_primitives::Address;
use alloy_provider::DynProvider;
use eyre::Result;
use pharos_mint::PharosRussia::PharosRussiaInstance;

/// Fails unless `account` owns the contract; `setBaseURI` and `withdraw` are owner-only.
pub(crate) async fn ensure_owner(
    contract: &PharosRussiaInstance<&DynProvider>,
    account: Address,
) -> Result<()> {
    let owner = contract.owner().call().await?;
    if owner != account {
        eyre::bail!(
            "{account} is not the owner of the contract ({owner}). \
             Use the account that deployed the contract"
        );
    }
    Ok(())
}
