//! The PharosRussia contract, read and written through an injected wallet.

use crate::{MintError, MintQuantity, SupplyStats};
use alloy_primitives::{Address, Bytes, TxHash, U64, U256};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::{SolCall, sol};
use pharos_wallets::{InjectedSigner, provider::request_as};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

sol! {
    #[sol(rpc)]
    interface PharosRussia {
        function MINT_PRICE() external view returns (uint256);
        function MAX_SUPPLY() external view returns (uint256);
        function totalMinted() external view returns (uint256);
        function owner() external view returns (address);
        function mint(uint256 quantity) external payable;
        function setBaseURI(string uri) external;
        function withdraw(address to) external;
    }
}

/// Gas ceiling of a mint transaction.
pub const MINT_GAS_LIMIT: u64 = 300_000;

/// Interval between two receipt lookups.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How long a submitted mint may stay unconfirmed.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

/// The parts of a transaction receipt the mint flow looks at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `1` on success, `0` when reverted. Absent before byzantium.
    #[serde(default)]
    pub status: Option<U64>,
}

impl MintReceipt {
    pub fn succeeded(&self) -> bool {
        self.status != Some(U64::ZERO)
    }
}

/// Contract handle bound to the connected account.
#[derive(Clone, Debug)]
pub struct InjectedContract {
    address: Address,
    signer: InjectedSigner,
    poll_interval: Duration,
    confirmation_timeout: Duration,
}

impl InjectedContract {
    pub fn new(address: Address, signer: InjectedSigner) -> Self {
        Self {
            address,
            signer,
            poll_interval: RECEIPT_POLL_INTERVAL,
            confirmation_timeout: CONFIRMATION_TIMEOUT,
        }
    }

    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signer(&self) -> &InjectedSigner {
        &self.signer
    }

    async fn call<C: SolCall>(&self, call: C) -> Result<C::Return, MintError> {
        let tx = json!({
            "from": self.signer.address(),
            "to": self.address,
            "data": Bytes::from(call.abi_encode()),
        });
        let data: Bytes =
            request_as(self.signer.provider(), "eth_call", json!([tx, "latest"])).await?;
        C::abi_decode_returns(&data).map_err(|err| MintError::Decode(err.to_string()))
    }

    pub async fn mint_price(&self) -> Result<U256, MintError> {
        self.call(PharosRussia::MINT_PRICECall {}).await
    }

    pub async fn max_supply(&self) -> Result<U256, MintError> {
        self.call(PharosRussia::MAX_SUPPLYCall {}).await
    }

    pub async fn total_minted(&self) -> Result<U256, MintError> {
        self.call(PharosRussia::totalMintedCall {}).await
    }

    pub async fn owner(&self) -> Result<Address, MintError> {
        self.call(PharosRussia::ownerCall {}).await
    }

    pub async fn supply_stats(&self) -> Result<SupplyStats, MintError> {
        Ok(SupplyStats {
            max_supply: self.max_supply().await?,
            total_minted: self.total_minted().await?,
        })
    }

    /// Native balance of the connected account.
    pub async fn balance(&self) -> Result<U256, MintError> {
        let balance = request_as(
            self.signer.provider(),
            "eth_getBalance",
            json!([self.signer.address(), "latest"]),
        )
        .await?;
        Ok(balance)
    }

    /// Current gas price of the node behind the wallet.
    pub async fn gas_price(&self) -> Result<U256, MintError> {
        Ok(request_as(self.signer.provider(), "eth_gasPrice", json!([])).await?)
    }

    /// Checks remaining supply and account balance before asking the wallet to sign.
    ///
    /// The balance has to cover `value` plus [`MINT_GAS_LIMIT`] at the current gas price.
    pub async fn preflight_mint(
        &self,
        quantity: MintQuantity,
        value: U256,
    ) -> Result<(), MintError> {
        let stats = self.supply_stats().await?;
        if stats.remaining() < U256::from(quantity.get()) {
            return Err(MintError::SoldOut);
        }
        let gas_cost = U256::from(MINT_GAS_LIMIT).saturating_mul(self.gas_price().await?);
        let needed = value.saturating_add(gas_cost);
        let available = self.balance().await?;
        if available < needed {
            return Err(MintError::InsufficientFunds { needed, available });
        }
        Ok(())
    }

    /// Submits `mint(quantity)` paying `value`. Returns once the wallet has broadcast it.
    pub async fn submit_mint(
        &self,
        quantity: MintQuantity,
        value: U256,
    ) -> Result<TxHash, MintError> {
        let input = PharosRussia::mintCall { quantity: quantity.into() }.abi_encode();
        let tx = TransactionRequest::default()
            .to(self.address)
            .value(value)
            .gas_limit(MINT_GAS_LIMIT)
            .input(TransactionInput::both(input.into()));
        let hash = self.signer.send_transaction(tx).await?;
        info!(target: "mint", %hash, %quantity, %value, "mint submitted");
        Ok(hash)
    }

    /// Polls for the receipt of `hash` until it is mined or the confirmation timeout passes.
    pub async fn wait_for_confirmation(&self, hash: TxHash) -> Result<MintReceipt, MintError> {
        let receipt = tokio::time::timeout(self.confirmation_timeout, self.poll_receipt(hash))
            .await
            .map_err(|_| MintError::ConfirmationTimeout(hash))??;
        if !receipt.succeeded() {
            return Err(MintError::Reverted(hash));
        }
        debug!(target: "mint", %hash, block = ?receipt.block_number, "confirmed");
        Ok(receipt)
    }

    async fn poll_receipt(&self, hash: TxHash) -> Result<MintReceipt, MintError> {
        loop {
            let receipt: Option<MintReceipt> = request_as(
                self.signer.provider(),
                "eth_getTransactionReceipt",
                json!([hash]),
            )
            .await?;
            match receipt {
                Some(receipt) if receipt.block_number.is_some() => return Ok(receipt),
                _ => trace!(target: "mint", %hash, "pending"),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
