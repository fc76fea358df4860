use crate::{ProviderError, ProviderHandle, WalletProvider, provider::request_as};
use alloy_primitives::{Address, TxHash};
use alloy_rpc_types::TransactionRequest;
use serde_json::json;

/// Signer that delegates to an injected wallet.
///
/// Injected wallets never hand out signatures for raw transactions: they sign and broadcast in
/// one step via `eth_sendTransaction`.
#[derive(Clone, Debug)]
pub struct InjectedSigner {
    provider: ProviderHandle,
    address: Address,
    chain_id: u64,
}

impl InjectedSigner {
    pub fn new(provider: ProviderHandle, address: Address, chain_id: u64) -> Self {
        Self { provider, address, chain_id }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn provider(&self) -> &dyn WalletProvider {
        &*self.provider
    }

    pub(crate) fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    pub(crate) fn set_chain_id(&mut self, chain_id: u64) {
        self.chain_id = chain_id;
    }

    /// Asks the wallet to sign and broadcast `tx` from this account.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, ProviderError> {
        let tx = tx.from(self.address);
        debug!(
            target: "wallets",
            from = %self.address,
            to = ?tx.to,
            value = ?tx.value,
            "eth_sendTransaction"
        );
        request_as(&*self.provider, "eth_sendTransaction", json!([tx])).await
    }
}
