use alloy_primitives::{TxHash, U256, hex};
use alloy_sol_types::{Revert, SolError};
use pharos_wallets::ProviderError;
use serde_json::Value;

/// Revert reason of `mint` once the supply is exhausted.
pub const SOLD_OUT_REASON: &str = "Sold out";

/// Revert reason of `mint` for a quantity outside 1..=10.
pub const QUANTITY_REASON: &str = "Mint 1-10 per tx";

/// Errors of the mint flow.
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    #[error("no wallet connected")]
    NotConnected,
    #[error("contract address is not configured")]
    ContractNotConfigured,
    #[error("transaction rejected by user")]
    Rejected,
    #[error("insufficient funds: {needed} needed, {available} available")]
    InsufficientFunds { needed: U256, available: U256 },
    #[error("sold out")]
    SoldOut,
    #[error("quantity out of range")]
    QuantityOutOfRange,
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("transaction {0} was not confirmed in time")]
    ConfirmationTimeout(TxHash),
    #[error("failed to decode contract response: {0}")]
    Decode(String),
    #[error("execution reverted: {0}")]
    Revert(String),
    #[error(transparent)]
    Provider(ProviderError),
}

impl MintError {
    /// The message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConnected => "Connect your wallet".to_string(),
            Self::ContractNotConfigured => "Contract is not configured".to_string(),
            Self::Rejected => "Transaction rejected by user".to_string(),
            Self::InsufficientFunds { .. } => "Insufficient funds to pay for the mint".to_string(),
            Self::SoldOut => "All NFTs have been sold out".to_string(),
            Self::QuantityOutOfRange => {
                "You can mint from 1 to 10 NFTs per transaction".to_string()
            }
            Self::Reverted(_) => "Transaction failed on-chain".to_string(),
            Self::ConfirmationTimeout(hash) => {
                format!("Transaction {hash} is still pending, check the explorer")
            }
            Self::Decode(_) => "Unexpected response from the contract".to_string(),
            Self::Revert(reason) => reason.clone(),
            Self::Provider(err) => err.message.to_string(),
        }
    }
}

impl From<ProviderError> for MintError {
    fn from(err: ProviderError) -> Self {
        if err.is_user_rejection() {
            return Self::Rejected;
        }
        match revert_reason(&err).as_deref() {
            Some(SOLD_OUT_REASON) => Self::SoldOut,
            Some(QUANTITY_REASON) => Self::QuantityOutOfRange,
            Some(reason) => Self::Revert(reason.to_string()),
            None => Self::Provider(err),
        }
    }
}

/// Decodes the `Error(string)` revert reason carried in the error data.
///
/// Wallets put the revert data either directly in `data` or in `data.data`.
pub fn revert_reason(err: &ProviderError) -> Option<String> {
    let raw = match err.data.as_ref()? {
        Value::String(raw) => raw.as_str(),
        Value::Object(obj) => obj.get("data")?.as_str()?,
        _ => return None,
    };
    let data = hex::decode(raw).ok()?;
    Revert::abi_decode(&data).ok().map(|revert| revert.reason)
}

/// A node error carrying `reason` as `Error(string)` revert data.
#[cfg(test)]
pub(crate) fn reverted_with(reason: &str) -> ProviderError {
    let data = hex::encode_prefixed(Revert { reason: reason.to_string() }.abi_encode());
    ProviderError::with_message(pharos_wallets::ProviderErrorCode::Other(3), "execution reverted")
        .with_data(Value::String(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharos_wallets::ProviderErrorCode;
    use serde_json::json;

    #[test]
    fn classifies_by_structure() {
        assert!(matches!(MintError::from(ProviderError::user_rejected()), MintError::Rejected));
        assert!(matches!(MintError::from(reverted_with("Sold out")), MintError::SoldOut));
        assert!(matches!(
            MintError::from(reverted_with("Mint 1-10 per tx")),
            MintError::QuantityOutOfRange
        ));
        let other = MintError::from(reverted_with("Paused"));
        assert_eq!(other.user_message(), "Paused");
    }

    #[test]
    fn does_not_match_message_text() {
        let err = ProviderError::with_message(ProviderErrorCode::Other(-32000), "Sold out");
        let err = MintError::from(err);
        assert!(matches!(err, MintError::Provider(_)));
        assert_eq!(err.user_message(), "Sold out");
    }

    #[test]
    fn reads_nested_revert_data() {
        let data = hex::encode_prefixed(Revert { reason: "Sold out".into() }.abi_encode());
        let err = ProviderError::with_message(ProviderErrorCode::InternalError, "reverted")
            .with_data(json!({ "code": 3, "data": data }));
        assert_eq!(revert_reason(&err).as_deref(), Some("Sold out"));

        let garbage = ProviderError::user_rejected().with_data(json!("0xdeadbeef"));
        assert_eq!(revert_reason(&garbage), None);
    }
}
