//! Wallet provider errors and their user-facing classification.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{borrow::Cow, time::Duration};

/// An error returned by an injected provider's `request`, following EIP-1193 and EIP-1474.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{}: {}", .code.message(), .message)]
pub struct ProviderError {
    pub code: ProviderErrorCode,
    /// error message
    pub message: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ProviderError {
    /// New [`ProviderError`] with the given [`ProviderErrorCode`].
    pub const fn new(code: ProviderErrorCode) -> Self {
        Self { message: Cow::Borrowed(code.message()), code, data: None }
    }

    /// Creates an error with a custom message.
    pub fn with_message<M>(code: ProviderErrorCode, message: M) -> Self
    where
        M: Into<String>,
    {
        Self { code, message: message.into().into(), data: None }
    }

    /// Attaches error data, e.g. revert data.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The user rejected the request.
    pub const fn user_rejected() -> Self {
        Self::new(ProviderErrorCode::UserRejectedRequest)
    }

    /// The wallet does not know the requested chain.
    pub const fn unrecognized_chain() -> Self {
        Self::new(ProviderErrorCode::UnrecognizedChain)
    }

    /// The provider does not support the method.
    pub fn unsupported_method(method: &str) -> Self {
        Self::with_message(
            ProviderErrorCode::UnsupportedMethod,
            format!("unsupported method: {method}"),
        )
    }

    /// The response could not be decoded into the expected shape.
    pub fn invalid_response<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self::with_message(ProviderErrorCode::InternalError, message)
    }

    /// Whether the user explicitly declined the request.
    pub fn is_user_rejection(&self) -> bool {
        self.code == ProviderErrorCode::UserRejectedRequest
    }
}

/// Provider error codes.
///
/// See <https://eips.ethereum.org/EIPS/eip-1193#provider-errors> and
/// <https://eips.ethereum.org/EIPS/eip-1474#error-codes>.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderErrorCode {
    /// 4001
    UserRejectedRequest,
    /// 4100
    Unauthorized,
    /// 4200
    UnsupportedMethod,
    /// 4900, the provider is disconnected from all chains.
    Disconnected,
    /// 4901, the provider is not connected to the requested chain.
    ChainDisconnected,
    /// 4902, emitted by `wallet_switchEthereumChain` for chains the wallet does not know.
    UnrecognizedChain,
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    /// Anything else, usually node errors passed through by the wallet.
    Other(i64),
}

impl ProviderErrorCode {
    /// Returns the error code as `i64`
    pub fn code(&self) -> i64 {
        match *self {
            Self::UserRejectedRequest => 4001,
            Self::Unauthorized => 4100,
            Self::UnsupportedMethod => 4200,
            Self::Disconnected => 4900,
            Self::ChainDisconnected => 4901,
            Self::UnrecognizedChain => 4902,
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::Other(c) => c,
        }
    }

    /// Returns the message associated with the error
    pub const fn message(&self) -> &'static str {
        match *self {
            Self::UserRejectedRequest => "User rejected the request",
            Self::Unauthorized => "Unauthorized",
            Self::UnsupportedMethod => "Unsupported method",
            Self::Disconnected => "Disconnected",
            Self::ChainDisconnected => "Chain disconnected",
            Self::UnrecognizedChain => "Unrecognized chain",
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::Other(_) => "Provider error",
        }
    }

    /// Whether the error means the wallet lost its connection to the network.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Disconnected | Self::ChainDisconnected)
    }
}

impl Serialize for ProviderErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'a> Deserialize<'a> for ProviderErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'a>,
    {
        i64::deserialize(deserializer).map(Into::into)
    }
}

impl From<i64> for ProviderErrorCode {
    fn from(code: i64) -> Self {
        match code {
            4001 => Self::UserRejectedRequest,
            4100 => Self::Unauthorized,
            4200 => Self::UnsupportedMethod,
            4900 => Self::Disconnected,
            4901 => Self::ChainDisconnected,
            4902 => Self::UnrecognizedChain,
            -32700 => Self::ParseError,
            -32600 => Self::InvalidRequest,
            -32601 => Self::MethodNotFound,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            _ => Self::Other(code),
        }
    }
}

/// Why a wallet connection could not be established.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("no injected wallet found")]
    NoWallet,
    #[error("connection rejected by user")]
    Rejected,
    #[error("connection timeout after {} seconds", .0.as_secs())]
    Timeout(Duration),
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("network error: {0}")]
    Network(ProviderError),
    #[error(transparent)]
    Provider(ProviderError),
}

impl ConnectError {
    /// The message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoWallet => "Wallet not found. Open this site in the DApp browser of your \
                               wallet (OKX, Bitget, MetaMask)"
                .to_string(),
            Self::Rejected => "Connection rejected by user".to_string(),
            Self::Timeout(_) => "Connection timed out. Please try again".to_string(),
            Self::NoAccounts => "The wallet did not share any account".to_string(),
            Self::Network(_) => "Network error. Check your connection".to_string(),
            Self::Provider(err) => format!("Connection error: {}", err.message),
        }
    }
}

impl From<ProviderError> for ConnectError {
    fn from(err: ProviderError) -> Self {
        if err.is_user_rejection() {
            Self::Rejected
        } else if err.code.is_network() {
            Self::Network(err)
        } else {
            Self::Provider(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wallet_error() {
        let err: ProviderError = serde_json::from_str(
            r#"{"code":4902,"message":"Unrecognized chain ID \"0xa8230\"."}"#,
        )
        .unwrap();
        assert_eq!(err.code, ProviderErrorCode::UnrecognizedChain);
        assert_eq!(err.data, None);

        let err: ProviderError =
            serde_json::from_str(r#"{"code":-32000,"message":"execution reverted"}"#).unwrap();
        assert_eq!(err.code, ProviderErrorCode::Other(-32000));
        assert_eq!(err.code.code(), -32000);
    }

    #[test]
    fn classifies_connect_errors() {
        assert!(matches!(
            ConnectError::from(ProviderError::user_rejected()),
            ConnectError::Rejected
        ));
        assert!(matches!(
            ConnectError::from(ProviderError::new(ProviderErrorCode::Disconnected)),
            ConnectError::Network(_)
        ));
        let generic = ConnectError::from(ProviderError::with_message(
            ProviderErrorCode::InternalError,
            "boom",
        ));
        assert_eq!(generic.user_message(), "Connection error: boom");
    }
}
