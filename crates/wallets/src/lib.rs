//! # pharos-wallets
//!
//! Injected wallet support for the mint page, following
//! [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193).
//!
//! - [`detect_wallet`] picks one of the wallets injected into the page.
//! - [`ConnectionManager`] requests account access, moves the wallet to the configured chain and
//!   owns the resulting [`Session`].
//! - [`InjectedSigner`] sends transactions through the wallet, which signs and broadcasts them.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod detect;
pub use detect::{
    DetectedWallet, InjectedEthereum, ProviderFlags, WalletEnvironment, WalletKind, detect_wallet,
};

mod error;
pub use error::{ConnectError, ProviderError, ProviderErrorCode};

pub mod provider;
pub use provider::{ProviderEvent, ProviderHandle, WalletProvider};

mod session;
pub use session::{
    ConnectionManager, DEFAULT_REQUEST_TIMEOUT, Reconnect, Session, SessionChange, SessionState,
};

mod signer;
pub use signer::InjectedSigner;

#[cfg(any(test, feature = "test-utils"))]
mod mock;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockProvider;
