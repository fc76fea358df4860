//! # pharos-mint
//!
//! Minting from the PharosRussia contract through an injected wallet.
//!
//! [`MintApp`] is the page: it loads the configuration, keeps the wallet session from
//! [`pharos_wallets`], binds an [`InjectedContract`] to it and drives the [`MintController`].
//! Progress and failures are reported as [`Status`] values to a [`StatusSink`].

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod app;
pub use app::{AppOptions, MintApp, PageState, short_address};

pub mod contract;
pub use contract::{
    CONFIRMATION_TIMEOUT, InjectedContract, MINT_GAS_LIMIT, MintReceipt, PharosRussia,
    RECEIPT_POLL_INTERVAL,
};

mod controller;
pub use controller::{DEFAULT_UNIT_PRICE, MintController, format_amount};

mod error;
pub use error::{MintError, QUANTITY_REASON, SOLD_OUT_REASON, revert_reason};

mod quantity;
pub use quantity::MintQuantity;

mod stats;
pub use stats::{RemainingSupply, SUPPLY_PLACEHOLDER, SupplyStats};

pub mod status;
pub use status::{Status, StatusKind, StatusSink};
