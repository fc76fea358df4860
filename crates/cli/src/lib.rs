//! # pharos-cli
//!
//! The `pharos` operator tool: serves the mint site and drives the PharosRussia contract.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

pub mod args;
pub mod cmd;
pub mod handler;
pub mod local_wallet;
pub mod opts;
pub mod terminal;
pub mod utils;
