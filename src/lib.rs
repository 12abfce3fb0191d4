#![warn(missing_docs)]
//! A block explorer that reads chain height, recent blocks and account
//! activity from an EVM node over JSON-RPC.

pub mod cmd;
pub mod config;
pub mod engine;
pub mod models;
pub mod providers;
pub mod test_helpers;
