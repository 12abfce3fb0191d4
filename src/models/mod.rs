//! This module contains the data models returned by the explorer.

pub mod block;
pub mod transaction;

pub use block::{Block, BlockConversionError};
pub use transaction::Transaction;
