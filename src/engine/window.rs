//! Descending spans of block numbers ending at a given block.

use thiserror::Error;

/// Errors produced when a block window cannot be formed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// A window must contain at least one block.
    #[error("Block window must contain at least one block")]
    Empty,

    /// The window would reach below block zero.
    #[error("Block window of {count} blocks ending at block {start} reaches below block zero")]
    Underflow {
        /// The newest block of the requested window.
        start: u64,
        /// The requested number of blocks.
        count: u64,
    },
}

/// A validated span of `count` block numbers ending at `start`, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWindow {
    start: u64,
    count: u64,
}

impl BlockWindow {
    /// Creates a window covering `start, start - 1, ..., start - count + 1`.
    pub fn new(start: u64, count: u64) -> Result<Self, WindowError> {
        if count == 0 {
            return Err(WindowError::Empty);
        }
        // Equivalent to count > start + 1 without overflowing at u64::MAX.
        if count - 1 > start {
            return Err(WindowError::Underflow { start, count });
        }
        Ok(Self { start, count })
    }

    /// The newest block in the window.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// The oldest block in the window.
    pub fn end(&self) -> u64 {
        self.start - (self.count - 1)
    }

    /// The number of blocks in the window.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Block numbers in descending order.
    pub fn numbers(self) -> impl Iterator<Item = u64> {
        (self.end()..=self.start).rev()
    }
}
