//! The explorer engine: block windows, address matching and the query
//! service built on top of them.

pub mod explorer;
pub mod matching;
pub mod window;

pub use explorer::{Explorer, ExplorerError};
pub use matching::AddressQuery;
pub use window::{BlockWindow, WindowError};
