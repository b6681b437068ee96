#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod filter;
pub mod store;

pub use error::StoreError;
pub use filter::FilterState;
pub use store::{AppSettings, AppState};
