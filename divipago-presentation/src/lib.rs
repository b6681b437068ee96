#![warn(clippy::uninlined_format_args)]

pub mod currency;
pub mod share_message;

pub use currency::CurrencyFormatter;
pub use share_message::SharePresenter;
