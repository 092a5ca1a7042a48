pub mod config;
pub mod error;
pub mod logging;
pub mod ticket;
pub mod tui;

pub use error::BoardError;
