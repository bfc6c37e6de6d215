//! Jacket: turns social media mentions into lighting commands for an RGB LED jacket.

pub mod config;
pub mod error;
pub mod extract;
pub mod mention;
pub mod platform;

pub use error::JacketError;
pub use extract::{LightingCommand, extract};
