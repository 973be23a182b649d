//! Resume screener library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod extraction;
pub mod matching;
pub mod classifier;
pub mod store;
pub mod output;

pub use error::{Result, ScreenerError};
pub use config::Config;
