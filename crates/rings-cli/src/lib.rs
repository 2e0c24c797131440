pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod provider;

pub use error::{Result, RingsError};
