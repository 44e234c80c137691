#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod app;
pub use app::FeedApp;

mod cli;
pub use cli::Cli;

mod config;
pub use config::{AppConfig, StorageConfig};
