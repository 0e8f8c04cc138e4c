pub mod cli;
pub mod commands;
pub mod content;
pub mod env_loader;
pub mod error;
pub mod logging;

pub use error::ContentError;
