// Public exports
pub mod appdirs;
pub mod cli;
pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod scroll;
pub mod session;
pub mod subst;
pub mod surface;
pub mod term;
pub mod transcript;
pub mod xerr;

// Re-export key types needed for tests
pub use config::Source;
pub use error::{Error, Result};
