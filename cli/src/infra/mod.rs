//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: HTTP calls to the Ravello
//! REST API, terminal prompts, and configuration file access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::cli` or `crate::output` are forbidden.

pub mod config;
pub mod luid;
pub mod prompt;
pub mod ravello;

pub use config::YamlConfigStore;
pub use luid::LuidRewriter;
pub use prompt::TerminalPasswordPrompt;
pub use ravello::{ApiError, RavelloClient};
