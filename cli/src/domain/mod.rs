//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `crate::output`, `ureq`, `std::fs`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod application;
pub mod config;
pub mod error;
pub mod session;

pub use application::{ApplicationDocument, TemplateImage, VMS_PATH, clone_vm_name};
pub use config::{ApiConfig, DEFAULT_API_URL, RavelloConfig, resolve_api_url};
pub use error::{CloneError, ConfigError, SessionError};
pub use session::{Credentials, PublishRequest, password_prompt};
