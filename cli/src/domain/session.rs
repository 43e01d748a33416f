//! Inputs of a publish run: credentials and what to create where.

use std::fmt;

/// Text of the interactive password prompt for `username`.
#[must_use]
pub fn password_prompt(username: &str) -> String {
    format!("Enter password for Ravello REST API for user {username}")
}

/// Username/password pair for the REST API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fully resolved arguments for one run.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Prefix of the new VM names.
    pub basename: String,
    /// How many VMs to append.
    pub count: u32,
    /// Image to clone.
    pub template_id: u64,
    /// Application to extend.
    pub app_id: u64,
    pub credentials: Credentials,
}
