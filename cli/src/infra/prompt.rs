//! Infrastructure implementation of the `PasswordPrompt` port.

use anyhow::{Context, Result};

use crate::application::ports::PasswordPrompt;

/// Masked terminal prompt backed by `dialoguer`.
pub struct TerminalPasswordPrompt;

impl PasswordPrompt for TerminalPasswordPrompt {
    fn prompt_password(&self, prompt: &str) -> Result<String> {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .context("cannot read password")
    }
}
