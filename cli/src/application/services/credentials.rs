//! Application service: resolve the API password.

use anyhow::Result;

use crate::application::ports::PasswordPrompt;
use crate::domain::password_prompt;

/// Use the password given on the command line, or ask for it once.
///
/// # Errors
///
/// Returns an error if the interactive prompt fails (e.g. no TTY available).
pub fn resolve_password(
    cli_password: Option<String>,
    username: &str,
    prompt: &impl PasswordPrompt,
) -> Result<String> {
    if let Some(password) = cli_password {
        return Ok(password);
    }
    tracing::debug!("no command line password received, requesting password from user");
    prompt.prompt_password(&password_prompt(username))
}
