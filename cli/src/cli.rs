//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::application::services::credentials::resolve_password;
use crate::application::services::publish::publish_vms;
use crate::domain::{Credentials, PublishRequest, SessionError, resolve_api_url};
use crate::infra::{LuidRewriter, RavelloClient, TerminalPasswordPrompt, YamlConfigStore};
use crate::output::{OutputContext, TerminalReporter};

/// Publish several machines from a template into an existing Ravello application.
#[derive(Parser, Debug)]
#[command(name = "ravello-publish", version, about)]
pub struct Cli {
    /// Basename of the newly deployed VMs
    #[arg(short = 'b', long, value_parser = NonEmptyStringValueParser::new())]
    pub basename: String,

    /// Amount of VMs to deploy
    #[arg(short = 'n', long = "number")]
    pub number: u32,

    /// Template ID to deploy
    #[arg(short = 't', long)]
    pub template_id: u64,

    /// Application ID to update
    #[arg(short = 'a', long)]
    pub app_id: u64,

    /// The username with which to connect to the Ravello REST API
    #[arg(
        short = 'u',
        long,
        visible_alias = "user",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub username: String,

    /// The password with which to connect to the Ravello REST API.
    /// If not specified, the user is prompted at runtime for a password
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Base URL of the Ravello REST API (overrides ~/.ravello/config.yaml)
    #[arg(long, env = "RAVELLO_API_URL")]
    pub api_url: Option<String>,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve the remaining inputs and run the publish use-case.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, the password prompt, or any step of
    /// the publish sequence fails.
    pub fn run(self, ctx: &OutputContext) -> Result<()> {
        let Cli {
            basename,
            number,
            template_id,
            app_id,
            username,
            password,
            api_url,
            ..
        } = self;

        let config = YamlConfigStore::from_env().load()?;
        let api_url = resolve_api_url(api_url.as_deref(), &config)?;
        tracing::debug!(%api_url, "resolved API endpoint");

        let password = resolve_password(password, &username, &TerminalPasswordPrompt)?;
        let request = PublishRequest {
            basename,
            count: number,
            template_id,
            app_id,
            credentials: Credentials { username, password },
        };

        let client = RavelloClient::new(api_url);
        let reporter = TerminalReporter::new(ctx);
        let outcome = publish_vms(&client, &mut LuidRewriter::new(), &reporter, &request)?;
        drop(reporter);
        if !outcome.created.is_empty() {
            ctx.kv("Created:", &outcome.created.join(", "));
        }
        Ok(())
    }
}

/// Process exit status for a failed run.
///
/// Login and fetch failures exit with [`SessionError::EXIT_CODE`]; anything
/// else exits with 1.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.chain().any(|cause| cause.is::<SessionError>()) {
        SessionError::EXIT_CODE
    } else {
        1
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` picks the level.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
