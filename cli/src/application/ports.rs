//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::cli`, or `crate::output`.

use anyhow::Result;
use ravello_common::Document;

use crate::domain::{ApplicationDocument, RavelloConfig, TemplateImage};

// ── Remote Service Port ───────────────────────────────────────────────────────

/// The Ravello REST API as seen by the publish use-case.
///
/// Every call blocks until the remote side answers. No call is retried.
pub trait ApplicationService {
    /// Establish an authenticated session.
    fn login(&self, username: &str, password: &str) -> Result<()>;
    /// End the session.
    fn logout(&self) -> Result<()>;
    /// Fetch an application, including its design.
    fn get_application(&self, app_id: u64) -> Result<ApplicationDocument>;
    /// Fetch a template image.
    fn get_image(&self, image_id: u64) -> Result<TemplateImage>;
    /// Replace the stored application with `app` in full.
    fn update_application(&self, app: &ApplicationDocument) -> Result<()>;
    /// Publish the saved design changes of `app`.
    ///
    /// `start_all_draft_vms` makes the new VMs start as soon as they are
    /// published.
    fn publish_application_updates(
        &self,
        app: &ApplicationDocument,
        start_all_draft_vms: bool,
    ) -> Result<()>;
}

// ── Identifier Port ───────────────────────────────────────────────────────────

/// Regenerates the locally-unique identifiers of a sub-document.
pub trait IdentifierRewriter {
    /// Record every identifier in `existing` as taken.
    fn reserve(&mut self, existing: &Document);
    /// Give every identifier in `subtree` a fresh value unique within the
    /// design and repoint the subtree's internal references at them.
    fn regenerate_identifiers(&mut self, subtree: &mut Document) -> Result<()>;
}

// ── Terminal Ports ────────────────────────────────────────────────────────────

/// Asks the user for a secret without echoing it.
pub trait PasswordPrompt {
    /// Show `prompt` and read the password.
    fn prompt_password(&self, prompt: &str) -> Result<String>;
}

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts where the configuration file lives and how it is read.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    fn load(&self) -> Result<RavelloConfig>;
    /// Path of the configuration file.
    fn path(&self) -> Result<std::path::PathBuf>;
}
