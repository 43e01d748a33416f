//! Application service: publish cloned VMs into an existing application.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};

use crate::application::ports::{ApplicationService, IdentifierRewriter, ProgressReporter};
use crate::application::services::clone::clone_vms;
use crate::domain::{CloneError, PublishRequest, SessionError};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub application_name: String,
    pub template_name: String,
    /// Names of the VMs appended, in order.
    pub created: Vec<String>,
}

/// Log in, clone the template `request.count` times into the application,
/// then submit and publish the updated application.
///
/// Steps run strictly in order and none is retried:
/// 1. log in
/// 2. fetch the application
/// 3. fetch the template image
/// 4. append the clones
/// 5. replace the stored application with the updated document
/// 6. publish, starting the new VMs immediately
///
/// Submission and publication happen even when `count` is zero. If
/// publication fails after the update succeeded, the application stays
/// updated but unpublished.
///
/// # Errors
///
/// Returns [`SessionError`] if login or either fetch fails; nothing further is
/// attempted. Malformed documents surface as [`CloneError`]. Update and publish
/// failures are returned with context.
pub fn publish_vms(
    service: &impl ApplicationService,
    rewriter: &mut impl IdentifierRewriter,
    reporter: &impl ProgressReporter,
    request: &PublishRequest,
) -> Result<PublishOutcome> {
    let username = &request.credentials.username;

    reporter.step(&format!("logging in as {username}..."));
    service
        .login(username, &request.credentials.password)
        .map_err(|e| SessionError::Login {
            username: username.clone(),
            reason: format!("{e:#}"),
        })?;
    tracing::info!(%username, "logged in");

    reporter.step(&format!("fetching application {}...", request.app_id));
    let mut app = service
        .get_application(request.app_id)
        .map_err(|e| SessionError::ApplicationFetch {
            app_id: request.app_id,
            reason: format!("{e:#}"),
        })?;
    let application_name = app
        .name()
        .map_err(CloneError::MalformedApplication)?
        .to_string();
    reporter.success(&format!("Found Application: {application_name}"));

    reporter.step(&format!("fetching template {}...", request.template_id));
    let template = service
        .get_image(request.template_id)
        .map_err(|e| SessionError::TemplateFetch {
            template_id: request.template_id,
            reason: format!("{e:#}"),
        })?;
    let template_name = template
        .name()
        .map_err(CloneError::MalformedTemplate)?
        .to_string();
    reporter.success(&format!("Found template: {template_name}"));

    rewriter.reserve(app.document());
    let created = clone_vms(
        &mut app,
        &template,
        request.count,
        &request.basename,
        rewriter,
    )?;
    tracing::info!(count = created.len(), application = %application_name, "cloned template");

    reporter.step(&format!("updating application '{application_name}'..."));
    service
        .update_application(&app)
        .with_context(|| format!("failed to update application '{application_name}'"))?;

    reporter.step(&format!("publishing application '{application_name}'..."));
    service
        .publish_application_updates(&app, true)
        .with_context(|| format!("failed to publish application '{application_name}'"))?;
    tracing::info!(application = %application_name, "published application updates");

    if let Err(e) = service.logout() {
        tracing::debug!(error = %format!("{e:#}"), "logout failed");
        reporter.warn(&format!("could not log out: {e}"));
    }

    reporter.success("Success");
    Ok(PublishOutcome {
        application_name,
        template_name,
        created,
    })
}
