//! Ravello REST API client: implements `ApplicationService` over `ureq`.
//!
//! The session is cookie based: `POST /login` with HTTP Basic credentials
//! sets a session cookie that the shared `ureq::Agent` replays on every
//! later request.

use anyhow::{Context, Result};
use base64::Engine as _;
use ravello_common::Document;
use thiserror::Error;

use crate::application::ports::ApplicationService;
use crate::domain::{ApplicationDocument, TemplateImage};

/// Header the API uses to carry a human-readable failure reason.
pub const ERROR_MESSAGE_HEADER: &str = "ERROR-MESSAGE";

/// Failures talking to the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {path} returned HTTP {status}: {message}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
        message: String,
    },

    #[error("{method} {path} failed: {reason}")]
    Transport {
        method: &'static str,
        path: String,
        reason: String,
    },

    #[error("{method} {path} returned an unreadable body: {reason}")]
    Decode {
        method: &'static str,
        path: String,
        reason: String,
    },
}

/// Blocking client for the Ravello REST API.
pub struct RavelloClient {
    agent: ureq::Agent,
    base_url: String,
}

impl RavelloClient {
    /// Client for the API rooted at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("ravello-publish/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: &'static str, path: &str) -> ureq::Request {
        self.agent
            .request(method, &format!("{}{path}", self.base_url))
            .set("Accept", "application/json")
    }

    fn send(
        method: &'static str,
        path: &str,
        request: ureq::Request,
        body: Option<&Document>,
    ) -> Result<ureq::Response, ApiError> {
        tracing::debug!(method, path, "sending request");
        let result = match body {
            Some(doc) => request
                .set("Content-Type", "application/json")
                .send_json(doc),
            None => request.call(),
        };
        result.map_err(|e| match e {
            ureq::Error::Status(status, response) => ApiError::Status {
                method,
                path: path.to_string(),
                status,
                message: error_message(response),
            },
            other => ApiError::Transport {
                method,
                path: path.to_string(),
                reason: other.to_string(),
            },
        })
    }

    fn get_document(&self, path: &str) -> Result<Document, ApiError> {
        let response = Self::send("GET", path, self.request("GET", path), None)?;
        response
            .into_json::<Document>()
            .map_err(|e| ApiError::Decode {
                method: "GET",
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

impl ApplicationService for RavelloClient {
    fn login(&self, username: &str, password: &str) -> Result<()> {
        let path = "/login";
        let request = self
            .request("POST", path)
            .set("Authorization", &basic_auth(username, password));
        Self::send("POST", path, request, None)?;
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        let path = "/logout";
        Self::send("POST", path, self.request("POST", path), None)?;
        Ok(())
    }

    fn get_application(&self, app_id: u64) -> Result<ApplicationDocument> {
        let doc = self.get_document(&application_path(app_id))?;
        Ok(ApplicationDocument::new(doc))
    }

    fn get_image(&self, image_id: u64) -> Result<TemplateImage> {
        let doc = self.get_document(&format!("/images/{image_id}"))?;
        Ok(TemplateImage::new(doc))
    }

    fn update_application(&self, app: &ApplicationDocument) -> Result<()> {
        let id = app.id().context("application document has no usable id")?;
        let path = format!("/applications/{id}");
        Self::send("PUT", &path, self.request("PUT", &path), Some(app.document()))?;
        Ok(())
    }

    fn publish_application_updates(
        &self,
        app: &ApplicationDocument,
        start_all_draft_vms: bool,
    ) -> Result<()> {
        let id = app.id().context("application document has no usable id")?;
        let path = format!("/applications/{id}/publishUpdates");
        let request = self
            .request("POST", &path)
            .query("startAllDraftVms", if start_all_draft_vms { "true" } else { "false" });
        Self::send("POST", &path, request, None)?;
        Ok(())
    }
}

fn application_path(app_id: u64) -> String {
    format!("/applications/{app_id}")
}

/// `Authorization` header value for HTTP Basic authentication.
pub(crate) fn basic_auth(username: &str, password: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {token}")
}

fn error_message(response: ureq::Response) -> String {
    if let Some(message) = response
        .header(ERROR_MESSAGE_HEADER)
        .map(str::trim)
        .filter(|m| !m.is_empty())
    {
        return message.to_string();
    }
    let status_text = response.status_text().to_string();
    match response.into_string() {
        Ok(body) if !body.trim().is_empty() => body.trim().to_string(),
        _ => status_text,
    }
}
