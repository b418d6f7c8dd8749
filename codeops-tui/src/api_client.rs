//! HTTP client for the solver backend.

use crate::config::TuiConfig;
use async_trait::async_trait;
use codeops_core::{Attachment, MissionRequest, SolveResponse, SolverBackend, SolverError};
use reqwest::multipart::{Form, Part};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid solver URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Posts missions to `{api_base_url}{solve_path}` as multipart/form-data.
///
/// The HTTP status is not inspected. Every body is decoded as a
/// [`SolveResponse`], so an error body without a `status` field is reported
/// as a backend failure rather than a transport error.
#[derive(Debug, Clone)]
pub struct HttpSolver {
    client: reqwest::Client,
    solve_url: String,
}

impl HttpSolver {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        Self::with_url(config.solve_url())
    }

    pub fn with_url(solve_url: impl Into<String>) -> Result<Self, ApiClientError> {
        let solve_url = solve_url.into();
        if let Err(err) = reqwest::Url::parse(&solve_url) {
            return Err(ApiClientError::InvalidUrl {
                url: solve_url,
                reason: err.to_string(),
            });
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, solve_url })
    }

    pub fn solve_url(&self) -> &str {
        &self.solve_url
    }
}

#[async_trait]
impl SolverBackend for HttpSolver {
    async fn solve(&self, request: &MissionRequest) -> Result<SolveResponse, SolverError> {
        let form = build_form(request)?;

        tracing::debug!(
            mission = %request.id,
            url = %self.solve_url,
            attachments = request.attachments.len(),
            "Posting mission"
        );

        let response = self
            .client
            .post(&self.solve_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| SolverError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| SolverError::Transport(err.to_string()))?;

        let decoded: SolveResponse = serde_json::from_slice(&body).map_err(|err| {
            tracing::warn!(mission = %request.id, http_status = %status, "Undecodable solver body");
            SolverError::Decode(err.to_string())
        })?;

        if let Some(detail) = &decoded.detail {
            tracing::warn!(
                mission = %request.id,
                http_status = %status,
                detail = %detail,
                "Solver returned an error detail"
            );
        }
        tracing::debug!(
            mission = %request.id,
            http_status = %status,
            status = ?decoded.status,
            attempts = ?decoded.attempts,
            "Solver responded"
        );

        Ok(decoded)
    }
}

fn build_form(request: &MissionRequest) -> Result<Form, SolverError> {
    let mut form = Form::new()
        .text("task", request.task.clone())
        .text("mode", request.mode.as_str());
    for attachment in &request.attachments {
        form = form.part("files", file_part(attachment)?);
    }
    Ok(form)
}

fn file_part(attachment: &Attachment) -> Result<Part, SolverError> {
    Part::bytes(attachment.bytes().to_vec())
        .file_name(attachment.file_name().to_string())
        .mime_str(attachment.mime_type())
        .map_err(|err| {
            SolverError::Transport(format!(
                "invalid MIME type {:?} for {}: {}",
                attachment.mime_type(),
                attachment.file_name(),
                err
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_url_comes_from_config() {
        let config = TuiConfig {
            api_base_url: "http://127.0.0.1:9000/".to_string(),
            ..TuiConfig::default()
        };
        let solver = HttpSolver::new(&config).unwrap();
        assert_eq!(solver.solve_url(), "http://127.0.0.1:9000/api/solve");
    }

    #[test]
    fn unparseable_url_is_rejected() {
        assert!(matches!(
            HttpSolver::with_url("not a url"),
            Err(ApiClientError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn bad_mime_type_fails_before_sending() {
        let attachment = Attachment::new("a.py", "not a mime", b"x".to_vec());
        assert!(matches!(
            file_part(&attachment),
            Err(SolverError::Transport(_))
        ));
    }
}
