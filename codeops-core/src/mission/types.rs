//! Mission data types: engine mode, transcript messages, the outbound
//! request, the backend's response and the folded outcome.

use crate::attachment::Attachment;
use crate::error::SolverError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The single status value the backend uses to report success.
pub const SUCCESS_STATUS: &str = "success";

// ============================================================================
// ENGINE MODE
// ============================================================================

/// Backend execution strategy selected by the operator, forwarded verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    #[default]
    Cloud,
    Local,
}

impl EngineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineMode::Cloud => "cloud",
            EngineMode::Local => "local",
        }
    }

    pub fn toggle(&self) -> EngineMode {
        match self {
            EngineMode::Cloud => EngineMode::Local,
            EngineMode::Local => EngineMode::Cloud,
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloud" => Ok(EngineMode::Cloud),
            "local" => Ok(EngineMode::Local),
            other => Err(format!("unknown engine mode '{}' (expected cloud or local)", other)),
        }
    }
}

// ============================================================================
// TRANSCRIPT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One transcript entry. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }
}

// ============================================================================
// REQUEST / RESPONSE
// ============================================================================

/// Process-local mission sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissionId(pub u64);

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mission-{}", self.0)
    }
}

/// The outbound payload of one mission. The attachment list is the snapshot
/// taken when the mission was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionRequest {
    pub id: MissionId,
    pub task: String,
    pub mode: EngineMode,
    pub attachments: Vec<Attachment>,
}

/// Structured response from the solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    #[serde(default)]
    pub logs: Option<Vec<String>>,
    /// Non-string statuses are kept as their JSON text so they still read as
    /// a non-success response.
    #[serde(default, deserialize_with = "status_text")]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub attempts: Option<u32>,
    /// Error detail attached by the HTTP framework on server-side failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

fn status_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(status)) => Some(status),
        Some(other) => Some(other.to_string()),
    })
}

impl SolveResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }
}

/// How a mission ended.
///
/// `BackendFailure` produces an agent message; `TransportFailure` only a
/// log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionOutcome {
    Success {
        logs: Vec<String>,
        code: Option<String>,
    },
    BackendFailure {
        logs: Vec<String>,
    },
    TransportFailure {
        description: String,
    },
}

impl MissionOutcome {
    pub fn from_result(result: Result<SolveResponse, SolverError>) -> Self {
        match result {
            Ok(response) if response.is_success() => MissionOutcome::Success {
                logs: response.logs.unwrap_or_default(),
                code: response.code,
            },
            Ok(response) => MissionOutcome::BackendFailure {
                logs: response.logs.unwrap_or_default(),
            },
            Err(err) => MissionOutcome::TransportFailure {
                description: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MissionOutcome::Success { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            MissionOutcome::Success { .. } => "success",
            MissionOutcome::BackendFailure { .. } => "backend_failure",
            MissionOutcome::TransportFailure { .. } => "transport_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_mode_defaults_to_cloud() {
        assert_eq!(EngineMode::default(), EngineMode::Cloud);
    }

    #[test]
    fn engine_mode_round_trips_through_text() {
        assert_eq!("cloud".parse::<EngineMode>().unwrap(), EngineMode::Cloud);
        assert_eq!(" LOCAL ".parse::<EngineMode>().unwrap(), EngineMode::Local);
        assert!("gpu".parse::<EngineMode>().is_err());
        assert_eq!(EngineMode::Local.to_string(), "local");
        assert_eq!(EngineMode::Cloud.toggle(), EngineMode::Local);
        assert_eq!(EngineMode::Local.toggle(), EngineMode::Cloud);
    }

    #[test]
    fn response_with_missing_fields_decodes() {
        let response: SolveResponse = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(response.logs.is_none());
        assert!(response.code.is_none());
        assert!(!response.is_success());
    }

    #[test]
    fn framework_error_body_is_a_non_success_response() {
        let response: SolveResponse =
            serde_json::from_str(r#"{"detail":"All AI Systems failed."}"#).unwrap();
        assert!(response.status.is_none());
        assert!(!response.is_success());
        assert_eq!(
            response.detail,
            Some(serde_json::Value::String("All AI Systems failed.".to_string()))
        );
    }

    #[test]
    fn null_fields_are_absent() {
        let response: SolveResponse =
            serde_json::from_str(r#"{"status":null,"logs":null,"code":null}"#).unwrap();
        assert!(!response.is_success());
        assert!(response.logs.is_none());
    }

    #[test]
    fn non_string_status_is_a_backend_failure() {
        let response: SolveResponse =
            serde_json::from_str(r#"{"status":500,"logs":["boom"]}"#).unwrap();
        assert_eq!(response.status.as_deref(), Some("500"));
        assert!(!response.is_success());
        assert_eq!(
            MissionOutcome::from_result(Ok(response)),
            MissionOutcome::BackendFailure {
                logs: vec!["boom".to_string()]
            }
        );

        let response: SolveResponse =
            serde_json::from_str(r#"{"status":{"ok":true}}"#).unwrap();
        assert!(!response.is_success());
    }

    #[test]
    fn success_is_an_exact_match() {
        let response = SolveResponse {
            status: Some("Success".to_string()),
            ..SolveResponse::default()
        };
        assert!(!response.is_success());
    }

    #[test]
    fn outcome_from_result_covers_three_branches() {
        let ok = SolveResponse {
            status: Some(SUCCESS_STATUS.to_string()),
            logs: Some(vec!["parsed".to_string()]),
            code: Some("print(1)".to_string()),
            ..SolveResponse::default()
        };
        assert_eq!(
            MissionOutcome::from_result(Ok(ok)),
            MissionOutcome::Success {
                logs: vec!["parsed".to_string()],
                code: Some("print(1)".to_string()),
            }
        );

        let failed = SolveResponse {
            status: Some("error".to_string()),
            ..SolveResponse::default()
        };
        assert_eq!(
            MissionOutcome::from_result(Ok(failed)),
            MissionOutcome::BackendFailure { logs: Vec::new() }
        );

        let outcome =
            MissionOutcome::from_result(Err(SolverError::Transport("refused".to_string())));
        assert_eq!(
            outcome,
            MissionOutcome::TransportFailure {
                description: "Transport error: refused".to_string()
            }
        );
        assert_eq!(outcome.label(), "transport_failure");
    }
}
