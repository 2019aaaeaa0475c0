//! `carton-cloud` -- container orchestration control plane access.
//!
//! Defines the [`ControlPlane`] trait consumed by the reset tooling,
//! the request/response types that cross it, and an ECS-backed
//! implementation in [`ecs`].

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

pub mod ecs;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Opaque reference to a running task (an ECS task ARN).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskRef(String);

impl TaskRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session handle returned for an interactive command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecSession {
    pub session_id: Option<String>,
    pub stream_url: Option<String>,
    pub token_value: Option<String>,
}

/// Response returned by the control plane after a command execution
/// request. Surfaced to the operator as-is; nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionResponse {
    pub cluster_arn: Option<String>,
    pub container_arn: Option<String>,
    pub container_name: Option<String>,
    pub task_arn: Option<String>,
    pub interactive: bool,
    pub session: Option<ExecSession>,
}

/// A command to run inside a task's container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest<'a> {
    pub cluster: &'a str,
    pub task: &'a TaskRef,
    pub command: &'a str,
    pub interactive: bool,
    /// Container to target; required by ECS only for multi-container tasks.
    pub container: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure reported by (or while reaching) the control plane.
///
/// `operation` names the API call (`ListTasks`, `ExecuteCommand`).
#[derive(Debug, thiserror::Error)]
pub enum ControlPlaneError {
    /// Credentials missing, expired, or lacking permission.
    #[error("{operation}: not authorized: {message}")]
    Unauthorized {
        operation: &'static str,
        message: String,
    },

    /// The control plane understood the request and refused it
    /// (unknown cluster/service, execute-command not enabled, ...).
    #[error("{operation}: rejected: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    /// The request never got a response (DNS, TLS, connect, timeout).
    #[error("{operation}: transport failure: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: {message}")]
    Other {
        operation: &'static str,
        message: String,
    },
}

impl ControlPlaneError {
    /// The API call that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Unauthorized { operation, .. }
            | Self::Rejected { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Other { operation, .. } => operation,
        }
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The two control plane operations the reset workflow depends on.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Running task references for `service` in `cluster`, in whatever
    /// order the control plane returns them.
    async fn list_tasks(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Vec<TaskRef>, ControlPlaneError>;

    /// Request execution of a command inside a task's container.
    async fn execute_command(
        &self,
        request: ExecRequest<'_>,
    ) -> Result<ExecutionResponse, ControlPlaneError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_ref_serializes_as_plain_string() {
        let task = TaskRef::new("arn:aws:ecs:us-east-1:123:task/c/abc");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, "\"arn:aws:ecs:us-east-1:123:task/c/abc\"");
        assert_eq!(task.to_string(), task.as_str());
    }

    #[test]
    fn error_messages_name_the_operation() {
        let err = ControlPlaneError::Rejected {
            operation: "ExecuteCommand",
            message: "execute command was not enabled".into(),
        };
        assert_eq!(err.operation(), "ExecuteCommand");
        assert_eq!(
            err.to_string(),
            "ExecuteCommand: rejected: execute command was not enabled"
        );
    }
}
