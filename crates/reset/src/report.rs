//! Operator-facing output for a finished reset.

use crate::reset::{ResetError, ResetOutcome};

/// Render the selected task reference followed by the raw execution
/// response as pretty-printed JSON.
pub fn render(outcome: &ResetOutcome) -> Result<String, serde_json::Error> {
    let response = serde_json::to_string_pretty(&outcome.response)?;
    Ok(format!("{}\n{response}", outcome.task))
}

/// One-line stderr diagnostic naming the step that failed.
pub fn failure_line(err: &ResetError) -> String {
    format!("db-reset: {} step failed: {err}", err.step())
}

#[cfg(test)]
mod tests {
    use carton_cloud::{ControlPlaneError, ExecSession, ExecutionResponse, TaskRef};
    use carton_core::environment::Environment;

    use super::*;

    fn outcome(response: ExecutionResponse) -> ResetOutcome {
        ResetOutcome {
            environment: Environment::Staging,
            cluster: "carton-case-management-cluster".into(),
            service: "carton-case-mgmt-staging-service".into(),
            task: TaskRef::new("task-123"),
            response,
        }
    }

    #[test]
    fn first_line_is_the_task() {
        let rendered = render(&outcome(ExecutionResponse::default())).unwrap();
        assert_eq!(rendered.lines().next(), Some("task-123"));
    }

    #[test]
    fn response_is_json_after_the_task() {
        let response = ExecutionResponse {
            task_arn: Some("task-123".into()),
            interactive: true,
            session: Some(ExecSession {
                session_id: Some("ecs-execute-command-abc".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let rendered = render(&outcome(response)).unwrap();
        let (_, body) = rendered.split_once('\n').unwrap();
        let parsed: serde_json::Value = serde_json::from_str(body).unwrap();

        assert_eq!(parsed["interactive"], true);
        assert_eq!(parsed["task_arn"], "task-123");
        assert_eq!(parsed["session"]["session_id"], "ecs-execute-command-abc");
        assert!(parsed["cluster_arn"].is_null());
    }

    #[test]
    fn failure_line_names_lookup_step() {
        let err = ResetError::NoRunningTasks {
            cluster: "carton-case-management-cluster".into(),
            service: "carton-case-mgmt-staging-service".into(),
        };
        assert_eq!(
            failure_line(&err),
            "db-reset: lookup step failed: No running tasks for service \
             'carton-case-mgmt-staging-service' in cluster 'carton-case-management-cluster'"
        );
    }

    #[test]
    fn failure_line_names_execution_step() {
        let err = ResetError::CommandExecution {
            task: TaskRef::new("task-9"),
            source: ControlPlaneError::Rejected {
                operation: "ExecuteCommand",
                message: "InvalidParameterException: execute command was not enabled".into(),
            },
        };
        let line = failure_line(&err);
        assert!(line.starts_with("db-reset: execution step failed: "), "{line}");
        assert!(line.contains("task 'task-9'"), "{line}");
        assert!(line.contains("execute command was not enabled"), "{line}");
    }
}
