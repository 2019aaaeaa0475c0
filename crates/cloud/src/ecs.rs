//! Amazon ECS implementation of [`ControlPlane`].
//!
//! Credentials and region come from the standard AWS provider chain
//! (`AWS_PROFILE`, `AWS_REGION`, instance/role credentials, ...).

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ecs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ecs::operation::execute_command::ExecuteCommandOutput;

use crate::{ControlPlane, ControlPlaneError, ExecRequest, ExecSession, ExecutionResponse, TaskRef};

const OP_LIST_TASKS: &str = "ListTasks";
const OP_EXECUTE_COMMAND: &str = "ExecuteCommand";

/// Service error codes that indicate a credentials or permission problem.
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDeniedException",
    "UnrecognizedClientException",
    "ExpiredTokenException",
    "InvalidSignatureException",
    "MissingAuthenticationTokenException",
];

/// [`ControlPlane`] backed by the ECS API.
#[derive(Debug, Clone)]
pub struct EcsControlPlane {
    client: aws_sdk_ecs::Client,
}

impl EcsControlPlane {
    pub fn new(client: aws_sdk_ecs::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS configuration chain.
    ///
    /// `endpoint_url` overrides the ECS endpoint, e.g. to point at a
    /// local emulator.
    pub async fn from_env(endpoint_url: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;

        tracing::debug!(
            region = ?sdk_config.region(),
            endpoint_override = endpoint_url.is_some(),
            "ECS client configured",
        );

        Self::new(aws_sdk_ecs::Client::new(&sdk_config))
    }
}

#[async_trait]
impl ControlPlane for EcsControlPlane {
    async fn list_tasks(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Vec<TaskRef>, ControlPlaneError> {
        let output = self
            .client
            .list_tasks()
            .cluster(cluster)
            .service_name(service)
            .send()
            .await
            .map_err(|e| classify_sdk_error(OP_LIST_TASKS, e))?;

        Ok(output.task_arns().iter().map(TaskRef::new).collect())
    }

    async fn execute_command(
        &self,
        request: ExecRequest<'_>,
    ) -> Result<ExecutionResponse, ControlPlaneError> {
        let output = self
            .client
            .execute_command()
            .cluster(request.cluster)
            .task(request.task.as_str())
            .command(request.command)
            .interactive(request.interactive)
            .set_container(request.container.map(str::to_string))
            .send()
            .await
            .map_err(|e| classify_sdk_error(OP_EXECUTE_COMMAND, e))?;

        Ok(execution_response(&output))
    }
}

/// Copy the SDK output into the crate's own response type.
fn execution_response(output: &ExecuteCommandOutput) -> ExecutionResponse {
    ExecutionResponse {
        cluster_arn: output.cluster_arn().map(str::to_string),
        container_arn: output.container_arn().map(str::to_string),
        container_name: output.container_name().map(str::to_string),
        task_arn: output.task_arn().map(str::to_string),
        interactive: output.interactive(),
        session: output.session().map(|s| ExecSession {
            session_id: s.session_id().map(str::to_string),
            stream_url: s.stream_url().map(str::to_string),
            token_value: s.token_value().map(str::to_string),
        }),
    }
}

/// Map an SDK failure onto [`ControlPlaneError`].
///
/// Service errors are reported by their error code and message only;
/// the raw HTTP response stays out of the operator-facing text.
fn classify_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> ControlPlaneError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match &err {
        SdkError::ServiceError(_) => {
            let message = service_error_message(err.code(), err.message());
            if err.code().is_some_and(is_auth_error_code) {
                ControlPlaneError::Unauthorized { operation, message }
            } else {
                ControlPlaneError::Rejected { operation, message }
            }
        }
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => ControlPlaneError::Transport {
            operation,
            message: DisplayErrorContext(&err).to_string(),
        },
        _ => ControlPlaneError::Other {
            operation,
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}

fn service_error_message(code: Option<&str>, message: Option<&str>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => "unhandled service error".to_string(),
    }
}

fn is_auth_error_code(code: &str) -> bool {
    AUTH_ERROR_CODES.contains(&code)
}
