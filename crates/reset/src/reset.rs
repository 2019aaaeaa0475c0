//! The reset workflow: find a running task of the environment's service
//! and run the database setup command inside it.
//!
//! Each invocation performs exactly two control plane calls, in order:
//! `ListTasks`, then `ExecuteCommand` against the first task returned.
//! Nothing is retried; running the reset twice runs the setup routine
//! twice.

use carton_cloud::{ControlPlane, ControlPlaneError, ExecRequest, ExecutionResponse, TaskRef};
use carton_core::environment::{Environment, CLUSTER_NAME, DB_SETUP_COMMAND};

/// Errors that abort a reset. Every variant is fatal.
#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    /// `ListTasks` failed.
    #[error("Task lookup failed for service '{service}' in cluster '{cluster}': {source}")]
    TaskLookup {
        cluster: String,
        service: String,
        #[source]
        source: ControlPlaneError,
    },

    /// `ListTasks` succeeded but the service has nothing running.
    #[error("No running tasks for service '{service}' in cluster '{cluster}'")]
    NoRunningTasks { cluster: String, service: String },

    /// `ExecuteCommand` failed against the selected task.
    #[error("Command execution failed on task '{task}': {source}")]
    CommandExecution {
        task: TaskRef,
        #[source]
        source: ControlPlaneError,
    },
}

impl ResetError {
    /// Short name of the step that failed, for logs.
    pub fn step(&self) -> &'static str {
        match self {
            Self::TaskLookup { .. } | Self::NoRunningTasks { .. } => "lookup",
            Self::CommandExecution { .. } => "execution",
        }
    }

    /// Control plane call that failed, if the failure came from one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::TaskLookup { source, .. } | Self::CommandExecution { source, .. } => {
                Some(source.operation())
            }
            Self::NoRunningTasks { .. } => None,
        }
    }
}

/// Everything the operator is shown after a successful reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    pub environment: Environment,
    pub cluster: String,
    pub service: String,
    pub task: TaskRef,
    pub response: ExecutionResponse,
}

/// Reset and reseed the database of `environment`.
///
/// `container` selects the container inside the task; `None` lets the
/// control plane pick (valid for single-container tasks).
pub async fn reset_environment<P>(
    plane: &P,
    environment: Environment,
    container: Option<&str>,
) -> Result<ResetOutcome, ResetError>
where
    P: ControlPlane + ?Sized,
{
    let cluster = CLUSTER_NAME.to_string();
    let service = environment.service_name();

    tracing::info!(
        %environment,
        cluster = %cluster,
        service = %service,
        "Looking up running tasks",
    );

    let tasks = plane
        .list_tasks(&cluster, &service)
        .await
        .map_err(|source| ResetError::TaskLookup {
            cluster: cluster.clone(),
            service: service.clone(),
            source,
        })?;

    let task_count = tasks.len();
    let Some(task) = tasks.into_iter().next() else {
        return Err(ResetError::NoRunningTasks { cluster, service });
    };

    tracing::info!(task = %task, task_count, "Selected task");

    let request = ExecRequest {
        cluster: &cluster,
        task: &task,
        command: DB_SETUP_COMMAND,
        interactive: true,
        container,
    };

    let result = plane.execute_command(request).await;
    let response = match result {
        Ok(response) => response,
        Err(source) => return Err(ResetError::CommandExecution { task, source }),
    };

    tracing::info!(
        task = %task,
        session_id = response
            .session
            .as_ref()
            .and_then(|s| s.session_id.as_deref())
            .unwrap_or("-"),
        "Database setup command dispatched",
    );

    Ok(ResetOutcome {
        environment,
        cluster,
        service,
        task,
        response,
    })
}
