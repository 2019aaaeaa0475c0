//! `db-reset` -- resets and reseeds the Carton Case Management database.
//!
//! Finds a running ECS task of `carton-case-mgmt-{environment}-service`
//! in `carton-case-management-cluster` and runs `npm run db:setup`
//! inside it in interactive mode.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default | Description                                  |
//! |----------------------|----------|---------|----------------------------------------------|
//! | `AWS_REGION`         | no       | chain   | Region, read by the AWS SDK                  |
//! | `AWS_PROFILE`        | no       | chain   | Credentials profile, read by the AWS SDK     |
//! | `ECS_ENDPOINT_URL`   | no       | --      | ECS endpoint override                        |
//! | `ECS_CONTAINER_NAME` | no       | --      | Container to target in multi-container tasks |
//! | `RUST_LOG`           | no       | `carton_db_reset=info,carton_cloud=info` | Log filter |

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carton_cloud::ecs::EcsControlPlane;
use carton_db_reset::cli::Cli;
use carton_db_reset::config::ResetConfig;
use carton_db_reset::{report, reset};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carton_db_reset=info,carton_cloud=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ResetConfig::from_env();

    let environment = cli.resolved_environment();
    if cli.environment_was_coerced() {
        tracing::warn!(
            requested = %cli.environment,
            %environment,
            "Unrecognized environment, falling back to staging",
        );
    }

    let plane = EcsControlPlane::from_env(config.ecs_endpoint_url.as_deref()).await;

    let outcome =
        match reset::reset_environment(&plane, environment, config.container_name.as_deref())
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    step = e.step(),
                    operation = e.operation().unwrap_or("-"),
                    error = %e,
                    "Database reset failed",
                );
                eprintln!("{}", report::failure_line(&e));
                std::process::exit(1);
            }
        };

    tracing::info!(
        environment = %outcome.environment,
        cluster = %outcome.cluster,
        service = %outcome.service,
        task = %outcome.task,
        "Database reset requested",
    );

    match report::render(&outcome) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render execution response");
            println!("{}", outcome.task);
            println!("{:?}", outcome.response);
        }
    }
}
