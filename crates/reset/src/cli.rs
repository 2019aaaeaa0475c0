//! Command-line surface.

use clap::Parser;

use carton_core::environment::{Environment, ENV_STAGING};

/// Resets and reseeds the database for the Carton Case Management app.
///
/// Runs `npm run db:setup` inside a running ECS task of the selected
/// environment's service.
#[derive(Debug, Clone, Parser)]
#[command(name = "db-reset", version)]
pub struct Cli {
    /// Environment to reset -- either production or staging. Any other
    /// value resets staging.
    #[arg(long, default_value = ENV_STAGING)]
    pub environment: String,
}

impl Cli {
    /// The environment to target after coercing unrecognized input.
    pub fn resolved_environment(&self) -> Environment {
        Environment::from_arg(&self.environment)
    }

    /// Whether the supplied value had to be coerced to the default.
    pub fn environment_was_coerced(&self) -> bool {
        self.environment.parse::<Environment>().is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("db-reset").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn default_environment_is_staging() {
        let cli = parse(&[]);
        assert_eq!(cli.environment, "staging");
        assert_eq!(cli.resolved_environment(), Environment::Staging);
        assert!(!cli.environment_was_coerced());
    }

    #[test]
    fn production_flag() {
        let cli = parse(&["--environment", "production"]);
        assert_eq!(cli.resolved_environment(), Environment::Production);
    }

    #[test]
    fn equals_syntax() {
        let cli = parse(&["--environment=production"]);
        assert_eq!(cli.resolved_environment(), Environment::Production);
    }

    #[test]
    fn unknown_value_is_coerced() {
        let cli = parse(&["--environment", "prod"]);
        assert_eq!(cli.resolved_environment(), Environment::Staging);
        assert!(cli.environment_was_coerced());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["db-reset", "production"]).is_err());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["db-reset", "--dry-run"]).is_err());
    }
}
