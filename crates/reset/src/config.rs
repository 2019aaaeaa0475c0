/// Runtime configuration loaded from environment variables.
///
/// Region, profile and credentials are resolved by the AWS SDK itself;
/// only settings specific to this tool are read here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetConfig {
    /// ECS endpoint override, e.g. a local emulator.
    pub ecs_endpoint_url: Option<String>,
    /// Container to target in multi-container tasks.
    pub container_name: Option<String>,
}

impl ResetConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `ECS_ENDPOINT_URL`   | unset   |
    /// | `ECS_CONTAINER_NAME` | unset   |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            ecs_endpoint_url: read("ECS_ENDPOINT_URL"),
            container_name: read("ECS_CONTAINER_NAME"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ResetConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ResetConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn unset_vars_yield_defaults() {
        assert_eq!(config_from(&[]), ResetConfig::default());
    }

    #[test]
    fn values_are_trimmed() {
        let config = config_from(&[
            ("ECS_ENDPOINT_URL", " http://localhost:4566 "),
            ("ECS_CONTAINER_NAME", "server\n"),
        ]);
        assert_eq!(
            config.ecs_endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        assert_eq!(config.container_name.as_deref(), Some("server"));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config_from(&[("ECS_ENDPOINT_URL", "   "), ("ECS_CONTAINER_NAME", "")]);
        assert_eq!(config, ResetConfig::default());
    }
}
