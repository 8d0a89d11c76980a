use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

static CONFIG: OnceLock<SlippiConfig> = OnceLock::new();

const DEVELOPMENT: &str = include_str!("../envs/development.toml");
const PRODUCTION: &str = include_str!("../envs/production.toml");

const DEFAULT_USER_AGENT: &str = concat!("slippi-lookup/", env!("CARGO_PKG_VERSION"));

/// Anything that can go wrong while assembling a `SlippiConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown environment `{0}` (expected `development` or `production`)")]
    UnknownEnvironment(String),

    #[error("Unable to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable {name} has an invalid value `{value}`")]
    InvalidVariable { name: &'static str, value: String },

    #[error("No GraphQL endpoint configured")]
    MissingEndpoint,
}

/// Resolved client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlippiConfig {
    pub graphql_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

/// One layer of configuration. Unset values fall through to the layer below.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    graphql_url: Option<String>,
    timeout_ms: Option<u64>,
    user_agent: Option<String>,
}

impl ConfigLayer {
    /// Merges two layers. Values in `other` take precedence.
    fn merge(self, other: Self) -> Self {
        Self {
            graphql_url: other.graphql_url.or(self.graphql_url),
            timeout_ms: other.timeout_ms.or(self.timeout_ms),
            user_agent: other.user_agent.or(self.user_agent),
        }
    }

    fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Builds a layer out of `SLIPPI_*` variables, as returned by `lookup`.
    fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms = match lookup("SLIPPI_TIMEOUT_MS") {
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidVariable {
                name: "SLIPPI_TIMEOUT_MS",
                value,
            })?),

            None => None,
        };

        Ok(Self {
            graphql_url: lookup("SLIPPI_GRAPHQL_URL"),
            timeout_ms,
            user_agent: lookup("SLIPPI_USER_AGENT"),
        })
    }
}

impl SlippiConfig {
    /// Assembles configuration for `environment`.
    ///
    /// Layers, lowest precedence first: the bundled environment file, `SLIPPI_*`
    /// environment variables, then the optional user file.
    pub fn load(environment: &str, user_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(environment, user_file, |name| env::var(name).ok())
    }

    fn load_with<F>(environment: &str, user_file: Option<&Path>, vars: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bundled = match environment.to_lowercase().as_str() {
            "development" => DEVELOPMENT,
            "production" => PRODUCTION,
            _ => return Err(ConfigError::UnknownEnvironment(environment.to_string())),
        };

        let mut layer = ConfigLayer::from_toml(bundled)?.merge(ConfigLayer::from_vars(vars)?);

        if let Some(path) = user_file {
            let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            layer = layer.merge(ConfigLayer::from_toml(&contents)?);
        }

        let config = Self {
            graphql_url: layer.graphql_url.ok_or(ConfigError::MissingEndpoint)?,
            timeout_ms: layer.timeout_ms.unwrap_or(5000),
            user_agent: layer.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        tracing::debug!(?config, environment, "Loaded configuration");

        Ok(config)
    }

    /// Fetches the environment from an environment variable, defaulting to "development".
    pub fn current_env() -> String {
        env::var("SLIPPI_ENV").unwrap_or_else(|_| String::from("development"))
    }

    /// Retrieves the process-wide configuration for `current_env()`, loading it
    /// on first access. A failed load is not cached.
    pub fn get() -> Result<&'static Self, ConfigError> {
        if let Some(config) = CONFIG.get() {
            return Ok(config);
        }

        let config = Self::load(&Self::current_env(), None)?;

        Ok(CONFIG.get_or_init(|| config))
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_bundled_environments() {
        let dev = SlippiConfig::load_with("development", None, no_vars).unwrap();
        assert!(dev.graphql_url.contains("gql-gateway-dev"));
        assert_eq!(dev.timeout_ms, 10000);
        assert!(dev.user_agent.starts_with("slippi-lookup/"));

        let prod = SlippiConfig::load_with("PRODUCTION", None, no_vars).unwrap();
        assert_eq!(prod.graphql_url, "https://gql-gateway-dot-slippi.uc.r.appspot.com/graphql");
        assert_eq!(prod.timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_unknown_environment() {
        assert!(matches!(
            SlippiConfig::load_with("staging", None, no_vars),
            Err(ConfigError::UnknownEnvironment(env)) if env == "staging"
        ));
    }

    #[test]
    fn test_variables_override_bundled_values() {
        let vars = |name: &str| match name {
            "SLIPPI_GRAPHQL_URL" => Some("http://localhost:4000/graphql".to_string()),
            "SLIPPI_TIMEOUT_MS" => Some(" 250 ".to_string()),
            _ => None,
        };

        let config = SlippiConfig::load_with("production", None, vars).unwrap();
        assert_eq!(config.graphql_url, "http://localhost:4000/graphql");
        assert_eq!(config.timeout_ms, 250);
    }

    #[test]
    fn test_invalid_timeout_variable() {
        let vars = |name: &str| (name == "SLIPPI_TIMEOUT_MS").then(|| "soon".to_string());

        assert!(matches!(
            SlippiConfig::load_with("development", None, vars),
            Err(ConfigError::InvalidVariable { name: "SLIPPI_TIMEOUT_MS", .. })
        ));
    }

    #[test]
    fn test_user_file_wins() {
        let path = env::temp_dir().join(format!("slippi-config-test-{}.toml", std::process::id()));
        fs::write(&path, "timeout_ms = 42\nuser_agent = \"tester\"\n").unwrap();

        let vars = |name: &str| (name == "SLIPPI_TIMEOUT_MS").then(|| "900".to_string());
        let config = SlippiConfig::load_with("development", Some(&path), vars).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.timeout_ms, 42);
        assert_eq!(config.user_agent, "tester");
        assert!(config.graphql_url.contains("gql-gateway-dev"));
    }

    #[test]
    fn test_process_wide_config_is_loaded_once() {
        let first = SlippiConfig::get().unwrap();
        let second = SlippiConfig::get().unwrap();

        assert!(std::ptr::eq(first, second));
        assert!(!first.graphql_url.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(matches!(ConfigLayer::from_toml("graphql = \"x\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_user_file() {
        let path = Path::new("/definitely/not/here/slippi.toml");

        assert!(matches!(
            SlippiConfig::load_with("development", Some(path), no_vars),
            Err(ConfigError::Read { .. })
        ));
    }
}
