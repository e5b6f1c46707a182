use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, env_or_default, env_required, is_debug};

/// Pool settings for one PostgreSQL connection pool.
///
/// The service builds two of these, one per role:
///
/// ```ignore
/// let read = PostgresConfig::from_env_prefixed("POSTGRES_DB_READ")?;
/// let write = PostgresConfig::from_env_prefixed("POSTGRES_DB_WRITE")?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of open connections in the pool
    pub max_connections: u32,

    /// Connections kept idle in the pool
    pub min_connections: u32,

    pub connect_timeout_secs: u64,

    /// Upper bound on waiting for a free connection. The only deadline a
    /// request has against a stuck database.
    pub acquire_timeout_secs: u64,

    pub idle_timeout_secs: u64,

    pub max_lifetime_secs: u64,

    /// Log every SQL statement
    pub sqlx_logging: bool,

    pub sqlx_logging_level: LevelFilter,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Build a `postgres://` URL from discrete connection parts. User and
    /// password are percent-encoded.
    pub fn from_parts(host: &str, user: &str, password: &str, dbname: &str) -> Self {
        let user = urlencoding::encode(user);
        let password = urlencoding::encode(password);
        Self::new(format!(
            "postgres://{user}:{password}@{host}/{dbname}?sslmode=disable"
        ))
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_sqlx_logging(mut self, enabled: bool) -> Self {
        self.sqlx_logging = enabled;
        self
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(self.sqlx_logging_level);
        opt
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 100,
            min_connections: 0,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
            sqlx_logging: false,
            sqlx_logging_level: LevelFilter::Debug,
        }
    }
}

#[cfg(feature = "config")]
impl PostgresConfig {
    /// Load a pool config from `<PREFIX>_HOST`, `<PREFIX>_USER`,
    /// `<PREFIX>_PASSWORD` and `<PREFIX>_NAME` (all required).
    ///
    /// Shared settings:
    /// - `POSTGRES_MAX_OPEN_CONS` (default: 100)
    /// - `APP_DEBUG=1` enables SQL statement logging
    pub fn from_env_prefixed(prefix: &str) -> Result<Self, ConfigError> {
        let host = env_required(&format!("{prefix}_HOST"))?;
        let user = env_required(&format!("{prefix}_USER"))?;
        let password = env_required(&format!("{prefix}_PASSWORD"))?;
        let dbname = env_required(&format!("{prefix}_NAME"))?;

        let max_connections = env_or_default("POSTGRES_MAX_OPEN_CONS", "100")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "POSTGRES_MAX_OPEN_CONS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self::from_parts(&host, &user, &password, &dbname)
            .with_max_connections(max_connections)
            .with_sqlx_logging(is_debug()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_builds_url() {
        let config = PostgresConfig::from_parts("db:5432", "app", "secret", "articles");
        assert_eq!(
            config.url(),
            "postgres://app:secret@db:5432/articles?sslmode=disable"
        );
        assert_eq!(config.max_connections, 100);
        assert_eq!(config.min_connections, 0);
        assert!(!config.sqlx_logging);
    }

    #[test]
    fn test_from_parts_encodes_credentials() {
        let config = PostgresConfig::from_parts("db", "app user", "p@ss#1/?", "articles");
        assert_eq!(
            config.url(),
            "postgres://app%20user:p%40ss%231%2F%3F@db/articles?sslmode=disable"
        );
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = PostgresConfig::new("postgres://localhost/test")
            .with_max_connections(20)
            .with_sqlx_logging(true);
        assert_eq!(config.max_connections, 20);
        assert!(config.sqlx_logging);
        let _options = config.into_connect_options();
    }

    #[cfg(feature = "config")]
    fn read_vars(extra: [(&'static str, Option<&'static str>); 2]) -> Vec<(&'static str, Option<&'static str>)> {
        let mut vars = vec![
            ("POSTGRES_DB_READ_HOST", Some("replica")),
            ("POSTGRES_DB_READ_USER", Some("reader")),
            ("POSTGRES_DB_READ_PASSWORD", Some("pw")),
            ("POSTGRES_DB_READ_NAME", Some("articles")),
        ];
        vars.extend(extra);
        vars
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_prefixed_defaults() {
        temp_env::with_vars(
            read_vars([("POSTGRES_MAX_OPEN_CONS", None), ("APP_DEBUG", None)]),
            || {
                let config = PostgresConfig::from_env_prefixed("POSTGRES_DB_READ").unwrap();
                assert_eq!(
                    config.url(),
                    "postgres://reader:pw@replica/articles?sslmode=disable"
                );
                assert_eq!(config.max_connections, 100);
                assert!(!config.sqlx_logging);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_prefixed_pool_size_and_debug() {
        temp_env::with_vars(
            read_vars([("POSTGRES_MAX_OPEN_CONS", Some("25")), ("APP_DEBUG", Some("1"))]),
            || {
                let config = PostgresConfig::from_env_prefixed("POSTGRES_DB_READ").unwrap();
                assert_eq!(config.max_connections, 25);
                assert!(config.sqlx_logging);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_prefixed_missing_host() {
        temp_env::with_var_unset("POSTGRES_DB_WRITE_HOST", || {
            let err = PostgresConfig::from_env_prefixed("POSTGRES_DB_WRITE").unwrap_err();
            assert!(err.to_string().contains("POSTGRES_DB_WRITE_HOST"));
        });
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_prefixed_invalid_pool_size() {
        temp_env::with_vars(
            read_vars([("POSTGRES_MAX_OPEN_CONS", Some("lots")), ("APP_DEBUG", None)]),
            || {
                let err = PostgresConfig::from_env_prefixed("POSTGRES_DB_READ").unwrap_err();
                assert!(err.to_string().contains("POSTGRES_MAX_OPEN_CONS"));
            },
        );
    }
}
