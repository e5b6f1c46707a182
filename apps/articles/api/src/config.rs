use core_config::{AppInfo, FromEnv, app_info, env_flag, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Prefix of the read pool's connection variables (`POSTGRES_DB_READ_HOST`, ...)
pub const READ_DB_PREFIX: &str = "POSTGRES_DB_READ";
/// Prefix of the write pool's connection variables (`POSTGRES_DB_WRITE_HOST`, ...)
pub const WRITE_DB_PREFIX: &str = "POSTGRES_DB_WRITE";

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub read_database: PostgresConfig,
    pub write_database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// `RUN_MIGRATIONS=1` applies pending migrations on the write pool at startup
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let read_database = PostgresConfig::from_env_prefixed(READ_DB_PREFIX)?;
        let write_database = PostgresConfig::from_env_prefixed(WRITE_DB_PREFIX)?;
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        Ok(Self {
            app: app_info!(),
            read_database,
            write_database,
            server,
            environment,
            run_migrations: env_flag("RUN_MIGRATIONS"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_vars(prefix: &str, host: &'static str) -> Vec<(String, Option<&'static str>)> {
        vec![
            (format!("{prefix}_HOST"), Some(host)),
            (format!("{prefix}_USER"), Some("articles")),
            (format!("{prefix}_PASSWORD"), Some("secret")),
            (format!("{prefix}_NAME"), Some("articles")),
        ]
    }

    #[test]
    fn test_config_reads_both_pools() {
        let mut vars = db_vars(READ_DB_PREFIX, "replica.local");
        vars.extend(db_vars(WRITE_DB_PREFIX, "primary.local"));
        vars.push(("SITE_PORT".to_string(), Some("9090")));
        vars.push(("RUN_MIGRATIONS".to_string(), Some("1")));
        vars.push(("POSTGRES_MAX_OPEN_CONS".to_string(), Some("25")));

        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();

            assert!(config.read_database.url().contains("@replica.local"));
            assert!(config.write_database.url().contains("@primary.local"));
            assert_eq!(config.read_database.max_connections, 25);
            assert_eq!(config.server.port, 9090);
            assert!(config.run_migrations);
            assert_eq!(config.app.name, "articles_api");
        });
    }

    #[test]
    fn test_config_requires_write_pool() {
        let mut vars = db_vars(READ_DB_PREFIX, "replica.local");
        vars.push((format!("{WRITE_DB_PREFIX}_HOST"), None));
        vars.push(("RUN_MIGRATIONS".to_string(), None));

        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("POSTGRES_DB_WRITE_HOST"));
        });
    }
}
