use core_config::{app_info, env_parse_or, server::ServerConfig, AppInfo, FromEnv};

use database::common::RetryConfig;
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL or PG_PASSWORD must be set
        let retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let run_migrations = env_parse_or("RUN_MIGRATIONS", true)?;

        Ok(Self {
            app: app_info!(),
            database,
            retry,
            server,
            environment,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_with_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://app:secret@db:5432/users")),
                ("APP_ENV", Some("production")),
                ("PORT", Some("9000")),
                ("RUN_MIGRATIONS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.database.url(), "postgres://app:secret@db:5432/users");
                assert_eq!(config.environment, Environment::Production);
                assert_eq!(config.server.port, 9000);
                assert!(config.run_migrations);
                assert_eq!(config.app.name, "users_api");
            },
        );
    }

    #[test]
    fn test_from_env_can_skip_migrations() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/users")),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(!config.run_migrations);
            },
        );
    }

    #[test]
    fn test_from_env_requires_database_credentials() {
        temp_env::with_vars(
            [("DATABASE_URL", None::<&str>), ("PG_PASSWORD", None)],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_port() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/users")),
                ("PORT", Some("not-a-port")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
