use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub frontend_url: String,
    pub run_migrations: bool,
    pub db_max_conn: u32,
    pub otel_endpoint: Option<String>,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;
        let frontend_url =
            std::env::var("FRONTEND_URL").context("Missing environment variable: FRONTEND_URL")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;

        let run_migrations = parse_run_migrations(&run_migrations_str)?;

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_max_conn = match std::env::var("DB_MAX_CONN") {
            Ok(value) => value
                .parse::<u32>()
                .context("DB_MAX_CONN must be a valid u32 integer")?,
            Err(_) => 5,
        };

        let otel_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|endpoint| !endpoint.trim().is_empty());

        Ok(Self {
            database_url,
            port,
            frontend_url,
            run_migrations,
            db_max_conn,
            otel_endpoint,
            is_dev: env_flag("DEV_MODE"),
            enable_file_log: env_flag("ENABLE_FILE_LOG"),
        })
    }
}

fn parse_run_migrations(value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!(
            "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
            other
        )),
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_migrations_is_strict() {
        assert!(parse_run_migrations("true").unwrap());
        assert!(!parse_run_migrations("false").unwrap());

        let err = parse_run_migrations("yes").unwrap_err();
        assert!(err.to_string().contains("got 'yes'"));
    }
}
