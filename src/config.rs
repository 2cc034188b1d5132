use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Test,
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "local" => Some(Environment::Local),
            "test" => Some(Environment::Test),
            "development" => Some(Environment::Development),
            "production" => Some(Environment::Production),
            _ => None,
        }
    }

    /// Local and test runs bind to loopback by default.
    pub fn is_local(self) -> bool {
        matches!(self, Environment::Local | Environment::Test)
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Development => "development",
            Environment::Production => "production",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` keeps users in process memory.
    pub database_url: Option<String>,
    pub environment: Environment,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let env_name = env_or(&lookup, "APP_ENV", "development");
        let environment = Environment::parse(&env_name)
            .ok_or_else(|| format!("Invalid APP_ENV: {env_name}"))?;

        let default_host = if environment.is_local() {
            "127.0.0.1"
        } else {
            "0.0.0.0"
        };
        let host: IpAddr = env_or(&lookup, "APP_HOST", default_host)
            .parse()
            .map_err(|e| format!("Invalid APP_HOST: {e}"))?;

        let port: u16 = env_or(&lookup, "APP_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid APP_PORT: {e}"))?;

        let log_level = env_or(&lookup, "APP_LOG_LEVEL", "info");

        let db_max_connections: u32 = env_or(&lookup, "APP_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid APP_DB_MAX_CONNECTIONS: {e}"))?;

        Ok(Config {
            database_url,
            environment,
            host,
            port,
            log_level,
            db_max_connections,
        })
    }
}

fn env_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}
