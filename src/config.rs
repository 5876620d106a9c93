use clap::Parser;

/// Runtime settings for the server.
///
/// Every option can be given as a flag or through the environment variable of
/// the same name; `.env` is loaded before parsing.
#[derive(Debug, Clone, Parser)]
#[clap(author, version, about = "JSON CRUD service for todo items")]
pub struct Config {
    #[clap(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    #[clap(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    #[clap(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    #[clap(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub db_password: String,

    #[clap(long, env = "DB_NAME", default_value = "todo_db")]
    pub db_name: String,

    #[clap(long, env = "DB_SSLMODE", default_value = "disable")]
    pub db_sslmode: String,

    /// Upper bound on open connections in the pool
    #[clap(long, env = "DB_MAX_CONNECTIONS", default_value_t = 100)]
    pub db_max_connections: u32,

    /// Idle connections the pool tries to keep around
    #[clap(long, env = "DB_MIN_IDLE", default_value_t = 10)]
    pub db_min_idle: u32,

    /// Connections older than this are closed and replaced
    #[clap(long, env = "DB_MAX_LIFETIME_SECS", default_value_t = 3600)]
    pub db_max_lifetime_secs: u64,

    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[clap(long, env = "PORT", default_value_t = 8081)]
    pub port: u16,

    /// Num of worker threads, defaults to the number of cores
    #[clap(long, env = "WORKERS")]
    pub workers: Option<usize>,
}

impl Config {
    /// libpq key/value connection string
    pub fn database_url(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            self.db_host,
            self.db_port,
            self.db_user,
            self.db_password,
            self.db_name,
            self.db_sslmode
        )
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
