pub mod todo_model;
pub mod todo_store;

#[cfg(test)]
pub mod memory_store;

use std::time::Duration;

use anyhow::Context;
use diesel::{r2d2::ConnectionManager, PgConnection, RunQueryDsl};

use crate::config::Config;

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

// completed and the timestamps stay nullable; reads coalesce them in `TodoRow`
const CREATE_TODOS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        title VARCHAR(100) NOT NULL,
        description TEXT NOT NULL,
        completed BOOLEAN DEFAULT FALSE,
        created_at TIMESTAMP,
        updated_at TIMESTAMP
    )";

/// Builds the connection pool.
///
/// Fails when the minimum idle connections cannot be opened within the
/// checkout timeout, so an unreachable database stops startup.
pub fn connect(config: &Config) -> anyhow::Result<Pool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());

    Pool::builder()
        .max_size(config.db_max_connections)
        .min_idle(Some(config.db_min_idle.min(config.db_max_connections)))
        .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime_secs)))
        .connection_timeout(Duration::from_secs(5))
        .build(manager)
        .with_context(|| {
            format!(
                "Failed to connect to PG database at {}:{}/{}",
                config.db_host, config.db_port, config.db_name
            )
        })
}

/// Creates the `todos` table if it does not exist yet
pub fn bootstrap_schema(pool: &Pool) -> anyhow::Result<()> {
    let conn = pool
        .get()
        .context("Failed to get a connection for schema bootstrap")?;

    diesel::sql_query(CREATE_TODOS_TABLE)
        .execute(&conn)
        .context("Failed to create todos table")?;

    Ok(())
}
