//! Shared `PostgreSQL` plumbing for the Diesel adapters.
//!
//! Diesel connections are synchronous, so every adapter offloads its work to
//! the blocking thread pool through [`run_blocking_with`] to keep the async
//! executor responsive.

use crate::config::TimeBankConfig;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for adapter internals.
pub(crate) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Errors raised while building the connection pool.
#[derive(Debug, Error)]
pub enum PoolSetupError {
    /// The configuration does not name a database.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    /// The pool could not establish its initial connections.
    #[error("failed to build PostgreSQL pool: {0}")]
    Pool(#[from] PoolError),
}

/// Builds an r2d2 pool from runtime configuration.
///
/// # Errors
///
/// Returns [`PoolSetupError::Config`] when no database URL is configured and
/// [`PoolSetupError::Pool`] when the initial connections fail.
pub fn connect_pool(config: &TimeBankConfig) -> Result<PgPool, PoolSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url()?);
    let pool = Pool::builder()
        .max_size(config.pool_max_size)
        .connection_timeout(config.pool_timeout)
        .build(manager)?;
    tracing::info!(
        max_size = config.pool_max_size,
        "connected PostgreSQL pool"
    );
    Ok(pool)
}

/// Runs a blocking task and maps join errors into the caller's error type.
pub(crate) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
pub(crate) fn get_conn_with<E, M>(pool: &PgPool, map_err: M) -> Result<PooledConn, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}
