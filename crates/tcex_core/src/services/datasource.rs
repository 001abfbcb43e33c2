//! Export data source: connection parameters plus on-demand connections.
//!
//! There is no pooling here. Every operation asks the data source for a
//! fresh connection, uses it exclusively, and drops it before returning;
//! the spawned connection task ends when the client goes away.

use std::time::Duration;

use tokio_postgres::NoTls;

use crate::error::TcexError;
use crate::models::ExporterConfig;

/// How long to wait for the server before giving up on a connect.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The data source the schema reader and table dumper draw connections from.
///
/// Holds immutable connection parameters and produces a live
/// [`DbConnection`] on demand. Connection failures propagate to the caller.
#[derive(Debug, Clone)]
pub struct DataSource {
    config: ExporterConfig,
}

impl DataSource {
    /// Create a data source from connection parameters.
    pub fn new(config: ExporterConfig) -> Self {
        Self { config }
    }

    /// Get the connection parameters.
    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    /// Open a new database connection using the configured parameters.
    ///
    /// When a unix socket directory is configured it takes precedence over
    /// the TCP hostname.
    pub async fn connect(&self) -> Result<DbConnection, TcexError> {
        let mut pg_config = tokio_postgres::Config::new();
        match self.config.unix_socket() {
            Some(path) => {
                pg_config.host(path.to_string_lossy().as_ref());
            }
            None => {
                pg_config.host(self.config.host());
            }
        }
        pg_config.user(self.config.user());
        pg_config.password(self.config.password());
        pg_config.dbname(self.config.database());
        pg_config.application_name("tcex");
        pg_config.connect_timeout(CONNECT_TIMEOUT);

        let (client, connection) = pg_config.connect(NoTls).await.map_err(TcexError::from)?;

        // The connection task drives the protocol; it finishes once the
        // client is dropped.
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                tracing::warn!(error = %err, "connection task ended with error");
            }
        });

        tracing::debug!(url = %self.config.display_url(), "connection established");

        Ok(DbConnection { client })
    }
}

/// A live database connection.
///
/// Thin wrapper over the driver client; dropping it closes the connection.
#[derive(Debug)]
pub struct DbConnection {
    client: tokio_postgres::Client,
}

impl DbConnection {
    /// Execute a parameterized query and collect all rows.
    pub async fn query(
        &self,
        sql: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Vec<tokio_postgres::Row>, TcexError> {
        self.client.query(sql, params).await.map_err(TcexError::from)
    }

    /// Prepare a statement, exposing its column metadata.
    pub async fn prepare(&self, sql: &str) -> Result<tokio_postgres::Statement, TcexError> {
        self.client.prepare(sql).await.map_err(TcexError::from)
    }

    /// Execute a prepared statement and collect all rows.
    pub async fn query_statement(
        &self,
        statement: &tokio_postgres::Statement,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Vec<tokio_postgres::Row>, TcexError> {
        self.client.query(statement, params).await.map_err(TcexError::from)
    }
}
