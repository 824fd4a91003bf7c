//! MySQL storage client
//!
//! Owns the connection pool and runs prepared statements with positionally
//! bound [`Arguments`].

use sqlx::mysql::{MySqlArguments, MySqlPoolOptions, MySqlQueryResult, MySqlRow};
use sqlx::query::Query;
use sqlx::{MySql, MySqlPool, Transaction};
use std::time::Duration;
use type_mapping::{Arguments, BindValue};

use crate::errors::DaoError;
use config::DatabaseConfig;

#[derive(Debug, Clone)]
pub struct StorageClient {
    pool: MySqlPool,
}

impl StorageClient {
    /// Open a pool sized by the configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DaoError> {
        let mut pool_options = MySqlPoolOptions::new()
            .max_connections(config.max_open_connections)
            .min_connections(config.min_connections);

        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        crate::debug_log!(
            host = %config.host,
            schema = %config.schema,
            register_name = %config.register_name,
            "connecting to MySQL"
        );

        let pool = pool_options.connect(&config.connection_string()).await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn begin_tx(&self) -> Result<Transaction<'static, MySql>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Run a SELECT and collect every row
    pub async fn query(&self, sql: &str, args: &Arguments) -> Result<Vec<MySqlRow>, sqlx::Error> {
        bind_arguments(sqlx::query(sql), args)
            .fetch_all(&self.pool)
            .await
    }

    /// Run a SELECT expected to match at most one row
    pub async fn query_row(
        &self,
        sql: &str,
        args: &Arguments,
    ) -> Result<Option<MySqlRow>, sqlx::Error> {
        bind_arguments(sqlx::query(sql), args)
            .fetch_optional(&self.pool)
            .await
    }

    /// Run a modifying statement
    pub async fn exec(&self, sql: &str, args: &Arguments) -> Result<MySqlQueryResult, sqlx::Error> {
        bind_arguments(sqlx::query(sql), args)
            .execute(&self.pool)
            .await
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Bind every value in placeholder order
pub fn bind_arguments<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    args: &'q Arguments,
) -> Query<'q, MySql, MySqlArguments> {
    args.iter().fold(query, |query, value| match value {
        BindValue::Bool(v) => query.bind(*v),
        BindValue::Int(v) => query.bind(*v),
        BindValue::Float(v) => query.bind(*v),
        BindValue::Text(v) => query.bind(v.as_str()),
    })
}
