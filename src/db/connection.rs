//! Database connection management using sqlx

use crate::config::DatabaseConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

/// Build connect options from the configured host, credentials and database
pub fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
}

/// Open a fresh connection; the caller is responsible for closing it
pub async fn connect(config: &DatabaseConfig) -> Result<MySqlConnection, sqlx::Error> {
    MySqlConnection::connect_with(&connect_options(config)).await
}
