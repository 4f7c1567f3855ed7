//! Database module for MySQL connection and query execution
//!
//! Every query runs on its own short-lived connection: no pool, no reuse
//! across turns.

pub mod connection;
pub mod executor;

pub use connection::{connect, connect_options};
pub use executor::{MySqlExecutor, QueryExecutor, Record};
