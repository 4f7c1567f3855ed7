//! Natural-language question answering over the `school_db` MySQL schema.
//!
//! A message is classified as small talk or a data question. Data questions
//! are translated to SQL by a language model, executed, and the rows are
//! explained back in plain language by a second model call.

pub mod answer;
pub mod classifier;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod memory;
pub mod pipeline;
pub mod prompts;
pub mod schema;
pub mod session;
pub mod small_talk;
pub mod sql_generator;

pub use config::AppConfig;
pub use error::{QaError, Result};
pub use pipeline::{Pipeline, TurnOutcome};
pub use session::Session;
