//! Question-Answering Pipeline
//!
//! One user message is processed end to end before the next is accepted:
//!
//! ```text
//! input → classify ─┬─ small talk → canned reply
//!                   └─ data → generate SQL → execute ─┬─ rows → explain
//!                                                     └─ failed → friendly error
//! ```
//!
//! Only the database stage is softened. A model failure in either the SQL
//! or the answer stage is returned as an error and ends the turn.

use crate::answer::AnswerGenerator;
use crate::classifier::{self, Intent};
use crate::db::QueryExecutor;
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::session::{ChatTurn, Session};
use crate::small_talk;
use crate::sql_generator::SqlGenerator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// What a single turn produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    SmallTalk { reply: String },
    Answered { sql: String, answer: String },
    QueryFailed { sql: String, message: String },
}

impl TurnOutcome {
    /// Text of the assistant turn appended to the history
    pub fn render(&self) -> String {
        match self {
            TurnOutcome::SmallTalk { reply } => reply.clone(),
            TurnOutcome::Answered { sql, answer } => {
                format!("**SQL Query:**\n{}\n\n**Answer:**\n{}", sql, answer)
            }
            TurnOutcome::QueryFailed { message, .. } => message.clone(),
        }
    }

    pub fn sql(&self) -> Option<&str> {
        match self {
            TurnOutcome::SmallTalk { .. } => None,
            TurnOutcome::Answered { sql, .. } | TurnOutcome::QueryFailed { sql, .. } => Some(sql.as_str()),
        }
    }
}

pub struct Pipeline {
    sql_generator: SqlGenerator,
    executor: Arc<dyn QueryExecutor>,
    answer_generator: AnswerGenerator,
}

impl Pipeline {
    pub fn new(llm: Arc<dyn LanguageModel>, executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            sql_generator: SqlGenerator::new(Arc::clone(&llm)),
            executor,
            answer_generator: AnswerGenerator::new(llm),
        }
    }

    /// Process one user message and append the turns to the session history.
    ///
    /// The user turn is recorded first; on error no assistant turn is added.
    pub async fn handle_turn(&self, session: &mut Session, input: &str) -> Result<TurnOutcome> {
        session.history.push(ChatTurn::user(input));

        let outcome = match classifier::classify(input) {
            Intent::SmallTalk => {
                info!("[SMALL TALK] User: {}", input);
                TurnOutcome::SmallTalk {
                    reply: small_talk::respond(input).to_string(),
                }
            }
            Intent::DataQuestion => {
                info!("[DATA REQUEST] User: {}", input);
                self.answer_data_question(session, input).await?
            }
        };

        session.history.push(ChatTurn::assistant(outcome.render()));
        Ok(outcome)
    }

    async fn answer_data_question(&self, session: &mut Session, question: &str) -> Result<TurnOutcome> {
        let started = Instant::now();
        let sql = self.sql_generator.generate(question, &session.memory).await?;
        info!("[SQL GENERATION] Time taken: {:.2} seconds", started.elapsed().as_secs_f64());
        info!("[SQL GENERATED] Query: {}", sql);

        let started = Instant::now();
        let rows = self.executor.execute(&sql).await;
        info!("[SQL EXECUTION] Time taken: {:.2} seconds", started.elapsed().as_secs_f64());

        let rows = match rows {
            Some(rows) => rows,
            None => {
                error!("[USER ERROR] SQL execution failed, user notified.");
                return Ok(TurnOutcome::QueryFailed {
                    sql,
                    message: small_talk::friendly_sql_error().to_string(),
                });
            }
        };

        let started = Instant::now();
        let answer = self
            .answer_generator
            .generate(question, &sql, &rows, &session.memory)
            .await?;
        info!("[NL ANSWER GENERATION] Time taken: {:.2} seconds", started.elapsed().as_secs_f64());

        session.memory.record(question, &sql, &answer);
        Ok(TurnOutcome::Answered { sql, answer })
    }
}
