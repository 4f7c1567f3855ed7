//! Answer Generator - SQL result → natural-language explanation

use crate::db::Record;
use crate::error::Result;
use crate::llm::{ChatMessage, LanguageModel};
use crate::memory::ConversationMemory;
use crate::prompts;
use std::sync::Arc;
use tracing::info;

pub struct AnswerGenerator {
    llm: Arc<dyn LanguageModel>,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    pub fn build_messages(
        &self,
        question: &str,
        sql: &str,
        rows: &[Record],
        memory: &ConversationMemory,
    ) -> Result<Vec<ChatMessage>> {
        let rows_json = serde_json::to_string(rows)?;

        let mut messages = vec![ChatMessage::system(prompts::ANSWER_SYSTEM_PROMPT)];
        messages.extend(memory.answer_context());
        messages.push(ChatMessage::user(prompts::answer_user_prompt(question, sql, &rows_json)));
        Ok(messages)
    }

    /// Explain `rows` as an answer to `question`; model failures propagate
    pub async fn generate(
        &self,
        question: &str,
        sql: &str,
        rows: &[Record],
        memory: &ConversationMemory,
    ) -> Result<String> {
        let messages = self.build_messages(question, sql, rows, memory)?;

        info!("[generate_answer] Invoking LLM for NL answer generation");
        let answer = self.llm.complete(&messages).await?.trim().to_string();
        info!("[generate_answer] NL answer generated: {}", answer);
        Ok(answer)
    }
}
