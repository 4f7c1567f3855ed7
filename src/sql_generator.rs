//! SQL Generator - natural language question → MySQL query
//!
//! One model call per question. The reply is trusted as-is apart from
//! stripping markdown fencing: no syntax check, no schema check, no
//! filtering of destructive statements.

use crate::error::Result;
use crate::llm::{ChatMessage, LanguageModel};
use crate::memory::ConversationMemory;
use crate::prompts;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tracing::info;

lazy_static! {
    // A language tag is `sql`/`mysql` as a whole word, or any word that ends the fence line
    static ref FENCED_BLOCK: Regex =
        Regex::new(r"(?is)```(?:(?:mysql|sql)\b|[\w+-]*[ \t]*\n)?(.*?)```").unwrap();
    static ref LEADING_FENCE: Regex =
        Regex::new(r"(?i)^```(?:(?:mysql|sql)\b|[\w+-]*[ \t]*\n)?").unwrap();
    static ref TRAILING_FENCE: Regex = Regex::new(r"```$").unwrap();
}

fn clean_once(text: &str) -> String {
    let text = text.trim();

    // First fenced block with something in it; empty blocks come from nested fences
    let first_block = FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .find(|block| !block.is_empty());
    if let Some(block) = first_block {
        return block.to_string();
    }

    let text = LEADING_FENCE.replace(text, "");
    let text = TRAILING_FENCE.replace(text.trim(), "");
    let text = text.trim();

    // Inline `code` wrapper; a leftover ``` pair is handled on the next pass
    if text.len() >= 2 && text.starts_with('`') && text.ends_with('`') && !text.starts_with("``") {
        return text[1..text.len() - 1].trim().to_string();
    }
    text.to_string()
}

/// Strip markdown code fences and surrounding whitespace from a model reply.
///
/// Runs until nothing changes, so `clean_sql(clean_sql(x)) == clean_sql(x)`.
pub fn clean_sql(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

pub struct SqlGenerator {
    llm: Arc<dyn LanguageModel>,
    system_prompt: String,
}

impl SqlGenerator {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            system_prompt: prompts::sql_system_prompt(),
        }
    }

    /// Messages sent to the model for one question
    pub fn build_messages(&self, question: &str, memory: &ConversationMemory) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(self.system_prompt.clone())];
        messages.extend(memory.sql_context());
        messages.push(ChatMessage::user(question));
        messages
    }

    /// Translate a question into a single SQL string; model failures propagate
    pub async fn generate(&self, question: &str, memory: &ConversationMemory) -> Result<String> {
        info!("[generate_sql] Invoking LLM for SQL generation");
        let raw = self.llm.complete(&self.build_messages(question, memory)).await?;
        let sql = clean_sql(&raw);
        info!("[generate_sql] SQL generated: {}", sql);
        Ok(sql)
    }
}
