//! Conversation memory: completed data exchanges, re-fed into prompts.

use crate::llm::ChatMessage;
use serde::{Deserialize, Serialize};

/// One answered data question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub sql: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationMemory {
    exchanges: Vec<Exchange>,
    /// Most recent exchanges exposed to prompts (0 = all)
    window: usize,
}

impl ConversationMemory {
    pub fn new(window: usize) -> Self {
        Self {
            exchanges: Vec::new(),
            window,
        }
    }

    pub fn record(&mut self, question: &str, sql: &str, answer: &str) {
        self.exchanges.push(Exchange {
            question: question.to_string(),
            sql: sql.to_string(),
            answer: answer.to_string(),
        });
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    fn recent(&self) -> &[Exchange] {
        if self.window == 0 || self.exchanges.len() <= self.window {
            &self.exchanges
        } else {
            &self.exchanges[self.exchanges.len() - self.window..]
        }
    }

    /// Prior questions paired with the SQL they produced
    pub fn sql_context(&self) -> Vec<ChatMessage> {
        self.recent()
            .iter()
            .flat_map(|e| [ChatMessage::user(e.question.clone()), ChatMessage::assistant(e.sql.clone())])
            .collect()
    }

    /// Prior questions paired with the answers given
    pub fn answer_context(&self) -> Vec<ChatMessage> {
        self.recent()
            .iter()
            .flat_map(|e| [ChatMessage::user(e.question.clone()), ChatMessage::assistant(e.answer.clone())])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn test_empty_memory_has_no_context() {
        let memory = ConversationMemory::new(10);
        assert!(memory.is_empty());
        assert!(memory.sql_context().is_empty());
        assert!(memory.answer_context().is_empty());
    }

    #[test]
    fn test_context_views() {
        let mut memory = ConversationMemory::new(10);
        memory.record("How many students?", "SELECT COUNT(*) FROM students;", "There are 40 students.");

        let sql = memory.sql_context();
        assert_eq!(sql.len(), 2);
        assert_eq!(sql[0].role, Role::User);
        assert_eq!(sql[0].content, "How many students?");
        assert_eq!(sql[1].role, Role::Assistant);
        assert_eq!(sql[1].content, "SELECT COUNT(*) FROM students;");

        let answers = memory.answer_context();
        assert_eq!(answers[1].content, "There are 40 students.");
    }

    #[test]
    fn test_window_keeps_most_recent_exchanges_in_order() {
        let mut memory = ConversationMemory::new(2);
        for i in 0..5 {
            memory.record(&format!("q{}", i), &format!("s{}", i), &format!("a{}", i));
        }
        assert_eq!(memory.len(), 5);

        let context: Vec<String> = memory.sql_context().into_iter().map(|m| m.content).collect();
        assert_eq!(context, vec!["q3", "s3", "q4", "s4"]);
    }

    #[test]
    fn test_zero_window_means_everything() {
        let mut memory = ConversationMemory::new(0);
        for i in 0..12 {
            memory.record(&format!("q{}", i), "s", "a");
        }
        assert_eq!(memory.answer_context().len(), 24);
    }
}
