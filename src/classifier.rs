//! Intent Classifier
//!
//! Keyword/regex heuristic that decides whether a chat message is small talk
//! or a question about the school database. There is no confidence score:
//! a message is small talk when it exactly matches a greeting/farewell
//! pattern, or when it mentions none of the data keywords.

use lazy_static::lazy_static;
use regex::RegexSet;
use serde::{Deserialize, Serialize};

/// Anchored greeting/farewell patterns, matched against trimmed lower-cased input
const SMALL_TALK_PATTERNS: &[&str] = &[
    r"^hi$",
    r"^hello$",
    r"^hey$",
    r"^how are you[?!.]*$",
    r"^good morning$",
    r"^good evening$",
    r"^good afternoon$",
    r"^what's up\??$",
    r"^how's it going\??$",
    r"^yo$",
    r"^sup\??$",
    r"^thanks$",
    r"^thank you$",
    r"^bye$",
    r"^see you$",
];

/// Substrings that mark a message as a data question
pub const DATA_KEYWORDS: &[&str] = &[
    "student",
    "class",
    "section",
    "parent",
    "mark",
    "subject",
    "scholarship",
    "bank",
    "list",
    "show",
    "find",
    "who",
    "which",
    "how many",
    "average",
    "total",
    "count",
    "name",
    "details",
    "record",
    "table",
];

lazy_static! {
    static ref SMALL_TALK_SET: RegexSet =
        RegexSet::new(SMALL_TALK_PATTERNS).expect("small talk patterns are valid regexes");
}

/// Routing decision for one chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    SmallTalk,
    DataQuestion,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True when the whole message is one of the fixed greetings or farewells
pub fn is_small_talk(text: &str) -> bool {
    SMALL_TALK_SET.is_match(&normalize(text))
}

/// True when the message mentions at least one data keyword
pub fn is_data_question(text: &str) -> bool {
    let text = normalize(text);
    DATA_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

pub fn classify(text: &str) -> Intent {
    if is_small_talk(text) || !is_data_question(text) {
        Intent::SmallTalk
    } else {
        Intent::DataQuestion
    }
}
