//! Canned replies for small talk and for failed database queries.

use rand::seq::SliceRandom;

/// Reply used when no trigger phrase matches
pub const DEFAULT_REPLY: &str = "Hello! How can I help you with your school database today?";

/// Trigger phrase → reply, checked in order by substring match
const RESPONSES: &[(&str, &str)] = &[
    ("hi", "Hello! How can I help you with your school database today?"),
    ("hello", "Hi there! What would you like to know about the school database?"),
    ("hey", "Hey! How can I assist you?"),
    ("how are you", "I'm just a bot, but I'm here to help you!"),
    ("good morning", "Good morning! Ready to answer your school database questions."),
    ("good evening", "Good evening! How can I help?"),
    ("good afternoon", "Good afternoon! What would you like to know?"),
    ("what's up", "Not much, just ready to answer your questions!"),
    ("how's it going", "All good here! How can I help you?"),
    ("yo", "Yo! What's your question?"),
    ("sup", "Not much! How can I help?"),
    ("thanks", "You're welcome!"),
    ("thank you", "Happy to help!"),
    ("bye", "Goodbye! Have a great day!"),
    ("see you", "See you next time!"),
];

/// Messages shown instead of raw database errors
pub const FRIENDLY_SQL_ERROR_MESSAGES: &[&str] = &[
    "Sorry, I couldn't process your request due to a technical issue. Please try rephrasing your question.",
    "Oops! Something went wrong while processing your question. Please try again.",
    "There was a problem executing your request. Please try a different question.",
    "Sorry, I ran into an error. Could you try asking in a different way?",
];

/// Reply for a small-talk message.
///
/// A message that is exactly a trigger phrase (ignoring case and trailing
/// punctuation) gets that trigger's reply; otherwise the first trigger found
/// as a substring wins.
pub fn respond(text: &str) -> &'static str {
    let text = text.trim().to_lowercase();
    let bare = text.trim_end_matches(|c: char| matches!(c, '?' | '!' | '.'));

    RESPONSES
        .iter()
        .find(|(trigger, _)| *trigger == bare)
        .or_else(|| RESPONSES.iter().find(|(trigger, _)| text.contains(trigger)))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}

/// Pick one of the friendly database-error messages at random
pub fn friendly_sql_error() -> &'static str {
    FRIENDLY_SQL_ERROR_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FRIENDLY_SQL_ERROR_MESSAGES[0])
}
