//! Prompts - System prompts and human-turn templates for the two model calls
//!
//! The SQL prompt embeds the rendered `school_db` schema, the instructions and
//! three worked examples. The answer prompt asks for a plain-language
//! explanation of a query result.

use crate::schema;

const SQL_PROMPT_HEADER: &str = r#"You are an expert SQL generator. Use the following MySQL database schema named `{database}` to generate syntactically correct and optimized SQL queries.

Respond ONLY with the final SQL query. Do NOT explain or format your response in any other way.

Schema:
"#;

const SQL_PROMPT_INSTRUCTIONS: &str = r#"Instructions:
- Return only a valid MySQL query. No explanation.
- Use table aliases where appropriate.
- Always obey foreign key relationships.
- Keep query format minimal and SQL-compliant.
- Do not use JOINs that violate schema constraints.
"#;

/// Worked question/SQL pairs shown to the translator
pub const SQL_EXAMPLES: &[(&str, &str)] = &[
    (
        "Get total number of students in each section.",
        "SELECT sec.section_name, COUNT(*) AS total_students\nFROM students s\nJOIN sections sec ON s.section_id = sec.section_id\nGROUP BY s.section_id;",
    ),
    (
        "Retrieve scholarship name and amount for students who have any scholarship.",
        "SELECT s.first_name, s.last_name, sc.scholarship_name, sc.amount\nFROM students s\nJOIN scholarships sc ON s.scholarship_id = sc.scholarship_id;",
    ),
    (
        "Get full bank details of students.",
        "SELECT s.first_name, s.last_name, b.bank_name, b.account_number, b.ifsc_code\nFROM students s\nJOIN bankdetails b ON s.bank_account_id = b.bank_account_id;",
    ),
];

/// System prompt for the answer summarizer
pub const ANSWER_SYSTEM_PROMPT: &str = "You are a helpful assistant that explains SQL query results in natural language for a school database. Use the schema and examples provided.";

/// Full system prompt for NL → SQL translation
pub fn sql_system_prompt() -> String {
    let mut prompt = SQL_PROMPT_HEADER.replace("{database}", schema::DATABASE_NAME);
    prompt.push('\n');
    prompt.push_str(&schema::render_schema());
    prompt.push('\n');
    prompt.push_str(SQL_PROMPT_INSTRUCTIONS);
    prompt.push_str("\nExamples:\n");
    for (question, sql) in SQL_EXAMPLES {
        prompt.push_str(&format!("\nQuestion: {}\nAnswer:\n{}\n", question, sql));
    }
    prompt
}

/// Human turn for the answer summarizer
pub fn answer_user_prompt(question: &str, sql: &str, rows_json: &str) -> String {
    format!(
        "User question: {}\nSQL query: {}\nSQL result: {}\nPlease answer in natural language.",
        question, sql, rows_json
    )
}
