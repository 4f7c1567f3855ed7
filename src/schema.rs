//! School Database Schema
//!
//! Static description of the `school_db` MySQL schema: tables, columns and
//! documented foreign-key relationships. The translator prompt is rendered
//! from this description so the model sees exactly one source of truth.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
    /// Trailing annotation, e.g. `FK → classes.class_id`
    pub note: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

/// `from_table.from_column → to_table.to_column`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub from_table: &'static str,
    pub from_column: &'static str,
    pub to_table: &'static str,
    pub to_column: &'static str,
}

const fn col(name: &'static str, sql_type: &'static str) -> Column {
    Column { name, sql_type, note: None }
}

const fn fk(name: &'static str, sql_type: &'static str, note: &'static str) -> Column {
    Column { name, sql_type, note: Some(note) }
}

const fn rel(
    from_table: &'static str,
    from_column: &'static str,
    to_table: &'static str,
    to_column: &'static str,
) -> Relationship {
    Relationship { from_table, from_column, to_table, to_column }
}

pub const DATABASE_NAME: &str = "school_db";

pub const TABLES: &[Table] = &[
    Table {
        name: "students",
        columns: &[
            col("roll_no", "INT PRIMARY KEY"),
            col("first_name", "VARCHAR"),
            col("last_name", "VARCHAR"),
            col("age", "TINYINT UNSIGNED"),
            fk("class_id", "INT", "FK → classes.class_id"),
            fk("section_id", "INT", "FK → sections.section_id"),
            fk("scholarship_id", "INT", "Nullable, FK → scholarships.scholarship_id"),
            fk("bank_account_id", "INT", "Nullable, FK → bankdetails.bank_account_id"),
        ],
    },
    Table {
        name: "bankdetails",
        columns: &[
            col("bank_account_id", "INT PRIMARY KEY"),
            fk("student_roll_no", "INT", "FK → students.roll_no"),
            col("bank_name", "VARCHAR"),
            col("account_number", "VARCHAR"),
            col("ifsc_code", "VARCHAR"),
        ],
    },
    Table {
        name: "parents",
        columns: &[
            col("parent_id", "INT PRIMARY KEY"),
            fk("student_roll_no", "INT", "FK → students.roll_no"),
            col("parent_name", "VARCHAR"),
            col("relation", "VARCHAR"),
        ],
    },
    Table {
        name: "marks",
        columns: &[
            col("mark_id", "INT PRIMARY KEY"),
            fk("student_roll_no", "INT", "FK → students.roll_no"),
            fk("subject_id", "INT", "FK → subjects.subject_id"),
            col("marks_obtained", "DECIMAL"),
        ],
    },
    Table {
        name: "classes",
        columns: &[
            col("class_id", "INT PRIMARY KEY"),
            col("class_name", "VARCHAR"),
            fk("section_id", "INT", "FK → sections.section_id"),
        ],
    },
    Table {
        name: "sections",
        columns: &[col("section_id", "INT PRIMARY KEY"), col("section_name", "CHAR")],
    },
    Table {
        name: "scholarships",
        columns: &[
            col("scholarship_id", "INT PRIMARY KEY"),
            col("scholarship_name", "VARCHAR"),
            col("amount", "DECIMAL"),
        ],
    },
    Table {
        name: "subjects",
        columns: &[col("subject_id", "INT PRIMARY KEY"), col("subject_name", "VARCHAR")],
    },
];

pub const RELATIONSHIPS: &[Relationship] = &[
    rel("students", "class_id", "classes", "class_id"),
    rel("students", "section_id", "sections", "section_id"),
    rel("students", "scholarship_id", "scholarships", "scholarship_id"),
    rel("students", "bank_account_id", "bankdetails", "bank_account_id"),
    rel("bankdetails", "student_roll_no", "students", "roll_no"),
    rel("parents", "student_roll_no", "students", "roll_no"),
    rel("marks", "student_roll_no", "students", "roll_no"),
    rel("marks", "subject_id", "subjects", "subject_id"),
    rel("classes", "section_id", "sections", "section_id"),
];

/// Numbered table listing followed by the relationship list
pub fn render_schema() -> String {
    let mut out = String::new();

    for (idx, table) in TABLES.iter().enumerate() {
        let _ = writeln!(out, "{}. {} (", idx + 1, table.name);
        let last = table.columns.len().saturating_sub(1);
        for (col_idx, column) in table.columns.iter().enumerate() {
            let comma = if col_idx == last { "" } else { "," };
            match column.note {
                Some(note) => {
                    let _ = writeln!(out, "    {} {}{} -- {}", column.name, column.sql_type, comma, note);
                }
                None => {
                    let _ = writeln!(out, "    {} {}{}", column.name, column.sql_type, comma);
                }
            }
        }
        out.push_str(")\n\n");
    }

    out.push_str("Relationships:\n");
    for r in RELATIONSHIPS {
        let _ = writeln!(
            out,
            "- {}.{} → {}.{}",
            r.from_table, r.from_column, r.to_table, r.to_column
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> Option<&'static Table> {
        TABLES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    #[test]
    fn test_eight_tables() {
        assert_eq!(TABLES.len(), 8);
        assert!(table("students").is_some());
        assert!(table("BANKDETAILS").is_some());
        assert!(table("teachers").is_none());
    }

    #[test]
    fn test_relationships_reference_real_columns() {
        for r in RELATIONSHIPS {
            let from = table(r.from_table).expect("from table exists");
            let to = table(r.to_table).expect("to table exists");
            assert!(from.columns.iter().any(|c| c.name == r.from_column), "{:?}", r);
            assert!(to.columns.iter().any(|c| c.name == r.to_column), "{:?}", r);
        }
    }

    #[test]
    fn test_students_to_bankdetails() {
        let links: Vec<&Relationship> = RELATIONSHIPS
            .iter()
            .filter(|r| {
                (r.from_table == "students" && r.to_table == "bankdetails")
                    || (r.from_table == "bankdetails" && r.to_table == "students")
            })
            .collect();
        assert_eq!(links.len(), 2);
        assert!(links
            .iter()
            .any(|r| r.from_table == "students" && r.from_column == "bank_account_id"));
    }

    #[test]
    fn test_render_schema() {
        let rendered = render_schema();
        assert!(rendered.starts_with("1. students (\n    roll_no INT PRIMARY KEY,\n"));
        assert!(rendered.contains("    bank_account_id INT -- Nullable, FK → bankdetails.bank_account_id\n)"));
        assert!(rendered.contains("8. subjects (\n    subject_id INT PRIMARY KEY,\n    subject_name VARCHAR\n)"));
        assert!(rendered.contains("- students.bank_account_id → bankdetails.bank_account_id\n"));
        assert!(rendered.ends_with("- classes.section_id → sections.section_id\n"));
    }
}
