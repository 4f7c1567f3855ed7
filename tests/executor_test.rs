use school_qa::config::DatabaseConfig;
use school_qa::db::{MySqlExecutor, QueryExecutor};

fn unreachable_database() -> DatabaseConfig {
    DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        user: "root".to_string(),
        password: String::new(),
        database: "school_db".to_string(),
    }
}

#[tokio::test]
async fn test_connection_failure_is_reported_as_no_rows() {
    let executor = MySqlExecutor::new(unreachable_database());
    assert!(executor.execute("SELECT 1").await.is_none());
}

#[tokio::test]
async fn test_executor_stays_usable_after_a_failure() {
    let executor = MySqlExecutor::new(unreachable_database());
    assert!(executor.execute("SELEC * FROM students").await.is_none());
    assert!(executor.execute("SELECT COUNT(*) FROM students").await.is_none());
}

/// Needs a reachable MySQL configured through MYSQL_* (see test_db_connection).
/// Run with: cargo test --test executor_test -- --ignored
#[tokio::test]
#[ignore]
async fn test_live_values_are_converted_by_column_type() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = school_qa::AppConfig::from_env()?;
    let executor = MySqlExecutor::new(config.database);

    let rows = executor
        .execute(
            "SELECT COUNT(*) AS total, CAST(14 AS UNSIGNED) AS age, \
             CAST(87.50 AS DECIMAL(5,2)) AS avg_marks, NULL AS nothing, \
             'A' AS section_name, DATE('2024-06-01') AS day",
        )
        .await
        .ok_or("query failed against the live database")?;

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    let keys: Vec<&str> = row.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["total", "age", "avg_marks", "nothing", "section_name", "day"]);

    assert_eq!(row["total"], serde_json::json!(1));
    assert_eq!(row["age"], serde_json::json!(14));
    assert_eq!(row["avg_marks"], serde_json::json!(87.5));
    assert!(row["nothing"].is_null());
    assert_eq!(row["section_name"], "A");
    assert_eq!(row["day"], "2024-06-01");

    Ok(())
}
