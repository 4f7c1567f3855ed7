//! Test MySQL database connection
//!
//! Run with: cargo run --bin test_db_connection

use school_qa::config::AppConfig;
use school_qa::db::connect;
use school_qa::schema::TABLES;
use sqlx::Connection;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    println!("🔌 Testing MySQL Connection...\n");

    let config = AppConfig::from_env()?;
    let db = &config.database;

    println!("📡 Connecting to: {}@{}:{}/{}", db.user, db.host, db.port, db.database);

    match connect(db).await {
        Ok(mut conn) => {
            println!("✅ Connected successfully!\n");

            println!("🧪 Checking school tables...\n");

            let mut missing = 0;
            for table in TABLES {
                let sql = format!("SELECT COUNT(*) FROM {}", table.name);
                match sqlx::query_as::<_, (i64,)>(&sql).fetch_one(&mut conn).await {
                    Ok((count,)) => println!("   📋 {}: {} rows", table.name, count),
                    Err(e) => {
                        missing += 1;
                        println!("   ⚠️  {} not found or error: {}", table.name, e);
                    }
                }
            }

            conn.close().await?;

            if missing == 0 {
                println!("\n✅ Database connection test completed successfully!");
                println!("   You're ready to start asking questions!");
            } else {
                println!("\n⚠️  {} of {} tables could not be read.", missing, TABLES.len());
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Connection failed: {}", e);
            eprintln!("\n💡 Troubleshooting:");
            eprintln!("   1. Is MySQL running? (check with: mysqladmin ping)");
            eprintln!("   2. Is the database '{}' created?", db.database);
            eprintln!("   3. Are MYSQL_USER and MYSQL_PASSWORD correct?");
            eprintln!("   4. Is port {} accessible?", db.port);
            Err(format!("Connection failed: {}", e).into())
        }
    }
}
