use school_qa::config::AppConfig;
use school_qa::db::MySqlExecutor;
use school_qa::llm::LlmClient;
use school_qa::session::Session;
use school_qa::{Pipeline, TurnOutcome};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "school-qa")]
#[command(about = "Ask questions about the school database in plain language")]
#[command(version)]
struct Args {
    /// Ollama base URL (or set BASE_URL env var)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model name (or set MODEL_NAME env var)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session (default)
    Chat,
    /// Answer a single question and exit
    Ask {
        /// The question in natural language
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = AppConfig::from_env()?.with_overrides(args.base_url, args.model);
    info!("Using model {} at {}", config.llm.model, config.llm.base_url);
    info!(
        "Using database {} on {}:{}",
        config.database.database, config.database.host, config.database.port
    );

    let llm = Arc::new(LlmClient::from_config(&config.llm));
    let executor = Arc::new(MySqlExecutor::new(config.database.clone()));
    let pipeline = Pipeline::new(llm, executor);
    let mut session = Session::new(config.memory_window);

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&pipeline, &mut session).await,
        Commands::Ask { question } => run_ask(&pipeline, &mut session, &question).await,
    }
}

async fn run_ask(pipeline: &Pipeline, session: &mut Session, question: &str) -> Result<()> {
    let outcome = pipeline.handle_turn(session, question).await?;
    println!("{}", outcome.render());
    Ok(())
}

async fn run_chat(pipeline: &Pipeline, session: &mut Session) -> Result<()> {
    println!("\n{}", "=".repeat(80));
    println!(" 📚 School Database QA Chat");
    println!("{}", "=".repeat(80));
    println!(" Ask questions about your school database. Follow-up questions are supported!");
    println!(" Press Ctrl-D to quit.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("you › ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match pipeline.handle_turn(session, input).await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => {
                error!("Turn failed: {}", e);
                println!("assistant › ❌ Something went wrong: {}\n", e);
            }
        }
    }

    println!();
    info!(
        "Session {} ended after {} turns",
        session.id,
        session.history.len()
    );
    Ok(())
}

fn print_outcome(outcome: &TurnOutcome) {
    match outcome {
        TurnOutcome::Answered { sql, answer } => {
            println!("assistant › SQL Query:");
            for line in sql.lines() {
                println!("    {}", line);
            }
            println!("assistant › Answer:\n{}\n", answer);
        }
        other => println!("assistant › {}\n", other.render()),
    }
}
