// ABOUTME: Interactive chat shell for the wayfarer assistant with saved
// ABOUTME: in-memory sessions, plus a one-shot query mode.

use anyhow::{Result, bail};
use clap::Parser;
use rustyline::DefaultEditor;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wayfarer::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "wayfarer-chat", about = "Travel and finance assistant")]
struct Cli {
    /// Answer a single query and exit.
    #[arg(short, long)]
    query: Option<String>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wayfarer=info")),
        1 => EnvFilter::new("wayfarer=debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn new_session_id() -> String {
    format!("chat-{}", &uuid::Uuid::new_v4().simple().to_string()[..8])
}

fn print_help() {
    println!("Commands:");
    println!("  /new          start a fresh session");
    println!("  /sessions     list saved sessions");
    println!("  /switch <n>   resume session number n");
    println!("  /health       show which capabilities are available");
    println!("  /quit         exit\n");
}

async fn run_repl(assistant: &Assistant) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut current = new_session_id();

    println!("Wayfarer - weather, flights, hotels, currency and news.");
    println!("Type /help for commands.\n");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(_) => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        match line.split_once(' ').unwrap_or((line, "")) {
            ("/quit" | "/exit", _) => break,
            ("/help", _) => print_help(),
            ("/new", _) => {
                current = new_session_id();
                println!("Started session {}\n", current);
            }
            ("/sessions", _) => {
                let ids = assistant.sessions().list().await;
                if ids.is_empty() {
                    println!("No saved sessions yet.\n");
                }
                for (n, id) in ids.iter().enumerate() {
                    let marker = if *id == current { "*" } else { " " };
                    println!("{} {}. {}", marker, n + 1, id);
                }
                println!();
            }
            ("/switch", arg) => {
                let ids = assistant.sessions().list().await;
                match arg.trim().parse::<usize>() {
                    Ok(n) if (1..=ids.len()).contains(&n) => {
                        current = ids[n - 1].clone();
                        println!("Resumed session {}\n", current);
                    }
                    _ => println!("Usage: /switch <n> where n is from /sessions\n"),
                }
            }
            ("/health", _) => {
                let report = assistant.health();
                match report.status {
                    HealthStatus::Ok => println!("All capabilities available.\n"),
                    HealthStatus::Degraded => {
                        println!("Missing capabilities: {}\n", report.missing.join(", "))
                    }
                }
            }
            _ => match assistant.query(&current, line).await {
                Ok(reply) => println!("\n{}\n", reply.response),
                Err(e) => println!("\nError: {}\n", e),
            },
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env()?;
    info!(model = %config.llm.model, "starting wayfarer");
    let assistant = Assistant::from_config(&config)?;

    if let Some(query) = cli.query {
        if query.trim().is_empty() {
            bail!("--query must not be empty");
        }
        let reply = assistant.query(&new_session_id(), &query).await?;
        println!("{}", reply.response);
        return Ok(());
    }

    run_repl(&assistant).await
}
