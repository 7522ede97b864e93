use anyhow::anyhow;
use clap::Parser;
use colored::*;
use github_profile_lookup::cli::Cli;
use github_profile_lookup::render::render_state;
use github_profile_lookup::server::{start_server, AppState};
use github_profile_lookup::{GitHubClient, LookupController, LookupHandle, LookupState};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout belongs to the rendered profiles
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = GitHubClient::new(cli.client_config())?;
    info!(api_url = %cli.api_url, "Using GitHub API");

    let lookup = LookupController::spawn(Arc::new(client)).await?;

    if !cli.usernames.is_empty() {
        let outcome = run_once(&lookup, &cli.usernames).await;
        lookup.shutdown()?;
        return outcome;
    }

    if cli.serve {
        let outcome = run_server(lookup.clone(), cli.port).await;
        print_final_stats(&lookup).await;
        lookup.shutdown()?;
        return outcome;
    }

    run_interactive(lookup).await
}

/// Look up each username in turn and print the result
async fn run_once(lookup: &LookupHandle, usernames: &[String]) -> anyhow::Result<()> {
    let mut failures = 0;

    for username in usernames {
        lookup.submit(username.as_str()).await?;
        let state = lookup.settled().await?;

        if matches!(state, LookupState::Failure { .. }) {
            failures += 1;
        }
        println!("{}\n", render_state(&state));
    }

    if failures > 0 {
        return Err(anyhow!("{} of {} lookups failed", failures, usernames.len()));
    }
    Ok(())
}

async fn run_server(lookup: LookupHandle, port: u16) -> anyhow::Result<()> {
    let app_state = AppState {
        lookup,
        start_time: Instant::now(),
    };

    println!("{}", "GitHub Profile Lookup Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());
    println!("Press Ctrl+C to stop the server\n");

    tokio::select! {
        result = start_server(app_state, port) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\n🛑 Shutting down server...");
            Ok(())
        }
    }
}

/// Each stdin line is a submission; an observer task renders every state change
async fn run_interactive(lookup: LookupHandle) -> anyhow::Result<()> {
    println!("{}", "GitHub User Finder".bold().green());
    println!("{}", "Search for GitHub users and view their profile information".dimmed());
    println!("{}\n", "=".repeat(50).dimmed());
    println!("{}\n", render_state(&lookup.state()));

    let mut updates = lookup.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            println!("{}\n", render_state(&state));
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    lookup.submit(line).await?;
                }
                None => {
                    // Let the last lookup finish before exiting
                    lookup.settled().await?;
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                println!("\n🛑 Shutting down...");
                break;
            }
        }
    }

    print_final_stats(&lookup).await;
    lookup.shutdown()?;

    // The observer stops once the controller drops its state publisher
    let _ = renderer.await;
    Ok(())
}

async fn print_final_stats(lookup: &LookupHandle) {
    match lookup.stats().await {
        Ok(stats) => {
            println!("\n📊 Final Statistics:");
            println!("Submissions: {}", stats.submissions);
            println!("Fetches: {} started, {} completed", stats.fetches_started, stats.fetches_completed);
            println!("Stale responses discarded: {}", stats.stale_responses_discarded);
        }
        Err(e) => {
            eprintln!("Failed to get final statistics: {}", e);
        }
    }
}
