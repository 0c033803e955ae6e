use std::io::{self, Write};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use store_search::model::UnknownCategory;
use store_search::{
    logging, CatalogClient, CatalogItem, Category, SearchConfig, SearchOrchestrator, SearchState,
};

const ARTIST_PLACEHOLDER: &str = "Unknown";

#[derive(Debug, PartialEq)]
enum Command {
    SwitchCategory(Category),
    Search(String),
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Store Search Starting ===");

    let client = CatalogClient::new(SearchConfig::from_env()?)?;
    let config = client.config();
    tracing::info!(endpoint = %config.endpoint, limit = config.limit, "Using search endpoint");

    let mut orchestrator =
        SearchOrchestrator::with_client(client, tokio::runtime::Handle::current());
    let mut category = Category::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a query to search, /all /music /software /ebooks to filter, /quit to exit.");
    prompt(category)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::SwitchCategory(next))) => {
                        tracing::debug!(%next, "Category switched");
                        category = next;
                    }
                    Ok(Some(Command::Search(query))) => {
                        let label = query.clone();
                        orchestrator.perform_search(&query, category, move |success| {
                            tracing::debug!(query = %label, success, "Search finished");
                        });
                        render(orchestrator.state());
                    }
                    Ok(None) => {}
                    Err(e) => println!("{e}"),
                }
                prompt(category)?;
            }
            Some(success) = orchestrator.wait_for_completion(), if orchestrator.is_loading() => {
                if !success {
                    println!("The search failed. Check your connection and try again.");
                }
                render(orchestrator.state());
                prompt(category)?;
            }
        }
    }

    tracing::info!("Store Search shutting down");
    Ok(())
}

fn parse_command(line: &str) -> Result<Option<Command>, UnknownCategory> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    match line.strip_prefix('/') {
        Some("quit") => Ok(Some(Command::Quit)),
        Some(name) => name.parse().map(|c| Some(Command::SwitchCategory(c))),
        None => Ok(Some(Command::Search(line.to_string()))),
    }
}

fn prompt(category: Category) -> io::Result<()> {
    print!("[{category}] > ");
    io::stdout().flush()
}

fn render(state: &SearchState) {
    match state {
        // Only reached after a failed search; the failure is reported separately
        SearchState::NotSearchedYet => {}
        SearchState::Loading => println!("Loading..."),
        SearchState::NoResults => println!("Nothing found"),
        SearchState::Results(items) => {
            for item in items {
                println!("{}", format_item(item));
            }
        }
    }
}

fn format_item(item: &CatalogItem) -> String {
    let artist = if item.artist_name().is_empty() {
        ARTIST_PLACEHOLDER
    } else {
        item.artist_name()
    };
    format!(
        "{} - {} [{}, {}] {}",
        item.name(),
        artist,
        item.kind_display_name(),
        format_price(item),
        item.store_url()
    )
    .trim_end()
    .to_string()
}

fn format_price(item: &CatalogItem) -> String {
    if item.price().is_zero() {
        "Free".to_string()
    } else {
        format!("{} {}", item.price(), item.currency_code())
            .trim_end()
            .to_string()
    }
}
