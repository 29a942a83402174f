// Main entry point
use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use craftylink::application;
use craftylink::domain::cache::{self, Collection};
use craftylink::domain::model::Source;
use craftylink::infrastructure::config::{self, load_config, Config};
use craftylink::infrastructure::logging::init_logging;
use craftylink::infrastructure::storage::open_store;
use craftylink::interfaces::cli::Cli;
use craftylink::interfaces::http::HttpServer;
use craftylink::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nShutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    let store = open_store(&config).await?;
    let state = AppState::new(config, store)?;

    if cli.status {
        print_status(&state).await?;
        return Ok(());
    }

    if let Some(hours) = cli.prune {
        let cutoff = cache::prune_cutoff(state.cache.now_ms(), hours);
        let removed = state.cache.store().prune_older_than(cutoff).await?;
        println!("Removed {} entries older than {} hours", removed, hours);
        return Ok(());
    }

    if let Some(query) = cli.news.as_deref() {
        tokio::select! {
            outcome = application::news::naver_news(&state.cache, state.services.naver.as_ref(), query) => {
                let fetched = outcome.into_result()?;
                eprintln!("{}", format!("[{}]", source_label(fetched.source)).cyan());
                println!("{}", serde_json::to_string_pretty(&fetched.payload)?);
            }
            _ = shutdown_rx => {
                eprintln!("Lookup interrupted");
            }
        }
        return Ok(());
    }

    let bind = cli
        .bind
        .clone()
        .unwrap_or_else(|| state.config.server.bind.clone());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", bind))?;

    HttpServer::new(state)
        .run(addr, async move {
            let _ = shutdown_rx.await;
        })
        .await?;

    Ok(())
}

fn source_label(source: Source) -> &'static str {
    match source {
        Source::Cache => "cache",
        Source::Api => "api",
    }
}

async fn print_status(state: &AppState) -> anyhow::Result<()> {
    println!("{}", "CraftyLink Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let settings: &Config = &state.config;
    match settings.storage.backend {
        config::StorageBackend::Sqlite => println!(
            "Store: sqlite at {}",
            config::get_database_path(settings).display()
        ),
        config::StorageBackend::Memory => println!("Store: in-memory"),
    }

    for collection in Collection::ALL {
        let count = state.cache.store().count(collection).await?;
        println!("  {:<22} {} entries", collection.as_str(), count);
    }

    println!(
        "Config: {}",
        config::get_config_path()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!(
        "Server: {} ({} requests/minute per IP)",
        settings.server.bind, settings.server.rate_limit_per_minute
    );

    let credentials = [
        (
            "Naver",
            settings.naver.client_id.is_some() && settings.naver.client_secret.is_some(),
        ),
        ("YouTube", settings.youtube.api_key.is_some()),
        ("Kakao", settings.kakao.rest_api_key.is_some()),
        (
            "Google CSE",
            settings.google.api_key.is_some() && settings.google.cse_id.is_some(),
        ),
        ("Pexels", settings.pexels.api_key.is_some()),
    ];
    for (name, configured) in credentials {
        if configured {
            println!("{} API: {}", name, "Configured".green());
        } else {
            println!("{} API: {}", name, "Not configured".yellow());
        }
    }

    Ok(())
}
