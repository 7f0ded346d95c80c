mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use vodplaylist::mapping::meta_from_entry;
use vodplaylist::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries JSON only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vodplaylist=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(ttl) = cli.ttl_secs {
        settings.ttl_secs = ttl;
    }

    let catalog = Catalog::with_http(settings)?;
    for url in &cli.sources {
        catalog.add_source(url).await.with_context(|| format!("adding source {url}"))?;
    }

    match cli.command {
        Commands::List { group: Some(group) } => {
            let metas: Vec<MetaPreview> = catalog
                .list_group(&group)
                .await
                .iter()
                .map(|e| meta_from_entry(e, catalog.settings()))
                .collect();
            print_json(&metas)
        }
        Commands::List { group: None } => print_json(&catalog.list_metas().await),
        Commands::Groups => print_json(&catalog.groups().await),
        Commands::Meta { id } => {
            let item = catalog.get_by_id(&id).await?;
            print_json(&item.to_meta(catalog.settings()))
        }
        Commands::Stream { id } => print_json(&catalog.resolve_stream(&id).await?),
        Commands::Refresh => {
            let snap = catalog.force_refresh().await;
            print_json(&serde_json::json!({
                "entries": snap.len(),
                "fetched_at": snap.fetched_at_epoch,
                "failed_sources": snap.failed_sources,
            }))
        }
        Commands::Sources => print_json(&catalog.sources().await),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
