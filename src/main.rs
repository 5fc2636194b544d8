use anyhow::Context;
use clap::Parser;
use docsite_filter::catalog::{Catalog, PageExtractor, load_site};
use docsite_filter::cli::{Cli, Commands};
use docsite_filter::query::SearchQuery;
use docsite_filter::render::{NO_MATCHES_TEXT, PageState, apply};
use docsite_filter::version::{Comparison, compare};
use docsite_filter::{Config, FilterServer, SiteState, evaluate};
use rmcp::{ServiceExt, transport::stdio};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    docsite_filter::tracing::init(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Filter { path, query } => filter(&config, &path, &query),
        Commands::Compare { base, target } => {
            println!("{}", Comparison::from(compare(&base, &target)));
            Ok(())
        }
        Commands::Expand { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let state = SiteState::new(config)?;
            print!("{}", state.expand_placeholders(&text).await);
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting docsite-filter MCP server");

    let state = Arc::new(SiteState::new(config)?);
    let server = FilterServer::new(state);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}

/// One-shot filter over a page or a whole site directory.
fn filter(config: &Config, path: &Path, raw: &str) -> anyhow::Result<()> {
    let extractor = PageExtractor::new(&config.layout)?;
    let catalogs = if path.is_dir() {
        load_site(path, &extractor)?
    } else {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        vec![extractor.extract(&path.display().to_string(), &html)]
    };

    let query = SearchQuery::parse(raw);
    for catalog in &catalogs {
        print_page(catalog, &query);
    }
    Ok(())
}

fn print_page(catalog: &Catalog, query: &SearchQuery) {
    let mut page = PageState::new(catalog);
    let outcome = evaluate(catalog, query);
    apply(&mut page, &outcome);

    println!("{} ({}/{})", catalog.source(), outcome.matched(), catalog.len());
    if page.indicator_count() > 0 {
        println!("  {}", NO_MATCHES_TEXT);
    }
    for id in page.visible_entries() {
        if let Some(entry) = catalog.entry(id) {
            println!("  {} (#{})", entry.name.trim(), entry.id);
        }
    }
}
