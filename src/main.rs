use anyhow::Context;
use clap::Parser;
use poke_suggest::cli::{Cli, Commands};
use poke_suggest::config::Config;
use poke_suggest::server::SuggestServer;
use poke_suggest::state::SuggestState;
use poke_suggest::tools::format_suggestions;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog {
        config.catalog_path = catalog;
    }

    poke_suggest::tracing::init(config.log.format);

    let state = Arc::new(SuggestState::load(&config).await?);

    match cli.command {
        Commands::Serve => serve(state).await,
        Commands::Query {
            query,
            limit,
            entry_type,
            ability,
            json,
        } => {
            let results = state
                .engine
                .suggest(
                    &query,
                    limit.unwrap_or(state.default_limit),
                    entry_type.as_deref(),
                    ability.as_deref(),
                )
                .await?;

            if json {
                let output = serde_json::to_string_pretty(&*results)
                    .context("Failed to serialize suggestions")?;
                println!("{}", output);
            } else {
                print!("{}", format_suggestions(&query, &results));
            }
            Ok(())
        }
    }
}

async fn serve(state: Arc<SuggestState>) -> anyhow::Result<()> {
    tracing::info!("Starting poke-suggest MCP server");

    let server = SuggestServer::new(state);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}
