use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "poke-suggest")]
#[command(about = "Typo-tolerant name suggestions over a Pokémon catalog", long_about = None)]
pub struct Cli {
    /// Configuration file (default: <config dir>/poke-suggest/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Catalog JSON file, overriding the configured one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve suggestions as MCP tools over stdio
    Serve,
    /// Print suggestions for one query
    Query {
        query: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,
        #[arg(short, long)]
        ability: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}
