use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use indexer::ingest_dir;
use search_core::{DocId, IndexEngine, Score, SearchMode};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Index a directory of text files and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents for a query
    Search {
        /// Input path (directory of .txt files or a single file)
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        query: String,
        #[arg(long, value_enum, default_value_t = Mode::Keyword)]
        mode: Mode,
        /// In filename mode, match the start of the filename instead of any part
        #[arg(long, default_value_t = false)]
        filename_prefix: bool,
        /// Maximum number of hits to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Suggest terms completing the last word of a query
    Suggest {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        query: String,
    },
    /// Print document and vocabulary counts
    Stats {
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Keyword,
    Prefix,
    Filename,
}

#[derive(Serialize)]
struct Hit<'a> {
    doc_id: DocId,
    score: Score,
    title: &'a str,
    filename: &'a str,
}

#[derive(Serialize)]
struct Suggestion {
    term: String,
    frequency: u32,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { input, query, mode, filename_prefix, limit } => {
            let engine = load(&input)?;
            let mode = match mode {
                Mode::Keyword => SearchMode::Keyword,
                Mode::Prefix => SearchMode::Prefix,
                Mode::Filename => SearchMode::Filename { prefix: filename_prefix },
            };
            let ranked = engine.search(&query, mode);
            tracing::info!(total_hits = ranked.len(), "search complete");
            let hits: Vec<Hit> = ranked
                .into_iter()
                .filter_map(|(doc_id, score)| {
                    let doc = engine.get_document(doc_id)?;
                    Some(Hit { doc_id, score, title: &doc.title, filename: &doc.filename })
                })
                .take(limit)
                .collect();
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Commands::Suggest { input, query } => {
            let engine = load(&input)?;
            let suggestions: Vec<Suggestion> = engine
                .suggest(&query)
                .into_iter()
                .map(|(term, frequency)| Suggestion { term, frequency })
                .collect();
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }
        Commands::Stats { input } => {
            let engine = load(&input)?;
            let stats = serde_json::json!({
                "total_docs": engine.document_count(),
                "vocabulary": engine.vocabulary_size(),
            });
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

fn load(input: &Path) -> Result<IndexEngine> {
    let mut engine = IndexEngine::new();
    ingest_dir(&mut engine, input)?;
    Ok(engine)
}
