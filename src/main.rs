use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use ukkonen_tree::commands::{self, BenchOptions};
use ukkonen_tree::output::ColorMode;
use ukkonen_tree::tree::TreeConfig;
use ukkonen_tree::utils::{Alphabet, InputText};

#[derive(Parser)]
#[command(name = "ukt")]
#[command(about = "Build suffix trees and search them for substrings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with tree configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Build over lowercased text and match patterns case-insensitively
    #[arg(short = 'i', long, global = true)]
    ignore_case: bool,

    /// When to color output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Log construction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct InputArgs {
    /// Text to index
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// File to index (memory-mapped)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether patterns occur in the text
    Search {
        #[command(flatten)]
        input: InputArgs,

        /// Patterns to look for
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Print the offset of every occurrence
        #[arg(short, long)]
        positions: bool,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the tree structure
    Print {
        #[command(flatten)]
        input: InputArgs,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Show tree and construction statistics
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Time construction and search over random text
    Bench {
        /// Number of symbols to generate
        #[arg(short, long, default_value_t = 100_000)]
        length: usize,

        /// Alphabet of the generated text
        #[arg(short, long, value_enum, default_value_t = Alphabet::Dna)]
        alphabet: Alphabet,

        /// Number of search queries
        #[arg(short, long, default_value_t = 1_000)]
        queries: usize,

        /// Length of each query
        #[arg(long, default_value_t = 10)]
        pattern_len: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => TreeConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TreeConfig::default(),
    };
    if cli.ignore_case {
        config.case_insensitive = true;
    }
    let color = cli.color;

    match cli.command {
        Commands::Search {
            input,
            patterns,
            positions,
            json,
        } => {
            let text = InputText::from_args(input.text.as_deref(), input.file.as_deref())?;
            let tree = commands::build_tree(&text, &config, true)?;
            if !commands::run_search(&tree, &patterns, positions, json, color)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Print { input, json } => {
            let text = InputText::from_args(input.text.as_deref(), input.file.as_deref())?;
            let tree = commands::build_tree(&text, &config, true)?;
            commands::run_print(&tree, json, color)?;
        }
        Commands::Stats { input, json } => {
            let text = InputText::from_args(input.text.as_deref(), input.file.as_deref())?;
            let tree = commands::build_tree(&text, &config, true)?;
            commands::run_stats(&tree, json)?;
        }
        Commands::Bench {
            length,
            alphabet,
            queries,
            pattern_len,
            seed,
        } => {
            if length == 0 {
                anyhow::bail!("--length must be at least 1");
            }
            let options = BenchOptions {
                length,
                alphabet,
                queries,
                pattern_len,
                seed,
            };
            commands::run_bench(&options, &config)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
