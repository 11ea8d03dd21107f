//! Command-line interface for randomstring
//!
//! # Usage Examples
//!
//! ## Recipes
//! ```bash
//! # Generate from a YAML recipe with the recipe's own seed (if any)
//! randomstring recipe ids.yaml --count 100
//!
//! # Same recipe, secure source, four workers
//! randomstring recipe ids.yaml --count 10000 --secure --workers 4
//! ```
//!
//! ## Character sets
//! ```bash
//! randomstring charset lowers-alpha-numeric --length 8 --max-length 12 --prefix user-
//! ```
//!
//! Logging is controlled with `RUST_LOG` and goes to stderr; generated
//! strings go to stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use randomstring::recipe::Recipe;
use randomstring::{run_batch, write_output, CliCharset, RunOpts, SourceChoice};
use std::path::PathBuf;
use string_generator::{charset, charset_range, fix, Generator, NamedSet};

#[derive(Parser)]
#[command(name = "randomstring")]
#[command(about = "Generate random and structured strings from composable units")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate strings described by a YAML or TOML recipe file
    Recipe {
        /// Recipe file (.yaml, .yml or .toml)
        #[arg(value_name = "PATH")]
        path: PathBuf,

        #[command(flatten)]
        opts: RunOpts,
    },

    /// Generate strings from a single predefined character set
    Charset {
        /// Character set to sample from
        #[arg(value_enum)]
        set: CliCharset,

        /// Number of characters (lower bound when --max-length is larger)
        #[arg(long, short = 'l')]
        length: usize,

        /// Inclusive upper bound for a variable length
        #[arg(long)]
        max_length: Option<usize>,

        /// Literal text placed before the random part
        #[arg(long)]
        prefix: Option<String>,

        /// Literal text placed after the random part
        #[arg(long)]
        suffix: Option<String>,

        #[command(flatten)]
        opts: RunOpts,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (template, choice, opts) = match cli.command {
        Commands::Recipe { path, opts } => {
            let recipe = Recipe::from_file(&path)
                .with_context(|| format!("Failed to load recipe from {path:?}"))?;
            let template = recipe
                .generators()
                .with_context(|| format!("Invalid unit in recipe {path:?}"))?;
            tracing::info!("Loaded recipe {:?} with {} units", path, template.len());
            let choice = SourceChoice::resolve(&opts, recipe.seed);
            (template, choice, opts)
        }
        Commands::Charset {
            set,
            length,
            max_length,
            prefix,
            suffix,
            opts,
        } => {
            let mut template: Vec<Generator> = Vec::new();
            if let Some(prefix) = prefix {
                template.push(fix(prefix));
            }
            template.push(match max_length {
                Some(max) => charset_range(NamedSet::from(set), length, max),
                None => charset(NamedSet::from(set), length),
            });
            if let Some(suffix) = suffix {
                template.push(fix(suffix));
            }
            let choice = SourceChoice::resolve(&opts, None);
            (template, choice, opts)
        }
    };

    if let SourceChoice::Seeded(seed) = choice {
        tracing::info!("Using seeded session (seed {seed})");
    }

    let values = run_batch(template, choice, opts.count, opts.workers)
        .await
        .context("String generation failed")?;
    write_output(&mut std::io::stdout().lock(), &values, opts.json)?;
    Ok(())
}
