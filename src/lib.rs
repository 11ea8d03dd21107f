//! randomstring library
//!
//! Batch generation on top of the `string-generator` pipeline: resolves the
//! random source a run should use, spreads the requested number of strings
//! over worker threads, and renders the output.
//!
//! # CLI Usage
//!
//! ```bash
//! # Ten strings from a recipe, reproducible
//! randomstring recipe ids.yaml --count 10 --seed 42
//!
//! # Secure 24-character tokens
//! randomstring charset alpha-numeric --length 24 --count 5
//!
//! # Variable-length base64 with a prefix, as JSON
//! randomstring charset base64 --length 16 --max-length 32 --prefix key_ --json
//! ```

use clap::{Args, ValueEnum};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use string_generator::{build_with, Generator, NamedSet, SecureSource, Session};

// Re-export the pipeline and recipe crates for convenience
pub use generator_recipe as recipe;
pub use string_generator as generator;

/// Options shared by every generating command.
#[derive(Args, Clone, Debug)]
pub struct RunOpts {
    /// Number of strings to generate
    #[arg(long, short = 'n', default_value = "1")]
    pub count: usize,

    /// Seed for reproducible output (overrides a recipe's seed)
    #[arg(long, env = "RANDOMSTRING_SEED", conflicts_with = "secure")]
    pub seed: Option<u64>,

    /// Always use the OS random source, ignoring any recipe seed
    #[arg(long)]
    pub secure: bool,

    /// Worker threads sharing the run
    #[arg(long, default_value = "1")]
    pub workers: usize,

    /// Print a JSON array instead of one string per line
    #[arg(long)]
    pub json: bool,
}

/// Character sets selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliCharset {
    Numbers,
    Lowers,
    Uppers,
    AlphaNumeric,
    LowersAlphaNumeric,
    UppersAlphaNumeric,
    SymbolAll,
    All,
    Base64,
    Base64Url,
}

impl From<CliCharset> for NamedSet {
    fn from(set: CliCharset) -> Self {
        match set {
            CliCharset::Numbers => NamedSet::Numbers,
            CliCharset::Lowers => NamedSet::Lowers,
            CliCharset::Uppers => NamedSet::Uppers,
            CliCharset::AlphaNumeric => NamedSet::AlphaNumeric,
            CliCharset::LowersAlphaNumeric => NamedSet::LowersAlphaNumeric,
            CliCharset::UppersAlphaNumeric => NamedSet::UppersAlphaNumeric,
            CliCharset::SymbolAll => NamedSet::SymbolAll,
            CliCharset::All => NamedSet::All,
            CliCharset::Base64 => NamedSet::Base64,
            CliCharset::Base64Url => NamedSet::Base64Url,
        }
    }
}

/// Where a run draws its randomness from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChoice {
    /// OS random source, per draw
    Secure,
    /// One seeded session shared by all workers
    Seeded(u64),
}

impl SourceChoice {
    /// `--secure` wins, then `--seed`, then the recipe's seed.
    pub fn resolve(opts: &RunOpts, recipe_seed: Option<u64>) -> Self {
        if opts.secure {
            return SourceChoice::Secure;
        }
        match opts.seed.or(recipe_seed) {
            Some(seed) => SourceChoice::Seeded(seed),
            None => SourceChoice::Secure,
        }
    }
}

/// Split `count` runs over `workers` as evenly as possible.
pub fn split_work(count: usize, workers: usize) -> Vec<usize> {
    let workers = workers.max(1).min(count.max(1));
    let base = count / workers;
    let extra = count % workers;
    (0..workers).map(|w| base + usize::from(w < extra)).collect()
}

/// Generate `count` strings from `template`, cloning it for every run.
///
/// With a seeded choice and one worker the output order is deterministic;
/// with more workers the same multiset comes back in an unspecified order.
pub async fn run_batch(
    template: Vec<Generator>,
    choice: SourceChoice,
    count: usize,
    workers: usize,
) -> anyhow::Result<Vec<String>> {
    let started = Instant::now();
    let template = Arc::new(template);
    let session = match choice {
        SourceChoice::Seeded(seed) => Some(Arc::new(Session::with_seed(seed))),
        SourceChoice::Secure => None,
    };

    let shares = split_work(count, workers);
    tracing::debug!(?choice, count, workers = shares.len(), "starting batch");

    let mut handles = Vec::with_capacity(shares.len());
    for share in shares {
        let template = template.clone();
        let session = session.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let mut out = Vec::with_capacity(share);
            for _ in 0..share {
                let units = template.iter().cloned();
                let value = match &session {
                    Some(session) => session.build(units)?,
                    None => build_with(&mut SecureSource, units)?,
                };
                out.push(value);
            }
            Ok::<_, string_generator::GenerationError>(out)
        }));
    }

    let mut values = Vec::with_capacity(count);
    for handle in handles {
        values.extend(handle.await??);
    }

    tracing::info!(
        count = values.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generated strings"
    );
    Ok(values)
}

/// Render generated strings for stdout.
pub fn render_output(values: &[String], json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string(values)?);
    }
    Ok(values.join("\n"))
}

/// Write the rendered batch to `out`, followed by a newline.
///
/// An empty batch writes nothing in plain mode and `[]` in JSON mode.
pub fn write_output<W: Write>(out: &mut W, values: &[String], json: bool) -> anyhow::Result<()> {
    if values.is_empty() && !json {
        return Ok(());
    }
    writeln!(out, "{}", render_output(values, json)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(seed: Option<u64>, secure: bool) -> RunOpts {
        RunOpts {
            count: 1,
            seed,
            secure,
            workers: 1,
            json: false,
        }
    }

    #[test]
    fn test_source_resolution_order() {
        assert_eq!(
            SourceChoice::resolve(&opts(None, false), None),
            SourceChoice::Secure
        );
        assert_eq!(
            SourceChoice::resolve(&opts(None, false), Some(5)),
            SourceChoice::Seeded(5)
        );
        assert_eq!(
            SourceChoice::resolve(&opts(Some(9), false), Some(5)),
            SourceChoice::Seeded(9)
        );
        assert_eq!(
            SourceChoice::resolve(&opts(None, true), Some(5)),
            SourceChoice::Secure
        );
    }

    #[test]
    fn test_split_work() {
        assert_eq!(split_work(10, 3), vec![4, 3, 3]);
        assert_eq!(split_work(2, 8), vec![1, 1]);
        assert_eq!(split_work(0, 4), vec![0]);
        assert_eq!(split_work(5, 0), vec![5]);
    }

    #[test]
    fn test_render_output() {
        let values = vec!["a".to_string(), "b".to_string()];
        assert_eq!(render_output(&values, false).unwrap(), "a\nb");
        assert_eq!(render_output(&values, true).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_write_output_empty_batch() {
        let mut plain = Vec::new();
        write_output(&mut plain, &[], false).unwrap();
        assert!(plain.is_empty());

        let mut json = Vec::new();
        write_output(&mut json, &[], true).unwrap();
        assert_eq!(json, b"[]\n");

        let mut lines = Vec::new();
        write_output(&mut lines, &["x".to_string(), "y".to_string()], false).unwrap();
        assert_eq!(lines, b"x\ny\n");
    }

    #[test]
    fn test_cli_charset_maps_to_named_set() {
        assert_eq!(NamedSet::from(CliCharset::Base64Url), NamedSet::Base64Url);
        assert_eq!(NamedSet::from(CliCharset::Numbers), NamedSet::Numbers);
    }
}
