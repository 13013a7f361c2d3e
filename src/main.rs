//! avlabel - command line entry point
//!
//! Reads JSON-lines scan reports (a file or stdin) and prints one family
//! label per sample.
//!
//! Usage:
//!   avlabel reports.jsonl
//!   avlabel --api v2 --format json --tags < reports.jsonl

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use avlabel::constants::{APP_NAME, APP_VERSION};
use avlabel::logic::tables::loader::load_vendor_list;
use avlabel::{
    BatchSummary, EngineConfig, HashKind, LabelEngine, LabelError, LabelRecord, LabelResult,
    ReportVersion,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `hash<TAB>family<TAB>pup`
    Text,
    /// One JSON record per sample
    Json,
}

/// Extract normalized malware family names from AV scan reports
#[derive(Parser, Debug)]
#[command(name = "avlabel", version)]
struct Cli {
    /// JSON-lines report file (stdin when omitted)
    input: Option<PathBuf>,

    /// Report schema
    #[arg(long, default_value = "v3")]
    api: ReportVersion,

    /// Digest printed in text output and used for singleton families
    #[arg(long)]
    hash: Option<HashKind>,

    /// Engine configuration as JSON (environment is ignored when given)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generic tokens file
    #[arg(long)]
    generics: Option<PathBuf>,

    /// Alias table file
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// Taxonomy file
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Only these vendors vote (one name per line)
    #[arg(long)]
    vendors: Option<PathBuf>,

    /// Minimum number of vendors agreeing on a token
    #[arg(long)]
    min_agreement: Option<usize>,

    /// Leading ranked tokens inspected for PUP indicators
    #[arg(long)]
    pup_leading: Option<usize>,

    /// Name PUP-only samples after their first PUP token instead of a singleton
    #[arg(long)]
    pup_family: bool,

    /// AVClass-style tokenizer and agreement threshold
    #[arg(long)]
    compat: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Append the ranked tag summary to text output
    #[arg(long)]
    tags: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let config = build_config(&cli)?;
    let hash_kind = config.hash_kind;
    let engine = LabelEngine::from_config(config).context("failed to load rule tables")?;

    let lines = read_reports(cli.input.as_deref())?;
    log::info!("Labeling {} reports ({} schema)", lines.len(), cli.api);

    let results = engine.label_report_batch(cli.api.adapter(), &lines);
    write_results(&results, &cli, hash_kind).context("failed to write output")?;

    let summary = BatchSummary::from_results(&results);
    log::info!(
        "Done: {} samples, {} named, {} singletons, {} PUP, {} without labels, {} unparseable",
        summary.total,
        summary.named(),
        summary.singletons,
        summary.pup,
        summary.no_labels,
        summary.parser_errors
    );
    Ok(())
}

/// Defaults, then environment or JSON file, then command line flags
fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("invalid config file {}", path.display()))?,
        None => EngineConfig::from_env().context("invalid environment configuration")?,
    };

    if cli.compat {
        let compat = EngineConfig::avclass_compat();
        config.tokenizer = compat.tokenizer;
        config.ranker = compat.ranker;
    }
    if let Some(kind) = cli.hash {
        config.hash_kind = kind;
    }
    if let Some(path) = &cli.generics {
        config.tables.generics = Some(path.clone());
    }
    if let Some(path) = &cli.aliases {
        config.tables.aliases = Some(path.clone());
    }
    if let Some(path) = &cli.taxonomy {
        config.tables.taxonomy = Some(path.clone());
    }
    if let Some(path) = &cli.vendors {
        config.vendors = Some(load_vendor_list(path).context("failed to read vendor list")?);
    }
    if let Some(n) = cli.min_agreement {
        config.ranker.min_agreement = n;
    }
    if let Some(n) = cli.pup_leading {
        config.classifier.pup.leading_tokens = n;
    }
    if cli.pup_family {
        config.classifier.pup_family_fallback = true;
    }

    log::debug!("Effective config: {:?}", config);
    Ok(config)
}

fn read_reports(input: Option<&Path>) -> Result<Vec<String>> {
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("cannot read stdin")?,
    };
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn write_results(results: &[LabelResult], cli: &Cli, hash_kind: HashKind) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (index, result) in results.iter().enumerate() {
        match cli.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, &LabelRecord::from_result(result))?;
                writeln!(out)?;
            }
            OutputFormat::Text => match result {
                Ok(report) => {
                    write!(
                        out,
                        "{}\t{}\t{}",
                        report.identity.get(hash_kind),
                        report.family,
                        u8::from(report.is_pup)
                    )?;
                    if cli.tags {
                        write!(out, "\t{}", report.tags_summary())?;
                    }
                    writeln!(out)?;
                }
                Err(err) => match err {
                    LabelError::NoLabels { identity, .. } => {
                        log::warn!("{}: {}", identity.get(hash_kind), err);
                    }
                    LabelError::Parser(_) => log::warn!("report {}: {}", index + 1, err),
                },
            },
        }
    }

    out.flush()?;
    Ok(())
}
