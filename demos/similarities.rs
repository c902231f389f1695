use std::{fs, path::PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::info;
use multidiff::{
    BuiltinTokenizer, Config, Hunk, ItemStore, LineOptions, LineTokenizer, Similarities, Token,
    WordTokenizer, find_similarities,
};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Lists the runs of lines or words shared by several files.
///
/// Run it with:
/// `cargo run --features serde --example similarities -- a.txt b.txt c.txt`
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Files to compare
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// YAML file with `similarities`, `lines` and `tokenizer` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compare words instead of lines
    #[arg(long)]
    words: bool,

    /// Overrides the minimum cluster size from the configuration file
    #[arg(long)]
    minimum_size: Option<usize>,

    /// Overrides the tolerance from the configuration file
    #[arg(long)]
    tolerance: Option<usize>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    similarities: Config,
    lines: LineOptions,
    tokenizer: BuiltinTokenizer,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(args.verbose.log_level_filter().as_str().to_lowercase())
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to initialise tracing")?;

    let mut config = match &args.config {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            serde_yaml::from_reader::<_, DemoConfig>(file)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => DemoConfig::default(),
    };
    if args.words {
        config.tokenizer = BuiltinTokenizer::Word;
    }
    if let Some(minimum_size) = args.minimum_size {
        config.similarities.minimum_cluster_size = minimum_size;
    }
    if let Some(tolerance) = args.tolerance {
        config.similarities.tolerance = tolerance;
    }

    let word_tokenizer = WordTokenizer::new(&config.lines.ignore_patterns)?;
    let line_tokenizer = LineTokenizer::new(config.lines)?;
    let mut items = ItemStore::new();
    let mut tokens = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_tokens = match config.tokenizer {
            BuiltinTokenizer::Line => line_tokenizer.tokenize(&text),
            BuiltinTokenizer::Word => word_tokenizer.tokenize(&text),
        };
        items.push_tokens(&file_tokens)?;
        tokens.push(file_tokens);
    }

    let similarities = find_similarities(items, &config.similarities)?;
    if similarities.mergings().is_empty() {
        info!("No repeated content");
    }

    for (stream, path) in args.files.iter().enumerate() {
        println!("[{}] {}", similarities.nick_name(stream), path.display());
    }

    for hunk in similarities.hunks() {
        print_hunk(&similarities, &tokens, &hunk)?;
    }

    Ok(())
}

fn print_hunk(similarities: &Similarities, tokens: &[Vec<Token>], hunk: &Hunk) -> Result<()> {
    let text_of = |stream: usize, items: &std::ops::Range<usize>| -> String {
        let first_item = similarities.items().stream(stream).first_item;
        tokens[stream][items.start - first_item..items.end - first_item]
            .iter()
            .map(|token| token.original.as_str())
            .collect()
    };
    let reference = |item: usize| -> Result<String> {
        match similarities.reference_string(item) {
            Some(reference) => Ok(reference.to_string()),
            None => bail!("Item {item} is outside of every file"),
        }
    };

    for difference in &hunk.differences {
        let marker = if difference.crossed.is_some() { "crossed" } else { "different" };
        println!("--- {} {marker}", reference(difference.items.start)?);
        print!("{}", text_of(difference.stream, &difference.items));
    }

    if let Some(first) = hunk.common.first() {
        let references = hunk
            .common
            .iter()
            .map(|occurrence| reference(occurrence.items.start))
            .collect::<Result<Vec<_>>>()?;
        println!("=== {} common", references.join(", "));
        print!("{}", text_of(first.stream, &first.items));
    }

    Ok(())
}
