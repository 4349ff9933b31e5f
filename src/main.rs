//! CLI for customer review sentiment analysis
//!
//! Usage:
//! ```bash
//! cargo run -- --help
//! cargo run -- analyze --input reviews.csv --output ./output
//! cargo run -- classify --text "Great product, fast delivery"
//! cargo run -- keywords --text "the product is good and the service is good"
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use review_sentiment::{
    load_config, report, AppConfig, BatchAnalyzer, KeywordExtractor, ReviewLoader,
    SentimentClassifier,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "review_sentiment")]
#[command(version)]
#[command(about = "Sentiment, themes and trends for customer reviews", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error); defaults to the config value
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Configuration file (toml, json or yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV file of reviews
    Analyze {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (overrides the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Score reviews on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Classify a single text
    Classify {
        /// Text to classify
        #[arg(short, long)]
        text: String,
    },

    /// Extract keywords from a single text
    Keywords {
        /// Text to analyze
        #[arg(short, long)]
        text: String,

        /// Number of keywords
        #[arg(short = 'k', long, default_value = "5")]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    let level_name = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let log_level = match level_name {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Analyze {
            input,
            output,
            sequential,
        } => run_analyze(config, &input, output, sequential),
        Commands::Classify { text } => run_classify(&text),
        Commands::Keywords { text, top } => {
            run_keywords(&text, top);
            Ok(())
        }
    }
}

fn run_analyze(
    mut config: AppConfig,
    input: &Path,
    output: Option<PathBuf>,
    sequential: bool,
) -> Result<()> {
    if let Some(dir) = output {
        config.output.dir = dir;
    }
    if sequential {
        config.analysis.parallel = false;
    }

    let dataset = ReviewLoader::new(config.input.clone())
        .load_path(input)
        .with_context(|| format!("Failed to load reviews from {}", input.display()))?;

    let analyzer = BatchAnalyzer::from_settings(&config.analysis);
    let batch = analyzer.analyze_dataset(&dataset);

    info!(
        excluded = batch.excluded_count(),
        failed = batch.failed_count(),
        "Batch analyzed"
    );

    let counts: Vec<String> = batch
        .distribution
        .most_common()
        .iter()
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect();
    println!("Sentiment Distribution: {{{}}}", counts.join(", "));

    let shown = batch.themes.len().min(config.analysis.console_themes);
    let themes: Vec<String> = batch.themes[..shown]
        .iter()
        .map(|t| format!("({}, {})", t.term, t.count))
        .collect();
    println!("Top Key Themes: [{}]", themes.join(", "));

    report::write_all(&config.output, &dataset, &batch)
        .with_context(|| format!("Failed to write results to {}", config.output.dir.display()))?;

    println!("Processed data saved to: {}", config.output.processed_path().display());
    println!("Summary saved to: {}", config.output.summary_path().display());
    println!("Chart data saved to: {}", config.output.dir.display());

    Ok(())
}

fn run_classify(text: &str) -> Result<()> {
    let classifier = SentimentClassifier::new();
    let result = classifier.classify_text(text)?;

    println!("Text: \"{}\"", text);
    println!("  Sentiment: {}", result.label);
    println!("  Polarity:  {:.4}", result.polarity);
    Ok(())
}

fn run_keywords(text: &str, top: usize) {
    let extractor = KeywordExtractor::new().with_top_k(top);
    let keywords = extractor.extract_with_counts(text);

    println!("Text: \"{}\"", text);
    for (term, count) in keywords {
        println!("  {}: {}", term, count);
    }
}
