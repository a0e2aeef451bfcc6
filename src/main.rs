//! wordfreq - per-year word frequencies for a journal's article titles.
//!
//! Reads an issue listing (or a JSON year map), counts canonical words per
//! year, and writes the word-cloud `DATA` constant.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rapid_wordfreq::export;
use rapid_wordfreq::pipeline::observer::StageTimingObserver;
use rapid_wordfreq::pipeline::validation::ValidationEngine;
use rapid_wordfreq::{
    Annotator, Corpus, FailurePolicy, JsonAnnotator, RuleAnnotator, Vocabulary, VocabularySpec,
    WordFreq, WordFreqByYear, WordFreqConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `const DATA = {...};`
    Js,
    /// Bare JSON object
    Json,
}

#[derive(Parser)]
#[command(name = "wordfreq")]
#[command(about = "Per-year word frequencies for article titles")]
#[command(version)]
struct Cli {
    /// Issue listing, or a `.json` map of year to titles
    #[arg(short, long)]
    input: PathBuf,

    /// Pre-computed token annotations (title to token list); the rule-based
    /// annotator is used when omitted
    #[arg(short, long)]
    annotations: Option<PathBuf>,

    /// Person names for the rule-based annotator, one per line. Without it
    /// (or --annotations) no token is labeled PERSON
    #[arg(long, conflicts_with = "annotations")]
    person_names: Option<PathBuf>,

    /// Vocabulary spec (JSON)
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Run config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file; printed to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Js)]
    format: Format,

    /// Skip titles the annotator rejects instead of aborting
    #[arg(long)]
    skip_failed: bool,

    /// Annotate and count on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Log per-stage merge timings (runs sequentially)
    #[arg(long)]
    stage_timings: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "rapid_wordfreq=debug,wordfreq=debug"
    } else {
        "rapid_wordfreq=info,wordfreq=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let corpus = Corpus::from_path(&cli.input)
        .with_context(|| format!("failed to read corpus {}", cli.input.display()))?;
    info!(
        years = corpus.len(),
        titles = corpus.title_count(),
        "corpus loaded"
    );

    let vocab = load_vocabulary(cli.vocab.as_ref())?;
    let config = load_config(&cli)?;

    let annotator: Box<dyn Annotator> = match &cli.annotations {
        Some(path) => {
            let annotator = JsonAnnotator::from_path(path)
                .with_context(|| format!("failed to read annotations {}", path.display()))?;
            info!(titles = annotator.len(), "annotations loaded");
            Box::new(annotator)
        }
        None => Box::new(rule_annotator(cli.person_names.as_ref())?),
    };

    let wf = WordFreq::with_vocabulary(annotator, vocab).with_config(config);
    let data = if cli.stage_timings {
        count_with_timings(&wf, &corpus)?
    } else {
        wf.process_corpus(&corpus)?
    };

    let rendered = match cli.format {
        Format::Js => export::to_javascript(&data)?,
        Format::Json => export::to_json(&data)?,
    };
    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "word cloud data written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn rule_annotator(person_names: Option<&PathBuf>) -> anyhow::Result<RuleAnnotator> {
    let Some(path) = person_names else {
        return Ok(RuleAnnotator::new());
    };
    let listing = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read person names {}", path.display()))?;
    let annotator = RuleAnnotator::new().with_person_list(&listing);
    info!(names = annotator.person_name_count(), "person names loaded");
    Ok(annotator)
}

fn load_vocabulary(path: Option<&PathBuf>) -> anyhow::Result<Vocabulary> {
    let Some(path) = path else {
        return Ok(Vocabulary::default());
    };
    let spec = VocabularySpec::from_path(path)
        .with_context(|| format!("failed to read vocabulary {}", path.display()))?;
    let vocab = spec
        .build(&ValidationEngine::with_defaults())
        .with_context(|| format!("invalid vocabulary {}", path.display()))?;
    Ok(vocab)
}

fn load_config(cli: &Cli) -> anyhow::Result<WordFreqConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => WordFreqConfig::default(),
    };
    if cli.skip_failed {
        config.failure_policy = FailurePolicy::SkipDocument;
    }
    if cli.parallel {
        config.parallel = true;
    }
    debug!(?config, "run config");
    Ok(config)
}

fn count_with_timings(
    wf: &WordFreq<Box<dyn Annotator>>,
    corpus: &Corpus,
) -> anyhow::Result<WordFreqByYear> {
    let mut observer = StageTimingObserver::new();
    let mut data = WordFreqByYear::default();
    for (year, titles) in corpus.iter() {
        let counts = wf.process_year_observed(titles, &mut observer)?;
        info!(year, titles = titles.len(), words = counts.len(), "year counted");
        data.insert(year.to_string(), counts);
    }

    let merged = observer.merged_by_stage();
    for (stage, total) in observer.total_by_stage() {
        let tokens = merged
            .iter()
            .find(|(name, _)| *name == stage)
            .map_or(0, |(_, n)| *n);
        info!(stage, elapsed_ms = total.as_secs_f64() * 1000.0, merged = tokens, "stage total");
    }
    Ok(data)
}
