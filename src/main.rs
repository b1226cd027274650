use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use football_similarity::data_loader::load_records;
use football_similarity::report::*;
use football_similarity::{Analysis, AnalysisContext};

// Builds the similarity graph for one season file, prints the component report, then answers
// any --player queries against the same graph.
#[derive(Parser)]
#[command(name = "football_similarity")]
#[command(
    about = "Similarity graph and component analysis over a season of player stats",
    long_about = None
)]
struct Cli {
    /// Season stats file (delimited text, or .json)
    data: PathBuf,

    /// JSON file with analysis settings. Flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    goal_threshold: Option<f64>,

    #[arg(long)]
    assist_threshold: Option<f64>,

    /// Neighbours listed per --player query
    #[arg(long)]
    top_n: Option<usize>,

    /// Components summarised in detail
    #[arg(long)]
    limit_display: Option<usize>,

    /// Top scorers listed per component
    #[arg(long)]
    top_k: Option<usize>,

    #[arg(long)]
    delimiter: Option<char>,

    /// Fail on repeated player names instead of keeping the last one
    #[arg(long)]
    reject_duplicates: bool,

    /// Player to find look-alikes for. Repeatable
    #[arg(short, long = "player")]
    players: Vec<String>,

    /// Write nodes and edges as JSON for a network renderer
    #[arg(long)]
    export: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn context(&self) -> Result<AnalysisContext> {
        let mut context = match &self.config {
            Some(path) => AnalysisContext::from_json_file(path)?,
            None => AnalysisContext::default(),
        };

        if let Some(v) = self.goal_threshold {
            context.goal_threshold = v;
        }
        if let Some(v) = self.assist_threshold {
            context.assist_threshold = v;
        }
        if let Some(v) = self.top_n {
            context.top_n = v;
        }
        if let Some(v) = self.limit_display {
            context.limit_display = v;
        }
        if let Some(v) = self.top_k {
            context.top_k_per_component = v;
        }
        if let Some(v) = self.delimiter {
            context.delimiter = v;
        }
        if self.reject_duplicates {
            context.reject_duplicates = true;
        }

        context.validate()?;
        Ok(context)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let context = cli.context()?;

    let loaded = load_records(&cli.data, &context)
        .with_context(|| format!("loading {}", cli.data.display()))?;

    let analysis = Analysis::new(&loaded.records, &context)?;

    output_graph_stats(analysis.graph());
    output_components(&analysis.summary());

    // A missing player is reported and we carry on with the rest
    for player in &cli.players {
        output_similar(player, &analysis.most_similar(player));
    }

    if let Some(path) = &cli.export {
        analysis
            .export()
            .write_json(path)
            .with_context(|| format!("writing graph export to {}", path.display()))?;
        info!(path = %path.display(), "graph export written");
    }

    Ok(())
}
