//! Chartwise CLI: run the indicator and signal pipeline over a CSV file.
//!
//! Commands:
//! - `analyze`: compute indicators, signals and a recommendation for one series
//! - `default-config`: print the default configuration as TOML

mod load;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chartwise_core::analysis::AnalysisReport;
use chartwise_core::frame::IndicatorCategory;
use chartwise_core::{analyze, AnalysisConfig};

#[derive(Parser)]
#[command(
    name = "chartwise",
    about = "Chartwise CLI: technical indicators, signals and recommendations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an OHLCV CSV file (header: date,open,high,low,close,volume).
    Analyze {
        /// Path to the CSV file.
        csv: PathBuf,

        /// Path to a TOML config file. Defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Symbol label. Defaults to the CSV file stem.
        #[arg(long)]
        symbol: Option<String>,

        /// Number of recent signals to print.
        #[arg(long, default_value_t = 10)]
        recent: usize,

        /// Print the report as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the default configuration as TOML.
    DefaultConfig,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chartwise=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            csv,
            config,
            symbol,
            recent,
            json,
        } => run_analyze(csv, config, symbol, recent, json),
        Commands::DefaultConfig => {
            print!("{}", AnalysisConfig::default().to_toml()?);
            Ok(())
        }
    }
}

fn run_analyze(
    csv: PathBuf,
    config_path: Option<PathBuf>,
    symbol: Option<String>,
    recent: usize,
    json: bool,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let series = load::read_series(&csv, symbol.as_deref())?;
    info!(symbol = series.symbol(), bars = series.len(), "series loaded");

    let analysis = analyze(series, &config);
    info!(
        signals = analysis.signals.len(),
        verdict = %analysis.recommendation.verdict,
        "analysis complete"
    );

    let report = analysis.report(recent);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "n/a".into(),
    }
}

fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let range = match (&report.first_date, &report.last_date) {
        (Some(first), Some(last)) => format!("{first} to {last}"),
        _ => "empty".into(),
    };
    out.push_str(&format!(
        "{}  {} bars  ({range})  last close {}  warm-up {} bars\n",
        report.symbol,
        report.bars,
        fmt_value(report.last_close),
        report.warmup_bars
    ));

    for category in [
        IndicatorCategory::Trend,
        IndicatorCategory::Momentum,
        IndicatorCategory::Volatility,
        IndicatorCategory::Volume,
    ] {
        let values = report.summary.category(category);
        if values.is_empty() {
            continue;
        }
        out.push_str(&format!("\n[{}]\n", category.name()));
        for (name, value) in values {
            out.push_str(&format!("  {:<20} {:>14}\n", name, fmt_value(*value)));
        }
    }

    out.push_str(&format!(
        "\nSignals: {} total, {} most recent\n",
        report.total_signals,
        report.recent_signals.len()
    ));
    out.push_str(&format!(
        "{:<12} {:<5} {:<28} {:<8} {:>10}  {}\n",
        "Date", "Dir", "Kind", "Strength", "Price", "Description"
    ));
    out.push_str(&format!("{}\n", "-".repeat(96)));
    for s in &report.recent_signals {
        out.push_str(&format!(
            "{:<12} {:<5} {:<28} {:<8} {:>10.2}  {}\n",
            s.date.to_string(),
            format!("{:?}", s.direction).to_uppercase(),
            s.kind.label(),
            format!("{:?}", s.strength).to_uppercase(),
            s.price,
            s.description
        ));
    }

    let rec = &report.recommendation;
    out.push_str(&format!(
        "\nRecommendation: {}  (buy {:.1} / sell {:.1}, confidence {:.1}%)\n",
        rec.verdict, rec.buy_score, rec.sell_score, rec.confidence
    ));
    out
}
