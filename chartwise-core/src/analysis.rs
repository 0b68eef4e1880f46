//! One-call analysis pipeline: frame, then signals, then recommendation.

use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::domain::{Series, Signal};
use crate::frame::{IndicatorFrame, IndicatorSummary};
use crate::recommendation::{recommend, Recommendation};
use crate::signals::{latest_signals, SignalSynthesizer};

/// Everything derived from one series under one configuration.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub frame: IndicatorFrame,
    /// Detection order: rule by rule, chronological within a rule.
    pub signals: Vec<Signal>,
    pub recommendation: Recommendation,
}

impl Analysis {
    /// The `n` most recent signals, newest first.
    pub fn recent_signals(&self, n: usize) -> Vec<Signal> {
        latest_signals(&self.signals, n)
    }

    /// Serializable digest for reports.
    pub fn report(&self, recent: usize) -> AnalysisReport {
        let bars = self.frame.bars();
        AnalysisReport {
            symbol: self.frame.symbol().to_string(),
            bars: bars.len(),
            first_date: bars.first().map(|b| b.date.to_string()),
            last_date: bars.last().map(|b| b.date.to_string()),
            last_close: self.frame.close(self.frame.len().saturating_sub(1)),
            warmup_bars: self.frame.warmup(),
            summary: self.frame.summary(),
            total_signals: self.signals.len(),
            recent_signals: self.recent_signals(recent),
            recommendation: self.recommendation.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub bars: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub last_close: Option<f64>,
    /// Bars before every indicator column is defined.
    pub warmup_bars: usize,
    pub summary: IndicatorSummary,
    pub total_signals: usize,
    pub recent_signals: Vec<Signal>,
    pub recommendation: Recommendation,
}

/// Compute every indicator, scan for signals, and score the recent ones.
///
/// The config is assumed valid; `AnalysisConfig::from_toml` and
/// `from_file` validate on load.
pub fn analyze(series: Series, config: &AnalysisConfig) -> Analysis {
    let symbol = series.symbol().to_string();
    debug!(symbol = %symbol, bars = series.len(), "analysis started");

    let frame = IndicatorFrame::compute(series, &config.effective_indicators());

    let synthesizer = SignalSynthesizer::from_params(&config.signals);
    let signals = synthesizer.scan(&frame);
    debug!(symbol = %symbol, signals = signals.len(), "signals scanned");

    let recommendation = recommend(&signals, &config.recommendation);
    debug!(
        symbol = %symbol,
        verdict = %recommendation.verdict,
        buy_score = recommendation.buy_score,
        sell_score = recommendation.sell_score,
        confidence = recommendation.confidence,
        "recommendation scored"
    );

    Analysis {
        frame,
        signals,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignalDirection;
    use crate::indicators::make_bars;
    use crate::recommendation::Verdict;

    fn series(closes: &[f64]) -> Series {
        Series::new("demo", make_bars(closes)).unwrap()
    }

    #[test]
    fn empty_series_holds() {
        let analysis = analyze(series(&[]), &AnalysisConfig::default());
        assert!(analysis.signals.is_empty());
        assert_eq!(analysis.recommendation.verdict, Verdict::Hold);
        assert_eq!(analysis.recommendation.confidence, 0.0);
    }

    #[test]
    fn short_series_has_full_length_undefined_columns() {
        let analysis = analyze(series(&[10.0, 11.0, 12.0]), &AnalysisConfig::default());
        assert_eq!(analysis.frame.column("SMA_200").unwrap().len(), 3);
        assert_eq!(analysis.frame.latest("SMA_200"), None);
        assert!(analysis.signals.is_empty());
    }

    #[test]
    fn rising_series_emits_no_sells() {
        let closes: Vec<f64> = (100..=300).map(f64::from).collect();
        let analysis = analyze(series(&closes), &AnalysisConfig::default());
        assert!(analysis
            .signals
            .iter()
            .all(|s| s.direction == SignalDirection::Buy));
    }

    #[test]
    fn custom_golden_cross_periods_get_columns() {
        let mut config = AnalysisConfig::default();
        config.signals.ma_fast = 5;
        config.signals.ma_slow = 15;
        let analysis = analyze(series(&[1.0; 30]), &config);
        assert!(analysis.frame.has_column("SMA_5"));
        assert!(analysis.frame.has_column("SMA_15"));
    }

    #[test]
    fn report_carries_summary_and_recent() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + (i as f64 * 0.3).sin() * 10.0).collect();
        let analysis = analyze(series(&closes), &AnalysisConfig::default());
        let report = analysis.report(3);
        assert_eq!(report.symbol, "DEMO");
        assert_eq!(report.bars, 120);
        assert!(report.recent_signals.len() <= 3);
        assert_eq!(report.total_signals, analysis.signals.len());
        assert!(report.summary.momentum.contains_key("RSI"));
        assert_eq!(report.warmup_bars, analysis.frame.warmup());
    }

    #[test]
    fn report_warmup_covers_slowest_column() {
        let analysis = analyze(series(&[10.0, 11.0, 12.0]), &AnalysisConfig::default());
        let report = analysis.report(5);
        assert_eq!(analysis.frame.lookback("SMA_200"), Some(199));
        assert!(report.warmup_bars >= 199);
        assert!(report.warmup_bars >= report.bars);
    }
}
