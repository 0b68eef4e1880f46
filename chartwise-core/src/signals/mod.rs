//! Signal synthesis: scans an indicator frame for crossover and threshold
//! events and emits typed, dated signals.
//!
//! Rules are stateless and portfolio-agnostic: each one looks at a single
//! adjacent pair `(t-1, t)` of frame values and nothing else. An undefined
//! value at either end of the pair means no signal for that pair.

pub mod bollinger_bounce;
pub mod ma_cross;
pub mod macd_cross;
pub mod rsi_reversion;
pub mod stochastic_cross;
pub mod trend_strength;

pub use bollinger_bounce::BollingerBounce;
pub use ma_cross::MaCross;
pub use macd_cross::MacdCross;
pub use rsi_reversion::RsiReversion;
pub use stochastic_cross::StochasticCross;
pub use trend_strength::TrendStrength;

use crate::config::SignalParams;
use crate::domain::{Signal, SignalDirection, SignalKind, SignalStrength};
use crate::frame::IndicatorFrame;
use tracing::debug;

/// A crossover or threshold rule evaluated on one adjacent pair of bars.
///
/// # Invariants
/// - `evaluate()` only reads frame values at `index - 1` and `index`
/// - `evaluate()` returns `None` when any value it compares is undefined
pub trait SignalRule: Send + Sync {
    /// Rule name for logging.
    fn name(&self) -> &str;

    /// Frame columns this rule reads. A frame missing any of them skips the rule.
    fn required_columns(&self) -> Vec<String>;

    /// Evaluate the transition from bar `index - 1` to bar `index`.
    fn evaluate(&self, frame: &IndicatorFrame, index: usize) -> Option<Signal>;
}

/// Runs every rule over every adjacent pair of a frame.
pub struct SignalSynthesizer {
    rules: Vec<Box<dyn SignalRule>>,
}

impl SignalSynthesizer {
    pub fn new(rules: Vec<Box<dyn SignalRule>>) -> Self {
        Self { rules }
    }

    /// The standard rule set, in output order.
    pub fn from_params(params: &SignalParams) -> Self {
        Self::new(vec![
            Box::new(MaCross::new(params.ma_fast, params.ma_slow)),
            Box::new(RsiReversion::new(params.rsi_oversold, params.rsi_overbought)),
            Box::new(MacdCross),
            Box::new(BollingerBounce),
            Box::new(StochasticCross::new(
                params.stochastic_oversold,
                params.stochastic_overbought,
            )),
            Box::new(TrendStrength::new(params.adx_threshold)),
        ])
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn SignalRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Signals grouped rule by rule, chronological within each rule.
    pub fn scan(&self, frame: &IndicatorFrame) -> Vec<Signal> {
        let mut signals = Vec::new();
        for rule in &self.rules {
            let missing = missing_columns(rule.as_ref(), frame);
            if !missing.is_empty() {
                debug!(rule = rule.name(), missing = ?missing, "rule skipped: missing columns");
                continue;
            }
            let before = signals.len();
            signals.extend((1..frame.len()).filter_map(|index| rule.evaluate(frame, index)));
            debug!(rule = rule.name(), signals = signals.len() - before, "rule scanned");
        }
        signals
    }
}

/// Columns `rule` reads that `frame` does not have.
fn missing_columns(rule: &dyn SignalRule, frame: &IndicatorFrame) -> Vec<String> {
    rule.required_columns()
        .into_iter()
        .filter(|column| !frame.has_column(column))
        .collect()
}

impl Default for SignalSynthesizer {
    fn default() -> Self {
        Self::from_params(&SignalParams::default())
    }
}

/// The `n` most recent signals, newest first.
///
/// Sorting is stable, so signals sharing a date keep their detection order.
pub fn latest_signals(signals: &[Signal], n: usize) -> Vec<Signal> {
    let mut sorted = signals.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

/// Values of `column` at `index - 1` and `index`, if both are defined.
pub(crate) fn pair(frame: &IndicatorFrame, column: &str, index: usize) -> Option<(f64, f64)> {
    let prev = frame.value(column, index.checked_sub(1)?)?;
    let curr = frame.value(column, index)?;
    Some((prev, curr))
}

/// Close prices at `index - 1` and `index`, if both are defined.
pub(crate) fn close_pair(frame: &IndicatorFrame, index: usize) -> Option<(f64, f64)> {
    let prev = frame.close(index.checked_sub(1)?)?;
    let curr = frame.close(index)?;
    Some((prev, curr))
}

/// A signal at bar `index`, priced at that bar's close.
pub(crate) fn signal_at(
    frame: &IndicatorFrame,
    index: usize,
    direction: SignalDirection,
    kind: SignalKind,
    strength: SignalStrength,
    description: impl Into<String>,
) -> Option<Signal> {
    let bar = frame.bar(index)?;
    if bar.close.is_nan() {
        return None;
    }
    Some(Signal {
        bar_index: index,
        date: bar.date,
        direction,
        kind,
        description: description.into(),
        strength,
        price: bar.close,
    })
}

/// Build a frame from closes plus hand-written columns.
#[cfg(test)]
pub(crate) fn test_frame(closes: &[f64], columns: &[(&str, Vec<f64>)]) -> IndicatorFrame {
    let series = crate::domain::Series::new("TEST", crate::indicators::make_bars(closes)).unwrap();
    let mut frame = IndicatorFrame::new(series);
    for (name, values) in columns {
        frame.insert(*name, values.clone()).unwrap();
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const NAN: f64 = f64::NAN;

    fn signal(day: u32, kind: SignalKind) -> Signal {
        Signal {
            bar_index: day as usize,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            direction: SignalDirection::Buy,
            kind,
            description: String::new(),
            strength: SignalStrength::Medium,
            price: 100.0,
        }
    }

    #[test]
    fn scan_orders_rule_by_rule() {
        // RSI recovers at bar 1, golden cross at bar 3.
        let frame = test_frame(
            &[100.0, 101.0, 102.0, 103.0],
            &[
                ("SMA_20", vec![NAN, 9.0, 9.0, 11.0]),
                ("SMA_50", vec![NAN, 10.0, 10.0, 10.0]),
                ("RSI", vec![25.0, 35.0, 40.0, 45.0]),
            ],
        );
        let signals = SignalSynthesizer::default().scan(&frame);
        let kinds: Vec<SignalKind> = signals.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SignalKind::GoldenCross, SignalKind::RsiOversoldRecovery]
        );
        assert_eq!(signals[0].bar_index, 3);
        assert_eq!(signals[1].bar_index, 1);
    }

    #[test]
    fn rules_with_missing_columns_are_skipped() {
        let frame = test_frame(&[100.0, 101.0], &[]);
        assert!(SignalSynthesizer::default().scan(&frame).is_empty());
    }

    #[test]
    fn missing_columns_lists_only_absent_ones() {
        let frame = test_frame(&[100.0, 101.0], &[("SMA_20", vec![1.0, 2.0])]);
        let rule = MaCross::new(20, 50);
        assert_eq!(missing_columns(&rule, &frame), vec!["SMA_50".to_string()]);
        assert_eq!(
            missing_columns(&RsiReversion::new(30.0, 70.0), &frame),
            vec!["RSI".to_string()]
        );
    }

    #[test]
    fn standard_rules_keep_output_order() {
        let synth = SignalSynthesizer::default();
        let names: Vec<&str> = synth.rules().map(|rule| rule.name()).collect();
        assert_eq!(
            names,
            vec![
                "ma_cross",
                "rsi_reversion",
                "macd_cross",
                "bollinger_bounce",
                "stochastic_cross",
                "trend_strength",
            ]
        );
    }

    #[test]
    fn empty_and_single_bar_frames_emit_nothing() {
        let synth = SignalSynthesizer::default();
        assert!(synth.scan(&test_frame(&[], &[])).is_empty());
        assert!(synth
            .scan(&test_frame(&[100.0], &[("RSI", vec![25.0])]))
            .is_empty());
    }

    #[test]
    fn latest_signals_newest_first_and_stable() {
        let signals = vec![
            signal(1, SignalKind::GoldenCross),
            signal(3, SignalKind::MacdBullishCrossover),
            signal(2, SignalKind::RsiOversoldRecovery),
            signal(3, SignalKind::BbLowerBandBounce),
        ];
        let latest = latest_signals(&signals, 3);
        let kinds: Vec<SignalKind> = latest.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SignalKind::MacdBullishCrossover,
                SignalKind::BbLowerBandBounce,
                SignalKind::RsiOversoldRecovery,
            ]
        );
        assert_eq!(latest_signals(&signals, 10).len(), 4);
        assert!(latest_signals(&[], 5).is_empty());
    }

    #[test]
    fn pair_requires_both_endpoints() {
        let frame = test_frame(&[1.0, 2.0, 3.0], &[("X", vec![NAN, 1.0, 2.0])]);
        assert_eq!(pair(&frame, "X", 0), None);
        assert_eq!(pair(&frame, "X", 1), None);
        assert_eq!(pair(&frame, "X", 2), Some((1.0, 2.0)));
    }
}
