//! Recommendation aggregator: scores the most recent signals into a verdict.
//!
//! Each signal contributes its strength multiplier (STRONG 2, MEDIUM 1,
//! WEAK 0.5) to the score of its direction. The verdict compares the two
//! scores; confidence is the normalised score gap.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RecommendationParams;
use crate::domain::{Signal, SignalDirection};
use crate::signals::latest_signals;

/// How the "most recent N" signals are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalOrdering {
    /// Newest by date first; same-date signals keep detection order.
    #[default]
    Chronological,
    /// The last N in append (rule-by-rule) order.
    Detection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::StrongBuy => "STRONG BUY",
            Verdict::Buy => "BUY",
            Verdict::Hold => "HOLD",
            Verdict::Sell => "SELL",
            Verdict::StrongSell => "STRONG SELL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub verdict: Verdict,
    pub buy_score: f64,
    pub sell_score: f64,
    /// Score gap as a percentage of total score, in [0, 100].
    pub confidence: f64,
    pub contributing_signals: Vec<Signal>,
}

impl Recommendation {
    /// HOLD with zero confidence and no contributing signals.
    pub fn hold() -> Self {
        Self {
            verdict: Verdict::Hold,
            buy_score: 0.0,
            sell_score: 0.0,
            confidence: 0.0,
            contributing_signals: Vec::new(),
        }
    }
}

/// Score the most recent `params.lookback` signals.
pub fn recommend(signals: &[Signal], params: &RecommendationParams) -> Recommendation {
    if signals.is_empty() {
        return Recommendation::hold();
    }

    let recent = match params.ordering {
        SignalOrdering::Chronological => latest_signals(signals, params.lookback),
        SignalOrdering::Detection => {
            let start = signals.len().saturating_sub(params.lookback);
            signals[start..].to_vec()
        }
    };

    let mut buy_score = 0.0;
    let mut sell_score = 0.0;
    for signal in &recent {
        match signal.direction {
            SignalDirection::Buy => buy_score += signal.strength.multiplier(),
            SignalDirection::Sell => sell_score += signal.strength.multiplier(),
        }
    }

    let ratio = params.strong_ratio;
    let verdict = if buy_score > ratio * sell_score {
        Verdict::StrongBuy
    } else if buy_score > sell_score {
        Verdict::Buy
    } else if sell_score > ratio * buy_score {
        Verdict::StrongSell
    } else if sell_score > buy_score {
        Verdict::Sell
    } else {
        Verdict::Hold
    };

    let total = buy_score + sell_score;
    let confidence = (buy_score - sell_score).abs() / total.max(1.0) * 100.0;

    Recommendation {
        verdict,
        buy_score,
        sell_score,
        confidence,
        contributing_signals: recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SignalKind, SignalStrength};
    use crate::indicators::assert_approx;
    use chrono::NaiveDate;

    fn signal(day: u32, direction: SignalDirection, strength: SignalStrength) -> Signal {
        let kind = match direction {
            SignalDirection::Buy => SignalKind::GoldenCross,
            SignalDirection::Sell => SignalKind::DeathCross,
        };
        Signal {
            bar_index: day as usize,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            direction,
            kind,
            description: String::new(),
            strength,
            price: 100.0,
        }
    }

    fn params(lookback: usize, ordering: SignalOrdering) -> RecommendationParams {
        RecommendationParams {
            lookback,
            ordering,
            ..RecommendationParams::default()
        }
    }

    #[test]
    fn empty_is_hold_with_zero_confidence() {
        let rec = recommend(&[], &RecommendationParams::default());
        assert_eq!(rec.verdict, Verdict::Hold);
        assert_eq!(rec.confidence, 0.0);
        assert!(rec.contributing_signals.is_empty());
    }

    #[test]
    fn verdict_thresholds() {
        use SignalDirection::{Buy, Sell};
        use SignalStrength::{Medium, Strong, Weak};
        let p = RecommendationParams::default();

        // 2 vs 0
        let rec = recommend(&[signal(1, Buy, Strong)], &p);
        assert_eq!(rec.verdict, Verdict::StrongBuy);
        assert_approx(rec.confidence, 100.0, 1e-12);

        // 2 vs 1.5: buy > sell but not > 1.5x
        let rec = recommend(
            &[signal(1, Buy, Strong), signal(2, Sell, Medium), signal(3, Sell, Weak)],
            &p,
        );
        assert_eq!(rec.verdict, Verdict::Buy);
        assert_approx(rec.buy_score, 2.0, 1e-12);
        assert_approx(rec.sell_score, 1.5, 1e-12);
        assert_approx(rec.confidence, 0.5 / 3.5 * 100.0, 1e-9);

        // 1 vs 2
        let rec = recommend(&[signal(1, Buy, Medium), signal(2, Sell, Strong)], &p);
        assert_eq!(rec.verdict, Verdict::StrongSell);

        // 1.5 vs 2
        let rec = recommend(
            &[signal(1, Buy, Medium), signal(2, Buy, Weak), signal(3, Sell, Strong)],
            &p,
        );
        assert_eq!(rec.verdict, Verdict::Sell);

        // 1 vs 1
        let rec = recommend(&[signal(1, Buy, Medium), signal(2, Sell, Medium)], &p);
        assert_eq!(rec.verdict, Verdict::Hold);
        assert_eq!(rec.confidence, 0.0);
    }

    #[test]
    fn small_totals_are_not_inflated() {
        // total 0.5 < 1, so the denominator is 1
        let rec = recommend(
            &[signal(1, SignalDirection::Buy, SignalStrength::Weak)],
            &RecommendationParams::default(),
        );
        assert_approx(rec.confidence, 50.0, 1e-12);
    }

    #[test]
    fn ordering_changes_which_signals_count() {
        use SignalDirection::{Buy, Sell};
        use SignalStrength::Strong;
        // Detection order: a late-dated BUY from the first rule, then two
        // early-dated SELLs from a later rule.
        let signals = vec![
            signal(20, Buy, Strong),
            signal(2, Sell, Strong),
            signal(3, Sell, Strong),
        ];

        let chrono = recommend(&signals, &params(1, SignalOrdering::Chronological));
        assert_eq!(chrono.verdict, Verdict::StrongBuy);
        assert_eq!(chrono.contributing_signals[0].bar_index, 20);

        let detection = recommend(&signals, &params(1, SignalOrdering::Detection));
        assert_eq!(detection.verdict, Verdict::StrongSell);
        assert_eq!(detection.contributing_signals[0].bar_index, 3);
    }

    #[test]
    fn lookback_limits_contributors() {
        let signals: Vec<Signal> = (1..=15)
            .map(|d| signal(d, SignalDirection::Buy, SignalStrength::Medium))
            .collect();
        let rec = recommend(&signals, &RecommendationParams::default());
        assert_eq!(rec.contributing_signals.len(), 10);
        assert_approx(rec.buy_score, 10.0, 1e-12);
        assert_eq!(rec.contributing_signals[0].bar_index, 15);
    }

    #[test]
    fn verdict_serializes_with_spaces() {
        let json = serde_json::to_string(&Verdict::StrongSell).unwrap();
        assert_eq!(json, "\"STRONG SELL\"");
        assert_eq!(Verdict::StrongBuy.to_string(), "STRONG BUY");
    }
}
