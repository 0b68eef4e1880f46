//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2/(span+1).
//! Seed: EMA[0] = close[0]. Published from index span-1, like SMA.
//! Lookback: span - 1.

use super::{closes, Indicator};
use crate::domain::Bar;
use crate::rolling::ema;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("EMA_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.span.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        ema(&closes(bars), self.span)
    }
}
