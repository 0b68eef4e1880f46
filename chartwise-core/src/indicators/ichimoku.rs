//! Ichimoku Kinko Hyo.
//!
//! Five lines (separate Indicator instances), all aligned to the bar they are
//! computed on; the cloud is not displaced forward:
//! - Tenkan: midpoint of the `conversion`-bar high/low range
//! - Kijun: midpoint of the `base`-bar high/low range
//! - SenkouA: (Tenkan + Kijun) / 2
//! - SenkouB: midpoint of the `span_b`-bar high/low range
//! - Chikou: close lagged by `base` bars

use super::{closes, highs, lows, Indicator};
use crate::domain::Bar;
use crate::rolling::{lag, rolling_max, rolling_min};

/// Which Ichimoku line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IchimokuLine {
    Tenkan,
    Kijun,
    SenkouA,
    SenkouB,
    Chikou,
}

#[derive(Debug, Clone)]
pub struct Ichimoku {
    conversion: usize,
    base: usize,
    span_b: usize,
    line: IchimokuLine,
}

impl Ichimoku {
    pub fn new(conversion: usize, base: usize, span_b: usize, line: IchimokuLine) -> Self {
        assert!(
            conversion >= 1 && base >= 1 && span_b >= 1,
            "Ichimoku periods must be >= 1"
        );
        Self {
            conversion,
            base,
            span_b,
            line,
        }
    }
}

fn range_midpoint(bars: &[Bar], window: usize) -> Vec<f64> {
    let hh = rolling_max(&highs(bars), window);
    let ll = rolling_min(&lows(bars), window);
    hh.iter().zip(&ll).map(|(h, l)| (h + l) / 2.0).collect()
}

impl Indicator for Ichimoku {
    fn name(&self) -> &str {
        match self.line {
            IchimokuLine::Tenkan => "Ichimoku_Tenkan",
            IchimokuLine::Kijun => "Ichimoku_Kijun",
            IchimokuLine::SenkouA => "Ichimoku_SenkouA",
            IchimokuLine::SenkouB => "Ichimoku_SenkouB",
            IchimokuLine::Chikou => "Ichimoku_Chikou",
        }
    }

    fn lookback(&self) -> usize {
        match self.line {
            IchimokuLine::Tenkan => self.conversion - 1,
            IchimokuLine::Kijun => self.base - 1,
            IchimokuLine::SenkouA => self.conversion.max(self.base) - 1,
            IchimokuLine::SenkouB => self.span_b - 1,
            IchimokuLine::Chikou => self.base,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        match self.line {
            IchimokuLine::Tenkan => range_midpoint(bars, self.conversion),
            IchimokuLine::Kijun => range_midpoint(bars, self.base),
            IchimokuLine::SenkouA => {
                let tenkan = range_midpoint(bars, self.conversion);
                let kijun = range_midpoint(bars, self.base);
                tenkan.iter().zip(&kijun).map(|(t, k)| (t + k) / 2.0).collect()
            }
            IchimokuLine::SenkouB => range_midpoint(bars, self.span_b),
            IchimokuLine::Chikou => lag(&closes(bars), self.base),
        }
    }
}
