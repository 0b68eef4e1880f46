//! Indicator frame: a series plus named indicator columns aligned
//! index-for-index with its bars.
//!
//! Columns are stored as `f64` with `NAN` marking undefined positions.
//! Every public accessor maps that marker to `None`, so callers never see a
//! NaN and never mistake a warm-up slot for zero.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::IndicatorParams;
use crate::domain::{Bar, Series};
use crate::indicators::{build_indicators, Indicator};

/// Errors raised when editing a frame by hand.
#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("column '{name}' has {actual} values but the series has {expected} bars")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Category an indicator column is reported under in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorCategory {
    Trend,
    Momentum,
    Volatility,
    Volume,
}

impl IndicatorCategory {
    /// Category of a frame column, or `None` for an unknown name.
    pub fn of(column: &str) -> Option<Self> {
        if column.starts_with("SMA_")
            || column.starts_with("EMA_")
            || column.starts_with("ADX")
            || column.starts_with("Ichimoku_")
            || column.starts_with("Supertrend")
        {
            return Some(Self::Trend);
        }
        if column.starts_with("BB_") || column.starts_with("KC_") || column.starts_with("DC_") {
            return Some(Self::Volatility);
        }
        match column {
            "MACD" | "MACD_Signal" | "MACD_Diff" | "RSI" | "Stoch_K" | "Stoch_D"
            | "Williams_R" | "ROC" | "Momentum" | "CCI" => Some(Self::Momentum),
            "ATR" | "HV" => Some(Self::Volatility),
            "OBV" | "AD" | "MFI" => Some(Self::Volume),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::Momentum => "momentum",
            Self::Volatility => "volatility",
            Self::Volume => "volume",
        }
    }
}

/// Latest value of every column, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub trend: BTreeMap<String, Option<f64>>,
    pub momentum: BTreeMap<String, Option<f64>>,
    pub volatility: BTreeMap<String, Option<f64>>,
    pub volume: BTreeMap<String, Option<f64>>,
}

impl IndicatorSummary {
    pub fn category(&self, category: IndicatorCategory) -> &BTreeMap<String, Option<f64>> {
        match category {
            IndicatorCategory::Trend => &self.trend,
            IndicatorCategory::Momentum => &self.momentum,
            IndicatorCategory::Volatility => &self.volatility,
            IndicatorCategory::Volume => &self.volume,
        }
    }

    fn category_mut(
        &mut self,
        category: IndicatorCategory,
    ) -> &mut BTreeMap<String, Option<f64>> {
        match category {
            IndicatorCategory::Trend => &mut self.trend,
            IndicatorCategory::Momentum => &mut self.momentum,
            IndicatorCategory::Volatility => &mut self.volatility,
            IndicatorCategory::Volume => &mut self.volume,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    series: Series,
    names: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
    /// First defined index of each computed column. Hand-inserted columns
    /// have no entry.
    lookbacks: HashMap<String, usize>,
}

impl IndicatorFrame {
    /// A frame with no indicator columns.
    pub fn new(series: Series) -> Self {
        Self {
            series,
            names: Vec::new(),
            columns: HashMap::new(),
            lookbacks: HashMap::new(),
        }
    }

    /// Compute every indicator configured in `params`.
    pub fn compute(series: Series, params: &IndicatorParams) -> Self {
        let indicators = build_indicators(params);
        Self::from_indicators(series, &indicators)
    }

    /// Compute the given indicators in parallel and collect them as columns.
    ///
    /// Each indicator reads the shared bar slice and produces its own column;
    /// columns are merged in the order given once all are complete.
    pub fn from_indicators(series: Series, indicators: &[Box<dyn Indicator>]) -> Self {
        let bars = series.bars();
        let computed: Vec<(String, usize, Vec<f64>)> = indicators
            .par_iter()
            .map(|indicator| {
                (
                    indicator.name().to_string(),
                    indicator.lookback(),
                    indicator.compute(bars),
                )
            })
            .collect();

        let mut frame = Self::new(series);
        for (name, lookback, values) in computed {
            debug_assert_eq!(
                values.len(),
                frame.len(),
                "indicator '{name}' produced {} values for {} bars",
                values.len(),
                frame.len()
            );
            frame.put(name.clone(), values);
            frame.lookbacks.insert(name, lookback);
        }

        let warming_up = frame
            .lookbacks
            .values()
            .filter(|&&lookback| lookback >= frame.len())
            .count();
        debug!(
            symbol = frame.symbol(),
            bars = frame.len(),
            columns = frame.names.len(),
            warmup = frame.warmup(),
            undefined_columns = warming_up,
            "indicator frame computed"
        );
        frame
    }

    /// Insert or replace a column. Its length must match the series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), FrameError> {
        let name = name.into();
        if values.len() != self.len() {
            return Err(FrameError::LengthMismatch {
                name,
                expected: self.len(),
                actual: values.len(),
            });
        }
        self.lookbacks.remove(&name);
        self.put(name, values);
        Ok(())
    }

    fn put(&mut self, name: String, values: Vec<f64>) {
        if !self.columns.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.columns.insert(name, values);
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn symbol(&self) -> &str {
        self.series.symbol()
    }

    pub fn bars(&self) -> &[Bar] {
        self.series.bars()
    }

    pub fn bar(&self, index: usize) -> Option<&Bar> {
        self.series.bars().get(index)
    }

    pub fn date(&self, index: usize) -> Option<NaiveDate> {
        self.bar(index).map(|b| b.date)
    }

    /// Close price at `index`, `None` when out of range or undefined.
    pub fn close(&self, index: usize) -> Option<f64> {
        self.bar(index).map(|b| b.close).filter(|c| !c.is_nan())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Index of the first defined value of a computed column.
    pub fn lookback(&self, name: &str) -> Option<usize> {
        self.lookbacks.get(name).copied()
    }

    /// Bars needed before every computed column is defined: the largest
    /// lookback, or 0 for a frame without computed columns.
    pub fn warmup(&self) -> usize {
        self.lookbacks.values().copied().max().unwrap_or(0)
    }

    /// Raw column storage, NaN marking undefined positions.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Value of column `name` at bar `index`; `None` when the column is
    /// missing, the index is out of range, or the value is undefined.
    pub fn value(&self, name: &str, index: usize) -> Option<f64> {
        self.columns
            .get(name)
            .and_then(|values| values.get(index).copied())
            .filter(|v| !v.is_nan())
    }

    /// Value of column `name` at the last bar.
    pub fn latest(&self, name: &str) -> Option<f64> {
        let last = self.len().checked_sub(1)?;
        self.value(name, last)
    }

    /// Value of every column at the last bar.
    pub fn latest_values(&self) -> BTreeMap<String, Option<f64>> {
        self.names
            .iter()
            .map(|name| (name.clone(), self.latest(name)))
            .collect()
    }

    /// Latest values grouped by category. Columns with no known category
    /// are left out.
    pub fn summary(&self) -> IndicatorSummary {
        let mut summary = IndicatorSummary::default();
        for name in &self.names {
            if let Some(category) = IndicatorCategory::of(name) {
                summary
                    .category_mut(category)
                    .insert(name.clone(), self.latest(name));
            }
        }
        summary
    }
}
