//! Series: an ordered, duplicate-free run of daily bars for one symbol.

use super::bar::Bar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when assembling a [`Series`].
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("bar {index} ({date}) is not after the previous bar ({previous})")]
    NotAscending {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
    #[error("duplicate bar date {date} at index {index}")]
    DuplicateDate { index: usize, date: NaiveDate },
}

/// Chronological OHLCV series.
///
/// Construction via [`Series::new`] guarantees strictly ascending dates, so
/// every indicator can treat index order as time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
}

impl Series {
    /// Build a series, rejecting duplicate or out-of-order dates.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for (index, pair) in bars.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            if current.date == previous.date {
                return Err(SeriesError::DuplicateDate {
                    index: index + 1,
                    date: current.date,
                });
            }
            if current.date < previous.date {
                return Err(SeriesError::NotAscending {
                    index: index + 1,
                    date: current.date,
                    previous: previous.date,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into().to_uppercase(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
