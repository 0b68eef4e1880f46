//! OHLCV CSV loading.
//!
//! Expected header: `date,open,high,low,close,volume`, dates as `YYYY-MM-DD`,
//! rows in ascending date order.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

use chartwise_core::domain::{Bar, Series};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Symbol implied by a CSV path: the file stem, e.g. `data/aapl.csv` -> `aapl`.
pub fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "UNKNOWN".into())
}

pub fn read_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;

    let mut bars = Vec::new();
    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        // Line 1 is the header.
        let line = i + 2;
        let row = row.with_context(|| format!("{}:{line}: malformed row", path.display()))?;
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").with_context(|| {
            format!("{}:{line}: bad date '{}'", path.display(), row.date)
        })?;
        bars.push(Bar {
            date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }
    Ok(bars)
}

pub fn read_series(path: &Path, symbol: Option<&str>) -> Result<Series> {
    let bars = read_bars(path)?;
    let symbol = symbol.map(str::to_string).unwrap_or_else(|| symbol_from_path(path));
    Series::new(&symbol, bars).with_context(|| format!("build series from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_rows_in_order() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,10,11,9,10.5,1000\n\
             2024-01-03, 10.5 ,12,10,11.5,1200\n",
        );
        let bars = read_bars(file.path()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].open, 10.5);
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn bad_date_names_the_line() {
        let file = write_csv("date,open,high,low,close,volume\n01/02/2024,1,1,1,1,1\n");
        let err = read_bars(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains(":2: bad date"));
    }

    #[test]
    fn unordered_dates_are_rejected() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-03,1,1,1,1,1\n\
             2024-01-02,1,1,1,1,1\n",
        );
        assert!(read_series(file.path(), Some("x")).is_err());
    }

    #[test]
    fn symbol_defaults_to_file_stem() {
        let file = write_csv("date,open,high,low,close,volume\n2024-01-02,1,1,1,1,1\n");
        let series = read_series(file.path(), None).unwrap();
        assert_eq!(series.symbol(), symbol_from_path(file.path()).to_uppercase());

        let series = read_series(file.path(), Some("spy")).unwrap();
        assert_eq!(series.symbol(), "SPY");
    }
}
