//! Chartwise Core: technical indicators, signal synthesis, recommendations, portfolio valuation.
//!
//! This crate is the pure engine behind chartwise:
//! - Domain types (bars, series, signals, positions, transactions)
//! - Rolling-window series utilities shared by every indicator
//! - Indicator library (trend, momentum, volatility, volume)
//! - Indicator frame: named columns aligned with the bars
//! - Signal synthesizer: crossover and threshold rules over the frame
//! - Recommendation aggregator: weighted verdict with confidence
//! - Portfolio ledger and valuation
//!
//! Nothing here performs I/O beyond reading a config file on request.

pub mod analysis;
pub mod config;
pub mod domain;
pub mod frame;
pub mod indicators;
pub mod portfolio;
pub mod recommendation;
pub mod rolling;
pub mod signals;

pub use analysis::{analyze, Analysis, AnalysisReport};
pub use config::AnalysisConfig;
pub use frame::IndicatorFrame;
