//! Analysis configuration.
//!
//! Every parameter has a documented default; a TOML file only needs to name
//! the values it changes. `validate()` rejects parameter sets that would make
//! an indicator constructor panic or a signal rule meaningless.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommendation::SignalOrdering;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{name} must be >= 1")]
    ZeroWindow { name: &'static str },
    #[error("{name}: fast period {fast} must be < slow period {slow}")]
    FastNotBelowSlow {
        name: &'static str,
        fast: usize,
        slow: usize,
    },
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidMultiplier { name: &'static str, value: f64 },
    #[error("{name} thresholds must satisfy 0 < low < high < 100, got {low} / {high}")]
    InvalidThresholds {
        name: &'static str,
        low: f64,
        high: f64,
    },
    #[error("adx_threshold must be in (0, 100), got {0}")]
    InvalidAdxThreshold(f64),
}

/// Top-level configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub indicators: IndicatorParams,
    pub signals: SignalParams,
    pub recommendation: RecommendationParams,
}

impl AnalysisConfig {
    /// Load and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;
        self.signals.validate()?;
        self.recommendation.validate()
    }

    /// Indicator parameters extended with the SMA windows the signal rules read.
    pub fn effective_indicators(&self) -> IndicatorParams {
        let mut params = self.indicators.clone();
        params.ensure_sma_window(self.signals.ma_fast);
        params.ensure_sma_window(self.signals.ma_slow);
        params
    }
}

/// Windows and multipliers for every indicator in the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub sma_windows: Vec<usize>,
    pub ema_spans: Vec<usize>,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_window: usize,
    pub bollinger_std: f64,
    pub stochastic_window: usize,
    pub stochastic_smooth_k: usize,
    pub stochastic_smooth_d: usize,
    pub atr_period: usize,
    pub adx_period: usize,
    pub williams_period: usize,
    pub roc_period: usize,
    pub momentum_period: usize,
    pub cci_period: usize,
    pub mfi_period: usize,
    pub hv_window: usize,
    pub keltner_ema: usize,
    pub keltner_atr: usize,
    pub keltner_multiplier: f64,
    pub donchian_window: usize,
    pub supertrend_period: usize,
    pub supertrend_multiplier: f64,
    pub ichimoku_conversion: usize,
    pub ichimoku_base: usize,
    pub ichimoku_span_b: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_windows: vec![20, 50, 200],
            ema_spans: vec![20, 50, 200],
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_window: 20,
            bollinger_std: 2.0,
            stochastic_window: 14,
            stochastic_smooth_k: 3,
            stochastic_smooth_d: 3,
            atr_period: 14,
            adx_period: 14,
            williams_period: 14,
            roc_period: 12,
            momentum_period: 10,
            cci_period: 20,
            mfi_period: 14,
            hv_window: 20,
            keltner_ema: 20,
            keltner_atr: 10,
            keltner_multiplier: 2.0,
            donchian_window: 20,
            supertrend_period: 10,
            supertrend_multiplier: 3.0,
            ichimoku_conversion: 9,
            ichimoku_base: 26,
            ichimoku_span_b: 52,
        }
    }
}

impl IndicatorParams {
    /// Add an SMA window if it is not configured yet, keeping the list sorted.
    pub fn ensure_sma_window(&mut self, window: usize) {
        if !self.sma_windows.contains(&window) {
            self.sma_windows.push(window);
            self.sma_windows.sort_unstable();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sma_windows.contains(&0) {
            return Err(ConfigError::ZeroWindow { name: "sma_windows" });
        }
        if self.ema_spans.contains(&0) {
            return Err(ConfigError::ZeroWindow { name: "ema_spans" });
        }

        let windows = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger_window", self.bollinger_window),
            ("stochastic_window", self.stochastic_window),
            ("stochastic_smooth_k", self.stochastic_smooth_k),
            ("stochastic_smooth_d", self.stochastic_smooth_d),
            ("atr_period", self.atr_period),
            ("adx_period", self.adx_period),
            ("williams_period", self.williams_period),
            ("roc_period", self.roc_period),
            ("momentum_period", self.momentum_period),
            ("cci_period", self.cci_period),
            ("mfi_period", self.mfi_period),
            ("hv_window", self.hv_window),
            ("keltner_ema", self.keltner_ema),
            ("keltner_atr", self.keltner_atr),
            ("donchian_window", self.donchian_window),
            ("supertrend_period", self.supertrend_period),
            ("ichimoku_conversion", self.ichimoku_conversion),
            ("ichimoku_base", self.ichimoku_base),
            ("ichimoku_span_b", self.ichimoku_span_b),
        ];
        if let Some(&(name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(ConfigError::ZeroWindow { name });
        }

        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::FastNotBelowSlow {
                name: "macd",
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }

        for (name, value) in [
            ("bollinger_std", self.bollinger_std),
            ("keltner_multiplier", self.keltner_multiplier),
            ("supertrend_multiplier", self.supertrend_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMultiplier { name, value });
            }
        }

        Ok(())
    }
}

/// Moving-average windows and thresholds used by the signal rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    pub ma_fast: usize,
    pub ma_slow: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub stochastic_oversold: f64,
    pub stochastic_overbought: f64,
    pub adx_threshold: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            ma_fast: 20,
            ma_slow: 50,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            stochastic_oversold: 20.0,
            stochastic_overbought: 80.0,
            adx_threshold: 25.0,
        }
    }
}

impl SignalParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ma_fast == 0 {
            return Err(ConfigError::ZeroWindow { name: "ma_fast" });
        }
        if self.ma_fast >= self.ma_slow {
            return Err(ConfigError::FastNotBelowSlow {
                name: "ma_cross",
                fast: self.ma_fast,
                slow: self.ma_slow,
            });
        }
        check_band("rsi", self.rsi_oversold, self.rsi_overbought)?;
        check_band(
            "stochastic",
            self.stochastic_oversold,
            self.stochastic_overbought,
        )?;
        if !(self.adx_threshold > 0.0 && self.adx_threshold < 100.0) {
            return Err(ConfigError::InvalidAdxThreshold(self.adx_threshold));
        }
        Ok(())
    }
}

fn check_band(name: &'static str, low: f64, high: f64) -> Result<(), ConfigError> {
    if low > 0.0 && low < high && high < 100.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThresholds { name, low, high })
    }
}

/// How many recent signals feed the verdict, and how they are picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationParams {
    pub lookback: usize,
    pub strong_ratio: f64,
    pub ordering: SignalOrdering,
}

impl Default for RecommendationParams {
    fn default() -> Self {
        Self {
            lookback: 10,
            strong_ratio: 1.5,
            ordering: SignalOrdering::Chronological,
        }
    }
}

impl RecommendationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback == 0 {
            return Err(ConfigError::ZeroWindow {
                name: "recommendation.lookback",
            });
        }
        if !self.strong_ratio.is_finite() || self.strong_ratio < 1.0 {
            return Err(ConfigError::InvalidMultiplier {
                name: "recommendation.strong_ratio",
                value: self.strong_ratio,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        AnalysisConfig::default().validate().unwrap();
    }

    #[test]
    fn toml_roundtrip() {
        let config = AnalysisConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = AnalysisConfig::from_toml(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AnalysisConfig::from_toml(
            r#"
            [indicators]
            rsi_period = 7

            [recommendation]
            ordering = "detection"
            "#,
        )
        .unwrap();
        assert_eq!(config.indicators.rsi_period, 7);
        assert_eq!(config.indicators.macd_slow, 26);
        assert_eq!(config.signals.ma_slow, 50);
        assert_eq!(config.recommendation.ordering, SignalOrdering::Detection);
        assert_eq!(config.recommendation.lookback, 10);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(AnalysisConfig::from_toml("").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn rejects_zero_window() {
        let err = AnalysisConfig::from_toml("[indicators]\natr_period = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroWindow { name: "atr_period" }));
    }

    #[test]
    fn rejects_macd_fast_not_below_slow() {
        let err = AnalysisConfig::from_toml("[indicators]\nmacd_fast = 26\n").unwrap_err();
        assert!(matches!(err, ConfigError::FastNotBelowSlow { name: "macd", .. }));
    }

    #[test]
    fn rejects_inverted_rsi_thresholds() {
        let err = AnalysisConfig::from_toml("[signals]\nrsi_oversold = 80.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThresholds { name: "rsi", .. }));
    }

    #[test]
    fn rejects_non_positive_multiplier() {
        let mut config = AnalysisConfig::default();
        config.indicators.bollinger_std = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMultiplier { name: "bollinger_std", .. })
        ));
    }

    #[test]
    fn rejects_zero_recommendation_lookback() {
        let err = AnalysisConfig::from_toml("[recommendation]\nlookback = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroWindow { .. }));
    }

    #[test]
    fn effective_indicators_adds_cross_windows() {
        let mut config = AnalysisConfig::default();
        config.indicators.sma_windows = vec![200];
        config.signals.ma_fast = 10;
        config.signals.ma_slow = 30;
        assert_eq!(config.effective_indicators().sma_windows, vec![10, 30, 200]);
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = AnalysisConfig::from_file(Path::new("/nonexistent/chartwise.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chartwise.toml");
        std::fs::write(&path, "[signals]\nadx_threshold = 20.0\n").unwrap();
        let config = AnalysisConfig::from_file(&path).unwrap();
        assert_eq!(config.signals.adx_threshold, 20.0);
    }
}
