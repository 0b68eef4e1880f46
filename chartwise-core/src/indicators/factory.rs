//! Indicator factory: turns `IndicatorParams` into the full set of
//! frame columns as trait objects.
//!
//! Column order follows the category grouping: trend, momentum, volatility,
//! volume. Duplicate column names are dropped (first wins).

use std::collections::HashSet;

use super::{
    AccumulationDistribution, Adx, AdxLine, Atr, Bollinger, BollingerBand, Cci, Donchian, Ema,
    HistoricalVolatility, Ichimoku, IchimokuLine, Indicator, Keltner, KeltnerBand, Macd,
    MacdLine, Mfi, Momentum, Obv, Roc, Rsi, Sma, Stochastic, StochasticLine, Supertrend,
    SupertrendLine, WilliamsR,
};
use crate::config::IndicatorParams;

/// Build every indicator the frame computes for these parameters.
///
/// Parameters are expected to have passed `IndicatorParams::validate`;
/// a zero window trips the indicator constructor's assertion.
pub fn build_indicators(params: &IndicatorParams) -> Vec<Box<dyn Indicator>> {
    let mut out: Vec<Box<dyn Indicator>> = Vec::new();

    // Trend
    for &w in &params.sma_windows {
        out.push(Box::new(Sma::new(w)));
    }
    for &span in &params.ema_spans {
        out.push(Box::new(Ema::new(span)));
    }
    for line in [MacdLine::Macd, MacdLine::Signal, MacdLine::Histogram] {
        out.push(Box::new(Macd::new(
            params.macd_fast,
            params.macd_slow,
            params.macd_signal,
            line,
        )));
    }
    for line in [AdxLine::Adx, AdxLine::PlusDi, AdxLine::MinusDi] {
        out.push(Box::new(Adx::new(params.adx_period, line)));
    }
    for line in [
        IchimokuLine::Tenkan,
        IchimokuLine::Kijun,
        IchimokuLine::SenkouA,
        IchimokuLine::SenkouB,
        IchimokuLine::Chikou,
    ] {
        out.push(Box::new(Ichimoku::new(
            params.ichimoku_conversion,
            params.ichimoku_base,
            params.ichimoku_span_b,
            line,
        )));
    }
    for line in [SupertrendLine::Value, SupertrendLine::Direction] {
        out.push(Box::new(Supertrend::new(
            params.supertrend_period,
            params.supertrend_multiplier,
            line,
        )));
    }

    // Momentum
    out.push(Box::new(Rsi::new(params.rsi_period)));
    for line in [StochasticLine::K, StochasticLine::D] {
        out.push(Box::new(Stochastic::new(
            params.stochastic_window,
            params.stochastic_smooth_k,
            params.stochastic_smooth_d,
            line,
        )));
    }
    out.push(Box::new(WilliamsR::new(params.williams_period)));
    out.push(Box::new(Roc::new(params.roc_period)));
    out.push(Box::new(Momentum::new(params.momentum_period)));
    out.push(Box::new(Cci::new(params.cci_period)));

    // Volatility
    for band in [
        BollingerBand::Upper,
        BollingerBand::Middle,
        BollingerBand::Lower,
        BollingerBand::Width,
    ] {
        out.push(Box::new(Bollinger::new(
            params.bollinger_window,
            params.bollinger_std,
            band,
        )));
    }
    out.push(Box::new(Atr::new(params.atr_period)));
    out.push(Box::new(HistoricalVolatility::new(params.hv_window)));
    for band in [KeltnerBand::Upper, KeltnerBand::Middle, KeltnerBand::Lower] {
        out.push(Box::new(Keltner::new(
            params.keltner_ema,
            params.keltner_atr,
            params.keltner_multiplier,
            band,
        )));
    }
    out.push(Box::new(Donchian::upper(params.donchian_window)));
    out.push(Box::new(Donchian::lower(params.donchian_window)));

    // Volume
    out.push(Box::new(Obv::new()));
    out.push(Box::new(AccumulationDistribution::new()));
    out.push(Box::new(Mfi::new(params.mfi_period)));

    let mut seen = HashSet::new();
    out.retain(|ind| seen.insert(ind.name().to_string()));
    out
}
