//! Criterion benchmarks for chartwise hot paths.
//!
//! Benchmarks:
//! 1. Single indicators over long series (SMA, EMA, RSI, ADX, Bollinger)
//! 2. Full frame computation (every default column, rayon in parallel)
//! 3. Signal scan over a computed frame
//! 4. End-to-end analysis

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chartwise_core::analyze;
use chartwise_core::config::AnalysisConfig;
use chartwise_core::domain::{Bar, Series};
use chartwise_core::frame::IndicatorFrame;
use chartwise_core::indicators::{Adx, AdxLine, Bollinger, Ema, Indicator, Rsi, Sma};
use chartwise_core::signals::SignalSynthesizer;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0 + (i as f64 * 0.013).cos() * 25.0;
            let open = close - 0.3;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000.0 + (i % 500_000) as f64,
            }
        })
        .collect()
}

fn make_series(n: usize) -> Series {
    Series::new("BENCH", make_bars(n)).expect("ascending dates")
}

// ── 1. Single indicators ─────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator");
    let bars = make_bars(5_000);
    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(Sma::new(200)),
        Box::new(Ema::new(200)),
        Box::new(Rsi::new(14)),
        Box::new(Adx::new(14, AdxLine::Adx)),
        Box::new(Bollinger::upper(20, 2.0)),
    ];
    for indicator in &indicators {
        group.bench_function(indicator.name(), |b| {
            b.iter(|| indicator.compute(black_box(&bars)))
        });
    }
    group.finish();
}

// ── 2. Frame computation ─────────────────────────────────────────────

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_compute");
    let params = AnalysisConfig::default().effective_indicators();
    for n in [250usize, 2_500, 10_000] {
        let series = make_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &series, |b, series| {
            b.iter(|| IndicatorFrame::compute(black_box(series.clone()), &params))
        });
    }
    group.finish();
}

// ── 3. Signal scan ───────────────────────────────────────────────────

fn bench_scan(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    let frame = IndicatorFrame::compute(make_series(5_000), &config.effective_indicators());
    let synthesizer = SignalSynthesizer::from_params(&config.signals);
    c.bench_function("signal_scan_5000", |b| {
        b.iter(|| synthesizer.scan(black_box(&frame)))
    });
}

// ── 4. End to end ────────────────────────────────────────────────────

fn bench_analyze(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    let series = make_series(2_500);
    c.bench_function("analyze_2500", |b| {
        b.iter(|| analyze(black_box(series.clone()), &config))
    });
}

criterion_group!(benches, bench_indicators, bench_frame, bench_scan, bench_analyze);
criterion_main!(benches);
