//! End-to-end runs of the benchmark driver against an in-memory console.

use std::num::NonZeroU64;

use fasttrig::batch::ResultBatches;
use fasttrig::bench::{self, BenchReport};
use fasttrig::config::BenchConfig;
use fasttrig::eval::{scalar_cos, scalar_sin, Strategy};
use fasttrig::simd::Backend;
use fasttrig::timer::Clock;
use fasttrig::{angles, DEFAULT_COUNT};

fn run(config: &BenchConfig, backend: &Backend) -> (BenchReport, String) {
    let mut console = Vec::new();
    let report = bench::run(config, backend, &mut console).unwrap();
    (report, String::from_utf8(console).unwrap())
}

fn timing_line<'a>(console: &'a str, strategy: Strategy) -> &'a str {
    console
        .lines()
        .find(|line| line.starts_with(&format!("{}: ", strategy.label())))
        .unwrap_or_else(|| panic!("no timing line for {strategy}"))
}

fn parse_ms(line: &str) -> f64 {
    let value = line.split(": ").nth(1).unwrap();
    value.split("ms").next().unwrap().parse().unwrap()
}

#[test]
fn test_full_size_run() {
    let config = BenchConfig::default().with_seed(1_600_000);
    let backend = Backend::detect();
    let (report, console) = run(&config, &backend);

    let mut lines = console.lines();
    assert_eq!(
        lines.next(),
        Some("Calculating cos and sin of 1600000 random angles.")
    );

    assert_eq!(report.count, DEFAULT_COUNT);
    assert_eq!(report.timings.len(), 4);
    for (timing, strategy) in report.timings.iter().zip(Strategy::TIMED_ORDER) {
        assert_eq!(timing.strategy, strategy);
        assert!(timing.ms >= 0.0);
        assert!(parse_ms(timing_line(&console, strategy)) >= 0.0);
    }

    assert_eq!(report.discrepancies, 0, "{console}");
    assert!(!console.contains("Warning:"));

    assert!(report.checksum.is_finite());
    assert_eq!(report.exit_code(), report.checksum as i32);
}

#[test]
fn test_timing_lines_follow_pass_order() {
    let config = BenchConfig::default().with_count(4_096).with_seed(3);
    let (_, console) = run(&config, &Backend::detect());

    let positions: Vec<usize> = Strategy::TIMED_ORDER
        .iter()
        .map(|&s| console.find(timing_line(&console, s)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_checksum_counts_each_value_three_times() {
    // After the 4-lane re-run for the check, the single-lane and scalar
    // passes each add one more copy of every value.
    let config = BenchConfig::default().with_count(64).with_seed(11);
    let (report, _) = run(&config, &Backend::detect());

    let angles = angles::generate(64, 11).unwrap();
    let expected: f32 = angles
        .cos()
        .iter()
        .zip(angles.sin())
        .map(|(&a, &b)| (3.0 * scalar_cos(a) + 3.0 * scalar_sin(b)) / 2.0)
        .sum();

    assert!(
        (report.checksum - expected).abs() <= 1e-4,
        "checksum {} vs {expected}",
        report.checksum
    );
}

#[test]
fn test_fallback_run_is_labelled() {
    let config = BenchConfig::default().with_count(1_000).with_seed(5);
    let (report, console) = run(&config, &Backend::fallback());

    assert!(!report.representative);
    assert_eq!(report.backend, "scalar fallback");
    assert!(console.contains("Note: no supported vector instruction set"));

    for strategy in [Strategy::Simd4, Strategy::Simd8, Strategy::Simd1] {
        assert!(timing_line(&console, strategy).ends_with("[scalar fallback, not representative]"));
    }
    assert!(timing_line(&console, Strategy::Scalar).ends_with("ms"));
    assert_eq!(report.discrepancies, 0);
}

#[test]
fn test_remainder_count_still_reduces() {
    // 1_001 = 8 * 125 + 1: the last element is only touched by the
    // accumulating passes.
    let config = BenchConfig::default().with_count(1_001).with_seed(9);
    let (report, _) = run(&config, &Backend::detect());
    assert!(report.checksum.is_finite());
    assert_eq!(report.timings.len(), 4);
}

#[test]
fn test_unsupported_clock_reports_zero_timings() {
    struct NoFrequency;
    impl Clock for NoFrequency {
        fn ticks(&self) -> u64 {
            0
        }
        fn ticks_per_second(&self) -> Option<NonZeroU64> {
            None
        }
    }

    let config = BenchConfig::default().with_count(256).with_seed(4);
    let mut console = Vec::new();
    let report =
        bench::run_with_clock(&config, &Backend::detect(), NoFrequency, &mut console).unwrap();
    let console = String::from_utf8(console).unwrap();

    assert!(report.timings.iter().all(|t| t.ms == 0.0));
    assert!(timing_line(&console, Strategy::Simd4).starts_with("SIMD (4 channel): 0.000000ms"));
}

#[test]
fn test_invalid_config_fails_before_output() {
    let config = BenchConfig::default().with_count(0);
    let mut console = Vec::new();
    let err = bench::run(&config, &Backend::detect(), &mut console).unwrap_err();

    assert!(matches!(err, fasttrig::FasttrigError::ValidationError { .. }));
    assert!(console.is_empty());
}

#[test]
fn test_result_batches_are_zeroed() {
    let results = ResultBatches::zeroed(17).unwrap();
    assert!(results.cos().iter().chain(results.sin()).all(|&v| v == 0.0));
}
