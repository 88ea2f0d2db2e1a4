//! The benchmark driver.
//!
//! One run goes through these steps, in this order:
//!
//! 1. seed the generator and fill both angle batches;
//! 2. time the 4-lane pass;
//! 3. time the 8-lane pass;
//! 4. re-run the 4-lane pass untimed and verify it against the scalar library;
//! 5. time the single-lane pass, accumulating;
//! 6. time the scalar pass, accumulating;
//! 7. reduce both result batches to one checksum.
//!
//! Steps 5 and 6 add onto what steps 2-4 stored, so the order is fixed.

use std::hint::black_box;
use std::io::Write;

use crate::angles::{self, seed_from_wall_clock};
use crate::batch::{AngleBatches, ResultBatches};
use crate::config::BenchConfig;
use crate::error::Result;
use crate::eval::{self, Strategy};
use crate::simd::Backend;
use crate::timer::{Clock, MonotonicClock, Timer};
use crate::verify;

/// Elapsed time of one strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub strategy: Strategy,
    pub ms: f64,
}

/// Everything a run printed, in structured form.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub count: usize,
    pub seed: u64,
    pub backend: &'static str,
    pub representative: bool,
    /// One entry per timed strategy, in [`Strategy::TIMED_ORDER`].
    pub timings: Vec<Timing>,
    pub discrepancies: usize,
    pub checksum: f32,
}

impl BenchReport {
    pub fn timing(&self, strategy: Strategy) -> Option<f64> {
        self.timings
            .iter()
            .find(|t| t.strategy == strategy)
            .map(|t| t.ms)
    }

    /// The process exit code: the checksum truncated toward zero.
    pub fn exit_code(&self) -> i32 {
        exit_code(self.checksum)
    }
}

/// Sums the per-index averages of the cosine and sine results, in `f32`.
pub fn reduce(results: &ResultBatches) -> f32 {
    results
        .cos()
        .iter()
        .zip(results.sin())
        .fold(0.0f32, |acc, (&c, &s)| acc + (c + s) / 2.0)
}

/// Truncates a checksum to an exit code. Out-of-range values saturate and
/// NaN maps to 0.
pub fn exit_code(checksum: f32) -> i32 {
    checksum as i32
}

/// Runs the benchmark on the platform monotonic clock, writing the report
/// to `out`.
pub fn run<W: Write>(config: &BenchConfig, backend: &Backend, out: &mut W) -> Result<BenchReport> {
    run_with_clock(config, backend, MonotonicClock::new(), out)
}

/// Runs the benchmark, timing every pass with `clock`.
///
/// # Errors
///
/// Fails before any pass if the configuration is invalid or a batch cannot
/// be allocated, and at any point if `out` cannot be written.
pub fn run_with_clock<C, W>(
    config: &BenchConfig,
    backend: &Backend,
    clock: C,
    out: &mut W,
) -> Result<BenchReport>
where
    C: Clock,
    W: Write,
{
    config.validate()?;

    let seed = config.seed.unwrap_or_else(seed_from_wall_clock);
    log::debug!("seed {seed}, backend {}", backend.name());

    writeln!(out, "Calculating cos and sin of {} random angles.", config.count)?;
    if !backend.is_representative() {
        writeln!(
            out,
            "Note: no supported vector instruction set; SIMD timings use a per-lane scalar fallback and are not representative."
        )?;
    }

    let angles = angles::generate(config.count, seed)?;
    let mut results = ResultBatches::zeroed(config.count)?;
    let mut timer = Timer::with_clock(clock);
    let mut timings = Vec::with_capacity(Strategy::TIMED_ORDER.len());

    for strategy in [Strategy::Simd4, Strategy::Simd8] {
        timings.push(time_pass(strategy, backend, &angles, &mut results, &mut timer, out)?);
    }

    // The 8-lane pass overwrote the 4-lane output; restore it for the check.
    eval::simd4(backend, &angles, &mut results);
    let discrepancies = report_discrepancies(&angles, &results, config.tolerance, out)?;
    if discrepancies > 0 {
        log::warn!("{discrepancies} vector results outside tolerance {}", config.tolerance);
    }

    for strategy in [Strategy::Simd1, Strategy::Scalar] {
        timings.push(time_pass(strategy, backend, &angles, &mut results, &mut timer, out)?);
    }

    let checksum = reduce(&results);
    log::debug!("checksum {checksum}");

    Ok(BenchReport {
        count: config.count,
        seed,
        backend: backend.name(),
        representative: backend.is_representative(),
        timings,
        discrepancies,
        checksum,
    })
}

fn time_pass<C: Clock, W: Write>(
    strategy: Strategy,
    backend: &Backend,
    angles: &AngleBatches,
    results: &mut ResultBatches,
    timer: &mut Timer<C>,
    out: &mut W,
) -> Result<Timing> {
    timer.reset();
    strategy.run(backend, black_box(angles), results);
    let ms = timer.elapsed_ms();

    if strategy.uses_backend() && !backend.is_representative() {
        writeln!(out, "{strategy}: {ms:.6}ms [scalar fallback, not representative]")?;
    } else {
        writeln!(out, "{strategy}: {ms:.6}ms")?;
    }

    Ok(Timing { strategy, ms })
}

fn report_discrepancies<W: Write>(
    angles: &AngleBatches,
    results: &ResultBatches,
    tolerance: f32,
    out: &mut W,
) -> Result<usize> {
    let mut write_error = None;

    let count = verify::verify(angles, results, tolerance, |discrepancy| {
        if write_error.is_none() {
            if let Err(err) = writeln!(out, "{discrepancy}") {
                write_error = Some(err);
            }
        }
    });

    match write_error {
        Some(err) => Err(err.into()),
        None => Ok(count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_averages_then_sums() {
        let mut results = ResultBatches::zeroed(3).unwrap();
        {
            let (cos, sin) = results.split_mut();
            cos.copy_from_slice(&[1.0, 2.0, -4.0]);
            sin.copy_from_slice(&[3.0, 0.0, 1.0]);
        }
        // (1+3)/2 + (2+0)/2 + (-4+1)/2 = 2 + 1 - 1.5
        assert_eq!(reduce(&results), 1.5);
    }

    #[test]
    fn test_exit_code_truncates() {
        assert_eq!(exit_code(12.9), 12);
        assert_eq!(exit_code(-3.7), -3);
        assert_eq!(exit_code(f32::NAN), 0);
        assert_eq!(exit_code(1e20), i32::MAX);
    }

    #[test]
    fn test_report_lookup() {
        let report = BenchReport {
            count: 8,
            seed: 1,
            backend: "scalar fallback",
            representative: false,
            timings: vec![Timing {
                strategy: Strategy::Simd8,
                ms: 0.5,
            }],
            discrepancies: 0,
            checksum: 3.2,
        };
        assert_eq!(report.timing(Strategy::Simd8), Some(0.5));
        assert_eq!(report.timing(Strategy::Scalar), None);
        assert_eq!(report.exit_code(), 3);
    }

    #[test]
    fn test_broken_sink_is_an_output_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let config = BenchConfig::default().with_count(8).with_seed(1);
        let err = run(&config, &Backend::fallback(), &mut Broken).unwrap_err();
        assert!(matches!(err, crate::FasttrigError::OutputError { .. }));
    }
}
