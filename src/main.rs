use fasttrig::{bench, config::BenchConfig, simd::Backend};

fn main() {
    env_logger::init();

    let config = BenchConfig::default();
    let backend = Backend::detect();

    // The exit code is the run's checksum, not a success/failure status.
    let code = match bench::run(&config, &backend, &mut std::io::stdout().lock()) {
        Ok(report) => report.exit_code(),
        Err(err) => {
            eprintln!("fasttrig: {err}");
            1
        }
    };

    std::process::exit(code);
}
