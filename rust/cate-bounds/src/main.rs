//! Low-dimensional simulation: X ~ Unif([-2, 2]^5), 10,000 units,
//! `log_gamma` in 0.0..=1.0 by 0.1. CSV on stdout, logs on stderr
//! (`RUST_LOG=info`).

use cate_bounds::{LowDimCovariates, SimConfig};

fn main() {
    env_logger::init();

    let config = SimConfig::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = cate_bounds::run::<LowDimCovariates, _>(&config, &mut out) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
