//! High-dimensional simulation on 401(k)-style household covariates.
//! Same grid and output as `cate-bounds`.

use cate_bounds::{PensionCovariates, SimConfig};

fn main() {
    env_logger::init();

    let config = SimConfig::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = cate_bounds::run::<PensionCovariates, _>(&config, &mut out) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
