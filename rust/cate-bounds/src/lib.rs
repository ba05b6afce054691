//! # CATE Bounds
//!
//! Monte Carlo harness for sensitivity bounds on the conditional average
//! treatment effect under unmeasured confounding.
//!
//! A synthetic dataset is drawn from a known data-generating process, the
//! true CATE is read off the same process, and a closed-form B-Learner style
//! correction turns each unit's AIPW pseudo-outcome into a `[lower, upper]`
//! interval for every sensitivity level `log_gamma` on a fixed grid.
//! Propensity and outcome nuisances are the true generating formulas, so the
//! estimator is an oracle-nuisance estimator by construction.

pub mod config;
pub mod error;
pub mod estimator;
pub mod generate;
pub mod model;
pub mod oracle;
pub mod rng;
pub mod sweep;

pub use config::SimConfig;
pub use error::SimError;
pub use generate::{generate_dataset, Dataset};
pub use model::{Covariates, LowDimCovariates, PensionCovariates, Unit};
pub use sweep::{Sweep, SummaryRow};

use std::io::Write;

use oracle::TrueCate;
use rng::{RngSource, Sampler};

/// Run one full simulation: seed, generate, sweep, stream CSV to `out`.
///
/// Everything that can fail for lack of memory is acquired before the header
/// is written, so a failed run produces no rows.
pub fn run<X: TrueCate, W: Write>(config: &SimConfig, out: &mut W) -> Result<Vec<SummaryRow>, SimError> {
    match serde_json::to_string(config) {
        Ok(json) => log::info!("Config: {json}"),
        Err(e) => log::warn!("Could not serialize config: {e}"),
    }

    let source = match config.seed {
        Some(seed) => RngSource::seeded(seed),
        None => {
            let (source, seed) = RngSource::from_time();
            log::info!("Seeded from clock: {seed}");
            source
        }
    };
    let mut sampler = Sampler::new(source);

    let data: Dataset<X> = generate_dataset(config.n_units, &mut sampler)?;
    log::info!(
        "Generated {} units, treated fraction {:.4}",
        data.len(),
        data.treated_fraction()
    );

    let mut sweep = Sweep::from_config(&data, config)?;
    sweep.run(&data, out)
}
