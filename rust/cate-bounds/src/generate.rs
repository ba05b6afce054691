//! Synthetic dataset generation.

use crate::error::{try_with_capacity, SimError};
use crate::model::{Covariates, Unit};
use crate::rng::{Sampler, UniformSource};

/// Immutable, ordered collection of simulated units.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<X> {
    units: Vec<Unit<X>>,
}

impl<X: Covariates> Dataset<X> {
    pub fn from_units(units: Vec<Unit<X>>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[Unit<X>] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn treated_fraction(&self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let treated = self.units.iter().filter(|u| u.treated).count();
        treated as f64 / self.units.len() as f64
    }
}

/// Draw one unit: covariates, then A ~ Bern(e(X)), then Y = mu(X, A) + N(0, 1).
pub fn draw_unit<X: Covariates, S: UniformSource>(sampler: &mut Sampler<S>) -> Result<Unit<X>, SimError> {
    let covariates = X::draw(sampler)?;
    let treated = sampler.bernoulli(covariates.propensity())?;
    let outcome = covariates.outcome_mean(treated) + sampler.normal()?;
    Ok(Unit::new(covariates, treated, outcome))
}

/// Generate `n` units from the shared stream.
///
/// Fails on allocation failure, an exhausted stream, or a non-finite outcome.
///
/// A non-finite outcome comes from a Box-Muller draw with `u1 = 0`
/// (probability 2^-53 per draw with `rand`). The run aborts rather than let
/// an infinite value reach the averages: corrupted simulation data would
/// invalidate every downstream statistic, so it is treated like any other
/// unrecoverable generation failure.
pub fn generate_dataset<X: Covariates, S: UniformSource>(
    n: usize,
    sampler: &mut Sampler<S>,
) -> Result<Dataset<X>, SimError> {
    let mut units = try_with_capacity(n, "dataset")?;
    for index in 0..n {
        let unit: Unit<X> = draw_unit(sampler)?;
        if !unit.outcome.is_finite() {
            return Err(SimError::NonFiniteOutcome { index });
        }
        units.push(unit);
    }
    log::debug!("Generated {} units", units.len());
    Ok(Dataset::from_units(units))
}
