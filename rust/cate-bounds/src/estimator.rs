//! B-Learner style CATE bounds with oracle nuisances.
//!
//! For sensitivity level `gamma = exp(log_gamma)` each unit gets
//!
//! ```text
//! r      = Y - mu(X, A)
//! pseudo = r + (A - e(X)) / (e(X) (1 - e(X))) * r
//! lower  = pseudo - gamma |r|
//! upper  = pseudo + gamma |r|
//! ```
//!
//! Propensities are never clipped: a unit with `e` close to 0 or 1 produces a
//! large pseudo-outcome, and that value is carried into the aggregates.

use rayon::prelude::*;

use crate::error::{try_filled, SimError};
use crate::generate::Dataset;
use crate::model::{Covariates, Unit};

/// Per-unit estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBounds {
    pub pseudo: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Odds-ratio sensitivity parameter for a given `log_gamma`.
pub fn gamma(log_gamma: f64) -> f64 {
    log_gamma.exp()
}

/// AIPW pseudo-outcome for one unit using the true propensity and outcome mean.
pub fn pseudo_outcome<X: Covariates>(unit: &Unit<X>) -> f64 {
    let e = unit.covariates.propensity();
    let r = unit.residual();
    r + (unit.treatment() - e) / (e * (1.0 - e)) * r
}

pub fn unit_bounds<X: Covariates>(unit: &Unit<X>, gamma: f64) -> UnitBounds {
    let pseudo = pseudo_outcome(unit);
    let half_width = gamma * unit.residual().abs();
    UnitBounds {
        pseudo,
        lower: pseudo - half_width,
        upper: pseudo + half_width,
    }
}

/// Lower/upper bound buffers, index-aligned with a dataset and reused across
/// grid points.
#[derive(Debug, Clone)]
pub struct BoundBuffers {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl BoundBuffers {
    pub fn new(len: usize) -> Result<Self, SimError> {
        Ok(Self {
            lower: try_filled(len, 0.0, "lower bounds")?,
            upper: try_filled(len, 0.0, "upper bounds")?,
        })
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }
}

/// Fill `out` with bounds for every unit at `log_gamma`.
///
/// Units are independent, so the work is spread across the rayon pool; each
/// unit's arithmetic is the same as [`unit_bounds`], so results do not depend
/// on the thread count.
pub fn estimate_bounds<X: Covariates>(
    data: &Dataset<X>,
    log_gamma: f64,
    out: &mut BoundBuffers,
) -> Result<(), SimError> {
    if out.lower.len() != data.len() || out.upper.len() != data.len() {
        return Err(SimError::LengthMismatch {
            expected: data.len(),
            found: out.lower.len().min(out.upper.len()),
        });
    }

    let g = gamma(log_gamma);
    data.units()
        .par_iter()
        .zip(out.lower.par_iter_mut())
        .zip(out.upper.par_iter_mut())
        .for_each(|((unit, lo), hi)| {
            let b = unit_bounds(unit, g);
            *lo = b.lower;
            *hi = b.upper;
        });
    Ok(())
}
