//! Ground-truth CATE, read off the data-generating process.
//!
//! Used only to score the estimator, never by it.

use crate::error::{try_with_capacity, SimError};
use crate::generate::Dataset;
use crate::model::{Covariates, LowDimCovariates, PensionCovariates};

/// Closed-form tau(x) = mu(x, 1) - mu(x, 0).
pub trait TrueCate: Covariates {
    fn true_cate(&self) -> f64;
}

impl TrueCate for LowDimCovariates {
    /// 2(x0 + 1) - 2(sin(2 x0) - sin(-2 x0))
    fn true_cate(&self) -> f64 {
        let x0 = self.x0();
        2.0 * (x0 + 1.0) - 2.0 * ((2.0 * x0).sin() - (-2.0 * x0).sin())
    }
}

impl TrueCate for PensionCovariates {
    /// 2(age / 10 + income / 50000)
    fn true_cate(&self) -> f64 {
        2.0 * (self.age / 10.0 + self.income / 50_000.0)
    }
}

/// True CATE for every unit, index-aligned with the dataset.
pub fn true_cates<X: TrueCate>(data: &Dataset<X>) -> Result<Vec<f64>, SimError> {
    let mut out = try_with_capacity(data.len(), "true effects")?;
    out.extend(data.units().iter().map(|u| u.covariates.true_cate()));
    Ok(out)
}
