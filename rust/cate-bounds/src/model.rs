//! Unit types and the nuisance formulas of the data-generating process.
//!
//! Propensity and outcome mean live here once and are called by both the
//! generator and the bound estimator, which is what makes the estimator an
//! oracle-nuisance estimator.

use crate::error::SimError;
use crate::rng::{sigmoid, Sampler, UniformSource};

/// Covariate schema of one scenario.
pub trait Covariates: Copy + Send + Sync + Sized {
    /// Draw a fresh covariate vector, consuming uniforms in field order.
    fn draw<S: UniformSource>(sampler: &mut Sampler<S>) -> Result<Self, SimError>;

    /// P(A = 1 | X).
    fn propensity(&self) -> f64;

    /// E[Y | X, A].
    fn outcome_mean(&self, treated: bool) -> f64;
}

/// One simulated observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit<X> {
    pub covariates: X,
    pub treated: bool,
    pub outcome: f64,
}

impl<X: Covariates> Unit<X> {
    pub fn new(covariates: X, treated: bool, outcome: f64) -> Self {
        Self { covariates, treated, outcome }
    }

    /// Treatment as 0.0 / 1.0.
    pub fn treatment(&self) -> f64 {
        indicator(self.treated)
    }

    /// Outcome residual against the true mean at the realised treatment.
    pub fn residual(&self) -> f64 {
        self.outcome - self.covariates.outcome_mean(self.treated)
    }
}

pub(crate) fn indicator(treated: bool) -> f64 {
    if treated {
        1.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Variant A: five covariates on [-2, 2]
// ---------------------------------------------------------------------------

pub const LOW_DIM_FEATURES: usize = 5;
const LOW_DIM_LO: f64 = -2.0;
const LOW_DIM_HI: f64 = 2.0;

/// X ~ Unif([-2, 2]^5). Only `x[0]` enters treatment and outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowDimCovariates(pub [f64; LOW_DIM_FEATURES]);

impl LowDimCovariates {
    pub fn x0(&self) -> f64 {
        self.0[0]
    }
}

impl Covariates for LowDimCovariates {
    fn draw<S: UniformSource>(sampler: &mut Sampler<S>) -> Result<Self, SimError> {
        let mut x = [0.0; LOW_DIM_FEATURES];
        for xj in x.iter_mut() {
            *xj = sampler.uniform_in(LOW_DIM_LO, LOW_DIM_HI)?;
        }
        Ok(Self(x))
    }

    /// sigma(0.75 x0 + 0.5)
    fn propensity(&self) -> f64 {
        sigmoid(0.75 * self.x0() + 0.5)
    }

    /// (2A - 1)(x0 + 1) - 2 sin((4A - 2) x0)
    fn outcome_mean(&self, treated: bool) -> f64 {
        let a = indicator(treated);
        let x0 = self.x0();
        (2.0 * a - 1.0) * (x0 + 1.0) - 2.0 * ((4.0 * a - 2.0) * x0).sin()
    }
}

// ---------------------------------------------------------------------------
// Variant B: 401(k)-style household covariates
// ---------------------------------------------------------------------------

/// Household covariates modelled on the 401(k) eligibility data.
///
/// The binary indicators are drawn but never read by propensity or outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PensionCovariates {
    pub age: f64,
    pub income: f64,
    pub education: f64,
    pub family_size: f64,
    pub net_financial_assets: f64,
    pub married: bool,
    pub two_earners: bool,
    pub defined_benefit: bool,
    pub ira: bool,
    pub home_owner: bool,
}

impl PensionCovariates {
    pub const AGE: (f64, f64) = (25.0, 64.0);
    pub const INCOME: (f64, f64) = (0.0, 250_000.0);
    pub const EDUCATION: (f64, f64) = (1.0, 18.0);
    pub const FAMILY_SIZE: (f64, f64) = (1.0, 13.0);
    pub const NET_FINANCIAL_ASSETS: (f64, f64) = (-50_000.0, 500_000.0);

    /// Thresholds for marr, twoearn, db, pira, hown: indicator is 1 when a
    /// uniform draw exceeds the threshold.
    pub const INDICATOR_THRESHOLDS: [f64; 5] = [0.5, 0.5, 0.3, 0.4, 0.6];

    /// Treatment-effect modifier: half the CATE.
    pub fn effect_scale(&self) -> f64 {
        self.age / 10.0 + self.income / 50_000.0
    }
}

impl Covariates for PensionCovariates {
    fn draw<S: UniformSource>(sampler: &mut Sampler<S>) -> Result<Self, SimError> {
        let age = sampler.uniform_in(Self::AGE.0, Self::AGE.1)?;
        let income = sampler.uniform_in(Self::INCOME.0, Self::INCOME.1)?;
        let education = sampler.uniform_in(Self::EDUCATION.0, Self::EDUCATION.1)?;
        let family_size = sampler.uniform_in(Self::FAMILY_SIZE.0, Self::FAMILY_SIZE.1)?;
        let net_financial_assets =
            sampler.uniform_in(Self::NET_FINANCIAL_ASSETS.0, Self::NET_FINANCIAL_ASSETS.1)?;

        let [t_marr, t_two, t_db, t_ira, t_hown] = Self::INDICATOR_THRESHOLDS;
        Ok(Self {
            age,
            income,
            education,
            family_size,
            net_financial_assets,
            married: sampler.exceeds(t_marr)?,
            two_earners: sampler.exceeds(t_two)?,
            defined_benefit: sampler.exceeds(t_db)?,
            ira: sampler.exceeds(t_ira)?,
            home_owner: sampler.exceeds(t_hown)?,
        })
    }

    fn propensity(&self) -> f64 {
        sigmoid(
            0.02 * (self.age - 40.0)
                + (self.income - 50_000.0) / 50_000.0
                + 0.1 * (self.education - 12.0),
        )
    }

    fn outcome_mean(&self, treated: bool) -> f64 {
        let a = indicator(treated);
        let baseline = 0.1 * self.education
            + 0.2 * self.family_size
            + self.net_financial_assets / 100_000.0;
        baseline + (2.0 * a - 1.0) * self.effect_scale()
    }
}
