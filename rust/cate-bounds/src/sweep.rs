//! Evaluation sweep over the sensitivity grid.
//!
//! For each `log_gamma` the estimator is run over the full dataset and the
//! per-unit bounds are reduced against the true CATE into one CSV row.

use std::io::Write;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::estimator::{estimate_bounds, BoundBuffers};
use crate::generate::Dataset;
use crate::oracle::{true_cates, TrueCate};

pub const CSV_HEADER: &str =
    "log_gamma,avg_lower_bound,avg_upper_bound,avg_true_cate,coverage,pct_negative_lb";

/// `k * step` for `k = 0..=steps`. Built from integer indices so the last
/// point is never lost to accumulated rounding.
pub fn log_gamma_grid(steps: u32, step: f64) -> Vec<f64> {
    (0..=steps).map(|k| k as f64 * step).collect()
}

/// Aggregate diagnostics for one grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub log_gamma: f64,
    pub avg_lower_bound: f64,
    pub avg_upper_bound: f64,
    pub avg_true_cate: f64,
    /// Fraction in `[0, 1]` of units with `lower <= tau <= upper`.
    pub coverage: f64,
    /// Percentage in `[0, 100]` of units with `lower < 0`.
    pub pct_negative_lb: f64,
}

impl SummaryRow {
    pub fn avg_width(&self) -> f64 {
        self.avg_upper_bound - self.avg_lower_bound
    }

    pub fn csv_line(&self) -> String {
        format!(
            "{:.1},{:.4},{:.4},{:.4},{:.4},{:.2}",
            self.log_gamma,
            self.avg_lower_bound,
            self.avg_upper_bound,
            self.avg_true_cate,
            self.coverage,
            self.pct_negative_lb
        )
    }
}

/// Reduce aligned bound and truth vectors to a [`SummaryRow`].
///
/// Sums run sequentially in index order so the row is bit-stable.
pub fn summarize(
    log_gamma: f64,
    lower: &[f64],
    upper: &[f64],
    true_cate: &[f64],
) -> Result<SummaryRow, SimError> {
    let n = true_cate.len();
    if n == 0 {
        return Err(SimError::EmptyDataset);
    }
    for found in [lower.len(), upper.len()] {
        if found != n {
            return Err(SimError::LengthMismatch { expected: n, found });
        }
    }

    let (mut sum_lo, mut sum_hi, mut sum_tau) = (0.0, 0.0, 0.0);
    let (mut covered, mut negative) = (0usize, 0usize);
    for ((&lo, &hi), &tau) in lower.iter().zip(upper).zip(true_cate) {
        sum_lo += lo;
        sum_hi += hi;
        sum_tau += tau;
        if lo <= tau && tau <= hi {
            covered += 1;
        }
        if lo < 0.0 {
            negative += 1;
        }
    }

    let nf = n as f64;
    Ok(SummaryRow {
        log_gamma,
        avg_lower_bound: sum_lo / nf,
        avg_upper_bound: sum_hi / nf,
        avg_true_cate: sum_tau / nf,
        coverage: covered as f64 / nf,
        pct_negative_lb: negative as f64 / nf * 100.0,
    })
}

/// Sweep state: the grid plus the scratch buffers, allocated once per run.
#[derive(Debug)]
pub struct Sweep {
    grid: Vec<f64>,
    bounds: BoundBuffers,
    true_cate: Vec<f64>,
}

impl Sweep {
    /// Allocate scratch space for `data` and compute its true effects.
    pub fn new<X: TrueCate>(data: &Dataset<X>, grid: Vec<f64>) -> Result<Self, SimError> {
        if data.is_empty() {
            return Err(SimError::EmptyDataset);
        }
        Ok(Self {
            grid,
            bounds: BoundBuffers::new(data.len())?,
            true_cate: true_cates(data)?,
        })
    }

    pub fn from_config<X: TrueCate>(data: &Dataset<X>, config: &SimConfig) -> Result<Self, SimError> {
        Self::new(data, config.grid())
    }

    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    pub fn true_cate(&self) -> &[f64] {
        &self.true_cate
    }

    /// Summary for a single grid point.
    pub fn evaluate<X: TrueCate>(&mut self, data: &Dataset<X>, log_gamma: f64) -> Result<SummaryRow, SimError> {
        if data.len() != self.true_cate.len() {
            return Err(SimError::LengthMismatch {
                expected: self.true_cate.len(),
                found: data.len(),
            });
        }
        estimate_bounds(data, log_gamma, &mut self.bounds)?;
        summarize(log_gamma, &self.bounds.lower, &self.bounds.upper, &self.true_cate)
    }

    /// Write the header, then one row per grid point in increasing order.
    /// Rows are flushed as they are produced and also returned.
    pub fn run<X: TrueCate, W: Write>(&mut self, data: &Dataset<X>, out: &mut W) -> Result<Vec<SummaryRow>, SimError> {
        writeln!(out, "{CSV_HEADER}")?;
        let mut rows = Vec::with_capacity(self.grid.len());
        let grid = self.grid.clone();
        for log_gamma in grid {
            let row = self.evaluate(data, log_gamma)?;
            log::debug!(
                "log_gamma={:.1}: width={:.4} coverage={:.4} neg_lb={:.2}%",
                row.log_gamma,
                row.avg_width(),
                row.coverage,
                row.pct_negative_lb
            );
            writeln!(out, "{}", row.csv_line())?;
            rows.push(row);
        }
        out.flush()?;
        Ok(rows)
    }
}
