use serde::Serialize;

/// Run configuration. `Default` is the fixed experiment: 10,000 units and
/// `log_gamma` in `0.0, 0.1, ..., 1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    /// Number of simulated units.
    pub n_units: usize,
    /// Grid points are `k * grid_step` for `k` in `0..=grid_steps`.
    pub grid_steps: u32,
    pub grid_step: f64,
    /// `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n_units: 10_000,
            grid_steps: 10,
            grid_step: 0.1,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn grid(&self) -> Vec<f64> {
        crate::sweep::log_gamma_grid(self.grid_steps, self.grid_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_experiment() {
        let c = SimConfig::default();
        assert_eq!(c.n_units, 10_000);
        assert_eq!(c.grid().len(), 11);
        assert!(c.seed.is_none());
    }

    #[test]
    fn test_serializes_for_run_log() {
        let json = serde_json::to_string(&SimConfig::with_seed(42)).unwrap();
        assert_eq!(
            json,
            r#"{"n_units":10000,"grid_steps":10,"grid_step":0.1,"seed":42}"#
        );
    }
}
