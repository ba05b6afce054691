use thiserror::Error;

/// Errors that abort a simulation run.
///
/// Numerical edge cases (propensities near 0 or 1, `log_gamma = 0`) are not
/// errors; they flow through the formulas as ordinary floating-point values.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Memory allocation failed for {what} ({len} elements)")]
    Allocation { what: &'static str, len: usize },

    #[error("Random stream exhausted")]
    StreamExhausted,

    #[error("Non-finite outcome drawn for unit {index}")]
    NonFiniteOutcome { index: usize },

    #[error("Buffer length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Allocate an empty vector with room for exactly `len` elements, reporting
/// allocator failure instead of aborting the process.
pub(crate) fn try_with_capacity<T>(len: usize, what: &'static str) -> Result<Vec<T>, SimError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| SimError::Allocation { what, len })?;
    Ok(buf)
}

/// Like [`try_with_capacity`], but filled with `len` copies of `value`.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>, SimError> {
    let mut buf = try_with_capacity(len, what)?;
    buf.resize(len, value);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_filled_has_requested_length() {
        let buf = try_filled(7, 0.0f64, "scratch").unwrap();
        assert_eq!(buf.len(), 7);
        assert!(buf.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        let err = try_with_capacity::<f64>(usize::MAX, "lower bounds").unwrap_err();
        match err {
            SimError::Allocation { what, len } => {
                assert_eq!(what, "lower bounds");
                assert_eq!(len, usize::MAX);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_messages() {
        let e = SimError::NonFiniteOutcome { index: 3 };
        assert_eq!(e.to_string(), "Non-finite outcome drawn for unit 3");
        let e = SimError::LengthMismatch { expected: 4, found: 2 };
        assert_eq!(e.to_string(), "Buffer length mismatch: expected 4, found 2");
    }
}
