use thiserror::Error;

/// Errors surfaced at the crate's validation and I/O boundaries.
///
/// The numerical core keeps the permissive philosophy of the underlying
/// algorithms: a transform fed out-of-domain values produces non-finite
/// numbers rather than an error. Validation happens where callers opt into
/// it ([`crate::kepler::KeplerElements::new`], the `propagate` argument
/// checks) and when writing result tables.
#[derive(Error, Debug)]
pub enum OrbitError {
    #[error("Eccentricity out of supported range [0, 1): {0}")]
    InvalidEccentricity(f64),

    #[error("Semi-major axis must be positive for an elliptical orbit: {0}")]
    InvalidSemiMajorAxis(f64),

    #[error("Non-finite orbital element: {0}")]
    NonFiniteElement(&'static str),

    #[error("Propagation step size must be positive: {0}")]
    InvalidStepSize(f64),

    #[error("Sampling interval must be positive: {0}")]
    InvalidSampleInterval(f64),

    #[error("Propagation duration must be finite and non-negative: {0}")]
    InvalidDuration(f64),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}
