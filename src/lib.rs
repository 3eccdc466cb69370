//! # satprop
//!
//! Satellite trajectory propagation: numerical integration of the equations
//! of motion under two-body gravity with optional Sun/Moon and oblateness
//! perturbations, plus the conversions between Keplerian elements and
//! Cartesian states.
//!
//! ## Overview
//!
//! - [`kepler`] — Kepler ↔ Cartesian coordinate transforms
//! - [`ephemeris`] — narrow query interface to an external ephemeris
//! - [`force`] — perturbed two-body acceleration model
//! - [`propagator`] — fixed-step RK4 session with cadence sampling
//! - [`state`] — Cartesian state and the compile-time sample-record variants
//! - [`output`] — state and osculating-elements table writers
//! - [`constants`] — physical constants and the injectable [`GravityModel`]
//!
//! ## Example
//!
//! ```rust
//! use satprop::{
//!     ForceModel, GravityModel, KeplerElements, PerturbationConfig, Propagator,
//!     TimedStateRecord,
//! };
//! use satprop::ephemeris::{Ephemeris, EphemerisSample};
//! use nalgebra::Vector3;
//!
//! struct StaticEphemeris;
//! impl Ephemeris for StaticEphemeris {
//!     fn query(&self, _epoch: f64) -> EphemerisSample {
//!         EphemerisSample::from_earth_and_barycenter(
//!             Vector3::new(1.0, 0.0, 0.0),
//!             Vector3::new(1.0, 3.1e-5, 0.0),
//!         )
//!     }
//! }
//!
//! let gravity = GravityModel::default();
//! let elements = KeplerElements::new(7.0e6, 0.01, 0.4, 0.4, 0.2, 0.3).unwrap();
//! let force = ForceModel::new(gravity, PerturbationConfig::two_body(), StaticEphemeris);
//! let mut session = Propagator::new(force, 0.0, elements.to_cartesian(gravity.mu));
//!
//! let records: Vec<TimedStateRecord> = session.propagate(1000.0, 1.0, 10.0).unwrap();
//! assert_eq!(records.len(), 100);
//! ```

pub mod constants;
pub mod ephemeris;
pub mod errors;
pub mod force;
pub mod kepler;
pub mod output;
pub mod propagator;
pub mod state;

pub use constants::GravityModel;
pub use errors::OrbitError;
pub use force::{ForceModel, PerturbationConfig};
pub use kepler::KeplerElements;
pub use propagator::Propagator;
pub use state::{
    FullStateRecord, PositionRecord, SampleRecord, StateRecord, StateVector, TimedPositionRecord,
    TimedStateRecord,
};
