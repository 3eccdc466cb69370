//! # Cartesian state and sample records
//!
//! This module defines [`StateVector`], the velocity-bearing Cartesian state
//! the integrator advances, and the four **sample record** variants emitted
//! by [`crate::propagator::Propagator::propagate`]:
//!
//! - [`PositionRecord`] — position only
//! - [`StateRecord`] — position and velocity
//! - [`TimedPositionRecord`] — epoch and position
//! - [`TimedStateRecord`] — epoch, position and velocity
//!
//! The variant is a **compile-time choice**: the caller picks a record type
//! and `propagate` monomorphizes over it, so the hot loop carries no runtime
//! shape flag. Velocity-bearing records additionally implement
//! [`FullStateRecord`], which the osculating-elements writer requires to
//! recompute Kepler elements from a sample.
//!
//! ## Units
//!
//! - Position: meters
//! - Velocity: meters per second
//! - Epoch: seconds since J2000.0

use nalgebra::Vector3;

use crate::constants::Seconds;

/// Position and velocity of the propagated body in the Earth-centered
/// inertial frame.
///
/// This is the full state the equations of motion act on: wherever a
/// derivative must be computed, a `StateVector` (not a bare position) is
/// required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    /// Position in meters
    pub position: Vector3<f64>,
    /// Velocity in meters per second
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    /// `self + slope * h`, componentwise over both channels.
    ///
    /// Used by the RK4 stages, where the slope is itself a `StateVector`
    /// with `position := velocity` and `velocity := acceleration`.
    pub(crate) fn advanced(&self, slope: &StateVector, h: f64) -> StateVector {
        StateVector {
            position: self.position + slope.position * h,
            velocity: self.velocity + slope.velocity * h,
        }
    }

    /// True when every component of position and velocity is finite.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|x| x.is_finite()) && self.velocity.iter().all(|x| x.is_finite())
    }

    /// Specific mechanical energy `|v|²/2 − μ/|r|` (m²/s²).
    pub fn specific_energy(&self, mu: f64) -> f64 {
        self.velocity.norm_squared() / 2.0 - mu / self.position.norm()
    }

    /// Specific angular momentum `r × v` (m²/s).
    pub fn specific_angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }
}

/// A record captured at a sampling instant.
///
/// Implementors decide which channels of the propagated state they retain.
/// `capture` is called once per emitted sample with the post-step state and
/// the matching epoch.
pub trait SampleRecord {
    fn capture(state: &StateVector, epoch: Seconds) -> Self;

    /// Epoch column, when the variant carries one.
    fn epoch(&self) -> Option<Seconds> {
        None
    }

    /// Position of the sample.
    fn position(&self) -> &Vector3<f64>;

    /// Velocity columns, when the variant carries them.
    fn velocity(&self) -> Option<&Vector3<f64>> {
        None
    }
}

/// A sample record that retains the full velocity-bearing state, so the
/// instantaneous (osculating) orbital elements can be recomputed from it.
pub trait FullStateRecord: SampleRecord {
    fn state_vector(&self) -> StateVector;
}

/// Position-only sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRecord {
    pub position: Vector3<f64>,
}

impl SampleRecord for PositionRecord {
    fn capture(state: &StateVector, _epoch: Seconds) -> Self {
        PositionRecord {
            position: state.position,
        }
    }

    fn position(&self) -> &Vector3<f64> {
        &self.position
    }
}

/// Position and velocity sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateRecord {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl SampleRecord for StateRecord {
    fn capture(state: &StateVector, _epoch: Seconds) -> Self {
        StateRecord {
            position: state.position,
            velocity: state.velocity,
        }
    }

    fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    fn velocity(&self) -> Option<&Vector3<f64>> {
        Some(&self.velocity)
    }
}

impl FullStateRecord for StateRecord {
    fn state_vector(&self) -> StateVector {
        StateVector::new(self.position, self.velocity)
    }
}

/// Epoch and position sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedPositionRecord {
    /// Seconds since J2000.0
    pub epoch: Seconds,
    pub position: Vector3<f64>,
}

impl SampleRecord for TimedPositionRecord {
    fn capture(state: &StateVector, epoch: Seconds) -> Self {
        TimedPositionRecord {
            epoch,
            position: state.position,
        }
    }

    fn epoch(&self) -> Option<Seconds> {
        Some(self.epoch)
    }

    fn position(&self) -> &Vector3<f64> {
        &self.position
    }
}

/// Epoch, position and velocity sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedStateRecord {
    /// Seconds since J2000.0
    pub epoch: Seconds,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl SampleRecord for TimedStateRecord {
    fn capture(state: &StateVector, epoch: Seconds) -> Self {
        TimedStateRecord {
            epoch,
            position: state.position,
            velocity: state.velocity,
        }
    }

    fn epoch(&self) -> Option<Seconds> {
        Some(self.epoch)
    }

    fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    fn velocity(&self) -> Option<&Vector3<f64>> {
        Some(&self.velocity)
    }
}

impl FullStateRecord for TimedStateRecord {
    fn state_vector(&self) -> StateVector {
        StateVector::new(self.position, self.velocity)
    }
}

#[cfg(test)]
mod state_test {
    use super::*;

    fn sample_state() -> StateVector {
        StateVector::new(
            Vector3::new(7.0e6, 0.0, 0.0),
            Vector3::new(0.0, 7.5e3, 0.0),
        )
    }

    #[test]
    fn test_advanced() {
        let state = sample_state();
        let slope = StateVector::new(state.velocity, Vector3::new(-8.0, 0.0, 0.0));
        let next = state.advanced(&slope, 2.0);

        assert_eq!(next.position, Vector3::new(7.0e6, 1.5e4, 0.0));
        assert_eq!(next.velocity, Vector3::new(-16.0, 7.5e3, 0.0));
    }

    #[test]
    fn test_capture_variants() {
        let state = sample_state();

        let p = PositionRecord::capture(&state, 12.0);
        assert_eq!(p.position, state.position);
        assert_eq!(p.epoch(), None);
        assert!(p.velocity().is_none());

        let s = StateRecord::capture(&state, 12.0);
        assert_eq!(s.velocity, state.velocity);
        assert_eq!(s.state_vector(), state);

        let tp = TimedPositionRecord::capture(&state, 12.0);
        assert_eq!(tp.epoch(), Some(12.0));
        assert!(tp.velocity().is_none());

        let ts = TimedStateRecord::capture(&state, 12.0);
        assert_eq!(ts.epoch(), Some(12.0));
        assert_eq!(ts.velocity(), Some(&state.velocity));
        assert_eq!(ts.state_vector(), state);
    }

    #[test]
    fn test_is_finite() {
        let mut state = sample_state();
        assert!(state.is_finite());
        state.velocity.y = f64::NAN;
        assert!(!state.is_finite());
    }

    #[test]
    fn test_energy_and_momentum() {
        let state = sample_state();
        let mu = 3.9860044188e14;

        let energy = state.specific_energy(mu);
        assert_eq!(energy, 7.5e3 * 7.5e3 / 2.0 - mu / 7.0e6);

        let h = state.specific_angular_momentum();
        assert_eq!(h, Vector3::new(0.0, 0.0, 7.0e6 * 7.5e3));
    }
}
