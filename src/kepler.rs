//! # Keplerian orbital elements and Cartesian transforms
//!
//! This module defines the [`KeplerElements`] value type and the conversions
//! between the geometric orbit description and the Cartesian state used by
//! the integrator:
//!
//! - [`KeplerElements::from_cartesian`] — position/velocity → elements
//! - [`KeplerElements::to_cartesian`] / [`KeplerElements::to_position`] —
//!   elements → Cartesian state (elliptical closed form)
//! - [`KeplerElements::circular_from_position`] — near-circular solver that
//!   recovers elements from position alone, given `a` and `i`
//!
//! ## Units
//!
//! - `semi_major_axis`: meters
//! - `eccentricity`: unitless, supported range `[0, 1)` (elliptical only)
//! - angles: radians, normalized to `[0, 2π)`
//!
//! ## Degeneracies
//!
//! Classical elements are singular for equatorial (`sin i = 0`) and circular
//! (`e ≈ 0`) orbits: the ascending node and the periapsis argument lose
//! meaning there. Following the permissive numeric philosophy of the core,
//! [`KeplerElements::from_cartesian`] does **not** guard these regimes; it
//! returns non-finite or imprecise angles and callers validate the input
//! domain first. [`KeplerElements::new`] is the opt-in validating
//! constructor for elements coming from untrusted input.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{DPI, Meter, Radian};
use crate::errors::OrbitError;
use crate::state::StateVector;

/// Principal value of an angle in radians, reduced to `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Classical Keplerian orbital elements (osculating, elliptical).
///
/// Units
/// -----
/// * `semi_major_axis`: meters (> 0)
/// * `eccentricity`: unitless, `[0, 1)`
/// * `inclination`: radians, `[0, π]`
/// * `ascending_node_longitude`: radians (Ω), undefined for `sin i = 0`
/// * `periapsis_argument`: radians (ω), undefined for `e = 0`
/// * `true_anomaly`: radians (ν), wraps mod 2π
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerElements {
    pub semi_major_axis: Meter,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub true_anomaly: Radian,
}

impl KeplerElements {
    /// Validating constructor for elements from untrusted input.
    ///
    /// Arguments
    /// ---------
    /// * `semi_major_axis`: meters, must be positive and finite
    /// * `eccentricity`: must lie in `[0, 1)` (parabolic/hyperbolic orbits
    ///   are unsupported)
    /// * angles: radians, must be finite; normalized to `[0, 2π)`
    ///
    /// Return
    /// ------
    /// * The validated element set, or the first violated precondition.
    pub fn new(
        semi_major_axis: Meter,
        eccentricity: f64,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
        true_anomaly: Radian,
    ) -> Result<Self, OrbitError> {
        if !semi_major_axis.is_finite() || semi_major_axis <= 0.0 {
            return Err(OrbitError::InvalidSemiMajorAxis(semi_major_axis));
        }
        if !eccentricity.is_finite() || !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitError::InvalidEccentricity(eccentricity));
        }
        for (value, name) in [
            (inclination, "inclination"),
            (ascending_node_longitude, "ascending_node_longitude"),
            (periapsis_argument, "periapsis_argument"),
            (true_anomaly, "true_anomaly"),
        ] {
            if !value.is_finite() {
                return Err(OrbitError::NonFiniteElement(name));
            }
        }

        Ok(KeplerElements {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude: principal_angle(ascending_node_longitude),
            periapsis_argument: principal_angle(periapsis_argument),
            true_anomaly: principal_angle(true_anomaly),
        })
    }

    /// Osculating elements of a velocity-bearing Cartesian state.
    ///
    /// Arguments
    /// ---------
    /// * `state`: position (m) and velocity (m/s) in the inertial frame
    /// * `mu`: gravitational parameter of the primary (m³/s²)
    ///
    /// Return
    /// ------
    /// * The instantaneous Keplerian elements. For equatorial (`sin i = 0`)
    ///   or circular (`e ≈ 0`) states the node and periapsis angles are
    ///   singular and come back non-finite or meaningless; no error is
    ///   signaled.
    pub fn from_cartesian(state: &StateVector, mu: f64) -> Self {
        let h_vec = state.specific_angular_momentum();
        let h2 = h_vec.norm_squared();
        let h = h2.sqrt();

        let r = state.position.norm();
        let v2 = state.velocity.norm_squared();

        let energy = v2 / 2.0 - mu / r;
        let a = -mu / (2.0 * energy);
        let e = (1.0 - h2 / (a * mu)).sqrt();

        let inc = (h_vec.z / h).acos();
        let raan = h_vec.x.atan2(-h_vec.y);

        let p = a * (1.0 - e * e);
        let radial = state.velocity.dot(&state.position);
        let true_anom = ((p / mu).sqrt() * radial).atan2(p - r);

        // Argument of latitude u = ω + ν, decomposed along the node line
        let arg_lat = (state.position.z / inc.sin())
            .atan2(state.position.x * raan.cos() + state.position.y * raan.sin());
        let arg_per = arg_lat - true_anom;

        KeplerElements {
            semi_major_axis: a,
            eccentricity: e,
            inclination: inc,
            ascending_node_longitude: principal_angle(raan),
            periapsis_argument: principal_angle(arg_per),
            true_anomaly: principal_angle(true_anom),
        }
    }

    /// Cartesian position and velocity of the element set.
    ///
    /// Elliptical closed form, supported for `0 ≤ e < 1` only; other inputs
    /// produce meaningless numbers.
    ///
    /// Arguments
    /// ---------
    /// * `mu`: gravitational parameter of the primary (m³/s²)
    pub fn to_cartesian(&self, mu: f64) -> StateVector {
        let p = self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity);
        let r = p / (1.0 + self.eccentricity * self.true_anomaly.cos());

        let (sin_node, cos_node) = self.ascending_node_longitude.sin_cos();
        let (sin_u, cos_u) = (self.periapsis_argument + self.true_anomaly).sin_cos();
        let (sin_inc, cos_inc) = self.inclination.sin_cos();

        let position = r * Vector3::new(
            cos_node * cos_u - sin_node * sin_u * cos_inc,
            sin_node * cos_u + cos_node * sin_u * cos_inc,
            sin_inc * sin_u,
        );

        let h = (mu * p).sqrt();
        let radial_rate = h * self.eccentricity / (r * p) * self.true_anomaly.sin();
        let velocity = Vector3::new(
            position.x * radial_rate
                - h / r * (cos_node * sin_u + sin_node * cos_u * cos_inc),
            position.y * radial_rate
                - h / r * (sin_node * sin_u - cos_node * cos_u * cos_inc),
            position.z * radial_rate + h / r * sin_inc * cos_u,
        );

        StateVector::new(position, velocity)
    }

    /// Position-only variant of [`KeplerElements::to_cartesian`], skipping
    /// the velocity closed form.
    pub fn to_position(&self) -> Vector3<f64> {
        let p = self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity);
        let r = p / (1.0 + self.eccentricity * self.true_anomaly.cos());

        let (sin_node, cos_node) = self.ascending_node_longitude.sin_cos();
        let (sin_u, cos_u) = (self.periapsis_argument + self.true_anomaly).sin_cos();
        let (sin_inc, cos_inc) = self.inclination.sin_cos();

        r * Vector3::new(
            cos_node * cos_u - sin_node * sin_u * cos_inc,
            sin_node * cos_u + cos_node * sin_u * cos_inc,
            sin_inc * sin_u,
        )
    }

    /// Elements of a circular orbit through `position`, given the known
    /// semi-major axis and inclination — no velocity needed.
    ///
    /// The angular-momentum vector is derived from perpendicularity to the
    /// position together with its known magnitude `sqrt(aμ)` and z-component
    /// `sqrt(aμ)·cos(i)`. The in-plane components solve a quadratic with two
    /// roots (the two great circles of inclination `i` through the
    /// position); the **positive root** is selected, fixed by convention.
    /// With no velocity available the prograde/retrograde ambiguity between
    /// the roots cannot be resolved here; callers needing a specific branch
    /// must check against a velocity-consistent reference.
    ///
    /// Circular degeneracy convention: `periapsis_argument = 0` and
    /// `true_anomaly` carries the argument of latitude.
    ///
    /// Preconditions (not enforced): `|position| = a`, the position latitude
    /// does not exceed the inclination, and the position is not on the polar
    /// axis.
    pub fn circular_from_position(
        position: &Vector3<f64>,
        semi_major_axis: Meter,
        inclination: Radian,
        mu: f64,
    ) -> Self {
        let h = (semi_major_axis * mu).sqrt();
        let (sin_inc, cos_inc) = inclination.sin_cos();
        let h_z = h * cos_inc;
        let s = h * sin_inc;

        // p·h = 0 constrains (h_x, h_y) to a line; |.(h_x, h_y)| = s to a circle
        let planar = position.x * position.x + position.y * position.y;
        let c = -position.z * h_z;
        // Clamped: FP noise can push the discriminant barely negative when
        // the position latitude equals the inclination
        let w = (s * s * planar - c * c).max(0.0).sqrt();

        let h_x = (c * position.x - position.y * w) / planar;
        let h_y = (c * position.y + position.x * w) / planar;

        let raan = h_x.atan2(-h_y);
        let arg_lat = (position.z / sin_inc)
            .atan2(position.x * raan.cos() + position.y * raan.sin());

        KeplerElements {
            semi_major_axis,
            eccentricity: 0.0,
            inclination,
            ascending_node_longitude: principal_angle(raan),
            periapsis_argument: 0.0,
            true_anomaly: principal_angle(arg_lat),
        }
    }
}
