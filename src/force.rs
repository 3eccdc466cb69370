//! # Force model
//!
//! Acceleration of the propagated body as the sum of:
//!
//! - the **two-body term** `−μ·r/|r|³`, always active;
//! - the **third-body perturbation** of the Sun and Moon (toggle-gated):
//!   direct inverse-square pull on the satellite plus the indirect/tidal
//!   term removing their pull on the Earth itself, since the integration
//!   frame is Earth-centered and therefore non-inertial with respect to
//!   those bodies;
//! - the **oblateness (J2) term** of the primary (toggle-gated).
//!
//! ## Perturbation cache
//!
//! The third-body term is the only epoch-dependent part and the only one
//! that costs an ephemeris query. Evaluations without epoch context
//! (`refresh_epoch_terms = false`, used by the third RK4 stage) reuse the
//! last computed perturbation vector unchanged. This is an intentional
//! approximation trading a little perturbation accuracy for one fewer
//! ephemeris lookup per step, not an error.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{julian_centuries, GravityModel, Seconds};
use crate::ephemeris::Ephemeris;

/// Independent toggles for the two optional perturbation terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerturbationConfig {
    /// Sun/Moon third-body gravity from the ephemeris provider
    pub third_body: bool,
    /// J2 oblateness correction of the primary
    pub oblateness: bool,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        PerturbationConfig {
            third_body: true,
            oblateness: true,
        }
    }
}

impl PerturbationConfig {
    /// Pure two-body dynamics, both perturbations off.
    pub fn two_body() -> Self {
        PerturbationConfig {
            third_body: false,
            oblateness: false,
        }
    }
}

/// Acceleration model for the propagated body.
///
/// Pure given the ephemeris provider's determinism, except for the
/// third-body cache described in the module documentation.
#[derive(Debug, Clone)]
pub struct ForceModel<E> {
    gravity: GravityModel,
    /// Perturbation toggles; mutable between steps, read in the hot loop
    pub config: PerturbationConfig,
    ephemeris: E,
    third_body_cache: Vector3<f64>,
}

impl<E: Ephemeris> ForceModel<E> {
    pub fn new(gravity: GravityModel, config: PerturbationConfig, ephemeris: E) -> Self {
        ForceModel {
            gravity,
            config,
            ephemeris,
            third_body_cache: Vector3::zeros(),
        }
    }

    pub fn gravity(&self) -> &GravityModel {
        &self.gravity
    }

    /// Acceleration at `position` (m) and `epoch` (s since J2000.0), in m/s².
    ///
    /// Arguments
    /// ---------
    /// * `refresh_epoch_terms`: when false, the epoch-dependent third-body
    ///   vector is not recomputed and the cached value from the previous
    ///   refreshing evaluation is reused.
    pub fn acceleration(
        &mut self,
        position: &Vector3<f64>,
        epoch: Seconds,
        refresh_epoch_terms: bool,
    ) -> Vector3<f64> {
        let r = position.norm();
        let r3 = r * r * r;
        let mut accel = -self.gravity.mu * position / r3;

        if self.config.third_body {
            if refresh_epoch_terms {
                self.third_body_cache = self.third_body_acceleration(position, epoch);
            }
            accel += self.third_body_cache;
        }

        if self.config.oblateness {
            accel += self.oblateness_acceleration(position, r);
        }

        accel
    }

    /// Direct Sun/Moon pull on the satellite minus their pull on the Earth.
    fn third_body_acceleration(&self, position: &Vector3<f64>, epoch: Seconds) -> Vector3<f64> {
        let sample = self.ephemeris.query(julian_centuries(epoch));

        // Heliocentric AU → geocentric meters
        let sun = -sample.earth * self.gravity.au_to_m;
        let moon = (sample.moon - sample.earth) * self.gravity.au_to_m;

        let sun_dist = sun.norm();
        let moon_dist = moon.norm();

        let sat_to_sun = sun - position;
        let sat_to_moon = moon - position;
        let sat_to_sun_dist = sat_to_sun.norm();
        let sat_to_moon_dist = sat_to_moon.norm();

        self.gravity.mu_moon * sat_to_moon / sat_to_moon_dist.powi(3)
            + self.gravity.mu_sun * sat_to_sun / sat_to_sun_dist.powi(3)
            - self.gravity.mu_moon * moon / moon_dist.powi(3)
            - self.gravity.mu_sun * sun / sun_dist.powi(3)
    }

    /// Full J2 zonal-harmonic acceleration of the primary.
    ///
    /// Latitude enters through `z/r` (the rotation axis is the frame's z
    /// axis; precession and nutation of the axis are not modeled).
    fn oblateness_acceleration(&self, position: &Vector3<f64>, r: f64) -> Vector3<f64> {
        let re = self.gravity.equatorial_radius;
        let z2_r2 = (position.z / r).powi(2);
        let k = -1.5 * self.gravity.j2 * self.gravity.mu * re * re / r.powi(5);

        Vector3::new(
            k * position.x * (1.0 - 5.0 * z2_r2),
            k * position.y * (1.0 - 5.0 * z2_r2),
            k * position.z * (3.0 - 5.0 * z2_r2),
        )
    }
}
