//! # Constants and type definitions for satprop
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `satprop` library, together with the injectable
//! [`GravityModel`] configuration consumed by the force model and the coordinate transforms.
//!
//! ## Overview
//!
//! - Gravitational parameters of the Earth, Moon and Sun
//! - Unit conversions (AU ↔ meters, seconds ↔ days ↔ Julian centuries)
//! - Core type aliases used across the crate
//! - [`GravityModel`]: the immutable constants bundle passed explicitly to the
//!   force model and the transforms, so alternate primaries can be tested
//!   without recompiling
//!
//! Epochs throughout the crate are expressed in **seconds since J2000.0**.

use serde::{Deserialize, Serialize};

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in meters (IAU 2012)
pub const AU_TO_M: f64 = 149_597_870_700.0;

/// Gravitational parameter of the Earth, m³/s² (EGM2008)
pub const EARTH_MU: f64 = 3.9860044188e14;

/// Gravitational parameter of the Moon, m³/s²
pub const MOON_MU: f64 = 4.90486959e12;

/// Gravitational parameter of the Sun, m³/s²
pub const SUN_MU: f64 = 1.327124400189e20;

/// Earth equatorial radius in meters (WGS84)
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378_137.0;

/// Second zonal harmonic of the Earth's geopotential (unnormalized)
pub const EARTH_J2: f64 = 1.08262668e-3;

/// Moon-to-Earth mass ratio, used to place the Moon from the Earth-Moon barycenter
pub const MOON_EARTH_MASS_RATIO: f64 = 0.01230073677;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Time span or epoch offset in seconds (epochs are seconds since J2000.0)
pub type Seconds = f64;
/// Distance in meters
pub type Meter = f64;
/// Angle in radians
pub type Radian = f64;
/// Epoch expressed in Julian centuries since J2000.0 (ephemeris query unit)
pub type JulianCenturies = f64;

/// Convert an epoch in seconds since J2000.0 to Julian centuries since J2000.0.
pub fn julian_centuries(epoch: Seconds) -> JulianCenturies {
    epoch / SECONDS_PER_DAY / DAYS_PER_JULIAN_CENTURY
}

// -------------------------------------------------------------------------------------------------
// Injectable constants bundle
// -------------------------------------------------------------------------------------------------

/// Gravitational environment of the propagation.
///
/// Units
/// -----
/// * `mu`, `mu_sun`, `mu_moon`: m³/s²
/// * `au_to_m`: meters per astronomical unit
/// * `equatorial_radius`: meters
/// * `j2`: unitless
///
/// The default is the Earth-centered model. The struct is plain data so a
/// scenario file can deserialize an alternate primary for testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityModel {
    /// Gravitational parameter of the primary body
    pub mu: f64,
    /// Gravitational parameter of the Sun (third-body perturbation)
    pub mu_sun: f64,
    /// Gravitational parameter of the Moon (third-body perturbation)
    pub mu_moon: f64,
    /// Astronomical-unit-to-meter conversion used for ephemeris positions
    pub au_to_m: f64,
    /// Equatorial radius of the primary (oblateness term)
    pub equatorial_radius: f64,
    /// Second zonal harmonic of the primary (oblateness term)
    pub j2: f64,
}

impl Default for GravityModel {
    fn default() -> Self {
        GravityModel {
            mu: EARTH_MU,
            mu_sun: SUN_MU,
            mu_moon: MOON_MU,
            au_to_m: AU_TO_M,
            equatorial_radius: EARTH_EQUATORIAL_RADIUS,
            j2: EARTH_J2,
        }
    }
}
