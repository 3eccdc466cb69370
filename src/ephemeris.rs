//! # Ephemeris query interface
//!
//! The force model consumes heliocentric Sun/Moon geometry through the
//! narrow [`Ephemeris`] trait; the series evaluator behind it (VSOP87-class
//! analytic theory, JPL file, …) lives outside this crate. Implementations
//! are expected to be **stateless, deterministic and idempotent**: the same
//! epoch always yields the same sample.
//!
//! Positions are **heliocentric, in astronomical units**, in a consistent
//! frame across calls. Validity is bounded by the provider's supported time
//! span; queries outside it are not detected here and propagate whatever the
//! provider returns.

use nalgebra::Vector3;

use crate::constants::{JulianCenturies, MOON_EARTH_MASS_RATIO};

/// Heliocentric geometry returned by one ephemeris query, in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisSample {
    /// Earth position
    pub earth: Vector3<f64>,
    /// Earth-Moon barycenter position
    pub earth_moon_barycenter: Vector3<f64>,
    /// Moon position
    pub moon: Vector3<f64>,
}

impl EphemerisSample {
    /// Build a sample from Earth and Earth-Moon-barycenter positions alone,
    /// placing the Moon on the Earth-barycenter line from the known mass
    /// ratio.
    pub fn from_earth_and_barycenter(
        earth: Vector3<f64>,
        earth_moon_barycenter: Vector3<f64>,
    ) -> Self {
        let moon = moon_from_barycenter(&earth, &earth_moon_barycenter);
        EphemerisSample {
            earth,
            earth_moon_barycenter,
            moon,
        }
    }
}

/// Heliocentric Moon position derived from the Earth and the Earth-Moon
/// barycenter.
///
/// The barycenter divides the Earth-Moon segment by the mass ratio, so
/// `moon = earth + (emb − earth)·(1 + 1/ratio)`.
pub fn moon_from_barycenter(
    earth: &Vector3<f64>,
    earth_moon_barycenter: &Vector3<f64>,
) -> Vector3<f64> {
    earth + (earth_moon_barycenter - earth) * (1.0 + 1.0 / MOON_EARTH_MASS_RATIO)
}

/// Provider of heliocentric Sun/Moon geometry for the third-body
/// perturbation.
///
/// `epoch` is in Julian centuries since J2000.0; see
/// [`crate::constants::julian_centuries`] for the conversion from the
/// crate's second-based epochs.
pub trait Ephemeris {
    fn query(&self, epoch: JulianCenturies) -> EphemerisSample;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn query(&self, epoch: JulianCenturies) -> EphemerisSample {
        (**self).query(epoch)
    }
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moon_from_barycenter() {
        let earth = Vector3::new(1.0, 0.0, 0.0);
        // Barycenter displaced along +y from the Earth
        let emb = Vector3::new(1.0, 3.0e-6, 0.0);

        let moon = moon_from_barycenter(&earth, &emb);

        // Moon sits on the same side, (1 + 1/ratio) times further out
        let expected_offset = 3.0e-6 * (1.0 + 1.0 / MOON_EARTH_MASS_RATIO);
        assert_eq!(moon.x, 1.0);
        assert_eq!(moon.z, 0.0);
        assert_relative_eq!(moon.y, expected_offset, max_relative = 1e-15);

        // The barycenter is recovered from the two bodies and the mass ratio
        let check = (earth + moon * MOON_EARTH_MASS_RATIO) / (1.0 + MOON_EARTH_MASS_RATIO);
        assert_relative_eq!(check.y, emb.y, max_relative = 1e-12);
    }

    #[test]
    fn test_sample_constructor() {
        let earth = Vector3::new(0.98, 0.17, 0.0);
        let emb = earth + Vector3::new(0.0, 0.0, 2.0e-6);
        let sample = EphemerisSample::from_earth_and_barycenter(earth, emb);

        assert_eq!(sample.earth, earth);
        assert_eq!(sample.earth_moon_barycenter, emb);
        assert_eq!(sample.moon, moon_from_barycenter(&earth, &emb));
    }
}
