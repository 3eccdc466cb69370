use approx::assert_relative_eq;
use nalgebra::Vector3;
use satprop::ephemeris::{Ephemeris, EphemerisSample};
use satprop::KeplerElements;

/// Deterministic Sun/Moon geometry for perturbation tests: Earth near 1 AU
/// in the ecliptic plane, Moon displaced ~384 000 km along +x. Every query
/// returns the same sample, so runs are exactly reproducible.
pub struct FixtureEphemeris;

impl Ephemeris for FixtureEphemeris {
    fn query(&self, _epoch: f64) -> EphemerisSample {
        let earth = Vector3::new(0.98, 0.17, 0.0);
        let emb = earth + Vector3::new(3.09e-5, 0.0, 1.0e-6);
        EphemerisSample::from_earth_and_barycenter(earth, emb)
    }
}

#[allow(dead_code)]
pub fn assert_elements_close(actual: &KeplerElements, expected: &KeplerElements, epsilon: f64) {
    assert_relative_eq!(
        actual.semi_major_axis,
        expected.semi_major_axis,
        max_relative = epsilon
    );
    assert_relative_eq!(
        actual.eccentricity,
        expected.eccentricity,
        max_relative = epsilon,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.inclination,
        expected.inclination,
        max_relative = epsilon
    );
    assert_relative_eq!(
        actual.ascending_node_longitude,
        expected.ascending_node_longitude,
        max_relative = epsilon
    );
    assert_relative_eq!(
        actual.periapsis_argument,
        expected.periapsis_argument,
        max_relative = epsilon,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.true_anomaly,
        expected.true_anomaly,
        max_relative = epsilon,
        epsilon = epsilon
    );
}
