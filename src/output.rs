//! # Result table output
//!
//! Append-mode writers turning sequences of sample records into the two
//! textual table formats consumed downstream:
//!
//! - **State table** ([`append_state_table`]): optional leading epoch,
//!   position (3 columns), optional velocity (3 columns) — which columns
//!   appear follows the record variant, space-separated, one record per
//!   line.
//! - **Osculating-elements table** ([`append_osculating_table`]): optional
//!   leading epoch followed by the six instantaneous Kepler elements
//!   recomputed from the sampled Cartesian state, in the order
//!   `a e inc raan arg_per true_anom`.
//!
//! Units: epoch in seconds since J2000.0, position in meters, velocity in
//! m/s, semi-major axis in meters, angles in radians.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::OrbitError;
use crate::kepler::KeplerElements;
use crate::state::{FullStateRecord, SampleRecord};

fn append_writer(path: &Path) -> Result<BufWriter<std::fs::File>, OrbitError> {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    Ok(BufWriter::new(file))
}

/// Append one state-table line per record to `path`, creating the file if
/// needed.
pub fn append_state_table<R: SampleRecord>(
    records: &[R],
    path: impl AsRef<Path>,
) -> Result<(), OrbitError> {
    let mut out = append_writer(path.as_ref())?;

    for record in records {
        if let Some(epoch) = record.epoch() {
            write!(out, "{epoch} ")?;
        }
        let p = record.position();
        write!(out, "{} {} {}", p.x, p.y, p.z)?;
        if let Some(v) = record.velocity() {
            write!(out, " {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

/// Append one osculating-elements line per record to `path`, recomputing the
/// instantaneous Kepler elements from each sampled state.
///
/// Only velocity-bearing record variants can serve as input; the element
/// recovery needs the full state.
pub fn append_osculating_table<R: FullStateRecord>(
    records: &[R],
    mu: f64,
    path: impl AsRef<Path>,
) -> Result<(), OrbitError> {
    let mut out = append_writer(path.as_ref())?;

    for record in records {
        if let Some(epoch) = record.epoch() {
            write!(out, "{epoch} ")?;
        }
        let osc = KeplerElements::from_cartesian(&record.state_vector(), mu);
        writeln!(
            out,
            "{} {} {} {} {} {}",
            osc.semi_major_axis,
            osc.eccentricity,
            osc.inclination,
            osc.ascending_node_longitude,
            osc.periapsis_argument,
            osc.true_anomaly
        )?;
    }

    out.flush()?;
    Ok(())
}

/// Truncate `path` to empty, creating it if needed.
pub fn clear_file(path: impl AsRef<Path>) -> Result<(), OrbitError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path.as_ref())?;
    Ok(())
}
