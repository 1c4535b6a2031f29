// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! HF skywave propagation geometry in normalised scene units.
//!
//! This is the hop model behind the propagation demo: a transmitted ray
//! either penetrates the ionospheric shell (when the frequency exceeds the
//! maximum usable frequency for its takeoff angle) or bounces between the
//! shell and the ground, losing half its intensity per ground contact.
//! Distances are scene units with the earth radius fixed at 50, not km;
//! the MUF relation itself is unit free.

#[cfg(test)]
mod tests;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Earth radius in scene units. Every other distance is relative to this.
pub const EARTH_RADIUS: f64 = 50.0;

/// Critical frequency foF2 \[MHz\]: the highest frequency reflected at
/// vertical incidence.
pub const CRITICAL_FREQUENCY_FOF2: f64 = 7.0;

/// Ground-reflection limit of the hop tracer.
pub const MAX_HOPS: usize = 3;

/// Length of the ray drawn past the ionosphere when a signal penetrates.
const PENETRATION_RAY_LENGTH: f64 = 80.0;

/// Length of the ray drawn when a reflected signal misses the earth and
/// escapes along the shell.
const ESCAPE_RAY_LENGTH: f64 = 60.0;

/// Which service the traced signal belongs to. VHF and above never reflect
/// off the ionosphere in this model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Band {
    Hf,
    Vhf,
}

/// How a traced path ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// Went through the ionosphere and out.
    Penetrated,

    /// Reflected but never came back down inside the traced region.
    Escaped,

    /// Still bouncing when the hop limit was reached.
    HopLimit,
}

/// One ground contact of a hopping signal.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundBounce {
    pub position: Vector3<f64>,
    /// Halves with every hop: 0.5, 0.25, 0.125, ...
    pub intensity: f64,
}

/// A traced signal path: the polyline vertices plus the bounce events the
/// renderer turns into ground-wave ripples.
#[derive(Debug, Clone, PartialEq)]
pub struct SkywavePath {
    pub points: Vec<Vector3<f64>>,
    pub bounces: Vec<GroundBounce>,
    pub outcome: PathOutcome,
    pub muf: f64,
}

/// Maximum usable frequency \[MHz\] for a takeoff elevation (radians above
/// the horizon) and an ionosphere height (scene units above the ground).
///
/// The secant law applied to a spherical shell: the ray meets the layer at
/// incidence `asin((R/(R+h)) cos(elevation))`, and the MUF is the critical
/// frequency divided by the cosine of that incidence.
pub fn maximum_usable_frequency(elevation_rad: f64, iono_height: f64) -> f64 {
    let iono_r = EARTH_RADIUS + iono_height;
    let incidence = ((EARTH_RADIUS / iono_r) * elevation_rad.cos()).asin();
    CRITICAL_FREQUENCY_FOF2 / incidence.cos()
}

/// Relative ground-wave strength for a frequency \[MHz\]. Linear roll-off;
/// nothing survives past 37.5 MHz.
pub fn ground_wave_strength(frequency_mhz: f64) -> f64 {
    (15.0 - frequency_mhz * 0.4).max(0.0)
}

/// First intersection of a ray with a sphere, ignoring hits closer than a
/// small epsilon so a ray starting on the sphere doesn't immediately
/// re-intersect it.
pub(crate) fn intersect_sphere(
    origin: Vector3<f64>,
    dir: Vector3<f64>,
    center: Vector3<f64>,
    radius: f64,
) -> Option<Vector3<f64>> {
    let l = center - origin;
    let tca = l.dot(&dir);
    let d2 = l.dot(&l) - tca * tca;
    let r2 = radius * radius;
    if d2 > r2 {
        return None;
    }
    let thc = (r2 - d2).sqrt();
    let t1 = tca - thc;
    let t2 = tca + thc;
    if t1 > 0.001 {
        return Some(origin + dir * t1);
    }
    if t2 > 0.001 {
        return Some(origin + dir * t2);
    }
    None
}

/// Mirror `v` about the plane with unit normal `n`.
fn reflect(v: Vector3<f64>, n: Vector3<f64>) -> Vector3<f64> {
    v - n * (2.0 * v.dot(&n))
}

/// Trace a signal launched from the top of the earth sphere at
/// `elevation_rad` above the horizon.
///
/// HF below the MUF bounces between the ionospheric shell and the ground
/// (at most [`MAX_HOPS`] ground contacts); anything else punches through.
pub fn trace_signal_path(
    band: Band,
    elevation_rad: f64,
    frequency_mhz: f64,
    iono_height: f64,
) -> SkywavePath {
    let iono_r = EARTH_RADIUS + iono_height;
    let muf = maximum_usable_frequency(elevation_rad, iono_height);
    let penetrates = match band {
        Band::Vhf => true,
        Band::Hf => frequency_mhz > muf,
    };

    let mut position = Vector3::new(0.0, EARTH_RADIUS, 0.0);
    let mut direction = Vector3::new(elevation_rad.cos(), elevation_rad.sin(), 0.0).normalize();

    let mut points = vec![position];
    let mut bounces = Vec::new();

    if penetrates {
        match intersect_sphere(position, direction, Vector3::zeros(), iono_r) {
            Some(hit) => {
                points.push(hit);
                points.push(hit + direction * PENETRATION_RAY_LENGTH);
            }
            None => points.push(position + direction * PENETRATION_RAY_LENGTH),
        }
        return SkywavePath {
            points,
            bounces,
            outcome: PathOutcome::Penetrated,
            muf,
        };
    }

    let mut outcome = PathOutcome::HopLimit;
    let mut hops = 0;
    while hops < MAX_HOPS {
        let Some(iono_hit) = intersect_sphere(position, direction, Vector3::zeros(), iono_r)
        else {
            outcome = PathOutcome::Escaped;
            break;
        };
        points.push(iono_hit);

        // Reflect off the underside of the shell.
        direction = reflect(direction, -iono_hit.normalize());

        match intersect_sphere(iono_hit, direction, Vector3::zeros(), EARTH_RADIUS) {
            Some(earth_hit) => {
                points.push(earth_hit);
                position = earth_hit;

                bounces.push(GroundBounce {
                    position: earth_hit,
                    intensity: 0.5_f64.powi(hops as i32 + 1),
                });

                direction = reflect(direction, earth_hit.normalize());
                hops += 1;
            }
            None => {
                points.push(iono_hit + direction * ESCAPE_RAY_LENGTH);
                outcome = PathOutcome::Escaped;
                break;
            }
        }
    }

    SkywavePath {
        points,
        bounces,
        outcome,
        muf,
    }
}
