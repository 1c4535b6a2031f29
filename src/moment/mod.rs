// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Numerical integration of wire current distributions into far-field
//! magnitudes.
//!
//! Antenna types whose radiation pattern has no closed form (windom/OCFD
//! feed offsets, inverted-V droop, long-wire harmonics) get their pattern
//! from here: discretise the wire, sum each segment's complex current
//! moment with its phase delay towards the observer, then project the
//! accumulated vector onto the plane transverse to the observation
//! direction. Radiated fields have no component along the propagation
//! direction, so the projection is the physical step, not a cosmetic one.

#[cfg(test)]
mod tests;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    constants::{INVERTED_V_DROOP, PI, TAU, WINDOM_FEED_FRACTION},
    math::{c64, cexp},
};

/// Segment count for the bent-wire integrator. A precision/performance
/// trade-off calibrated for per-frame use, not a public tunable; error
/// shrinks monotonically as this grows.
const BENT_WIRE_SEGMENTS: usize = 40;

/// Step count for the straight-wire field integral.
const WIRE_FIELD_STEPS: usize = 200;

/// Normalisation divisor applied per segment. Calibrated so that a flat
/// half-wave wire evaluates near unit gain at broadside; it has no
/// independent physical derivation, but every antenna type's gain is
/// comparable only because they all share it.
const MOMENT_NORMALISATION: f64 = 0.5;

/// The current distribution assumed along a straight wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CurrentProfile {
    /// Standing wave, `I(z) = sin(k(L - z))`. Zero current at the open end.
    Standing,

    /// Travelling wave, `I(z) = e^{-jkz}`. Models a terminated or
    /// non-resonant wire.
    Traveling,
}

/// Far-field magnitude of a two-arm wire fed at the windom tap (1/3 of the
/// total length from one end), normalised to unit wire length.
///
/// `theta` is the azimuth of the observer in the X-Z plane (`atan2(z, x)`),
/// `harmonic` the standing-wave harmonic number (>= 1), and `inverted_v`
/// droops both arms 30 degrees from horizontal. Pure function; always
/// terminates in a fixed segment count.
pub fn bent_wire_moment(theta: f64, harmonic: u32, inverted_v: bool) -> f64 {
    bent_wire_moment_n(theta, harmonic, inverted_v, BENT_WIRE_SEGMENTS)
}

/// The integration engine behind [`bent_wire_moment`], with the segment
/// count exposed so convergence can be tested.
pub(crate) fn bent_wire_moment_n(
    theta: f64,
    harmonic: u32,
    inverted_v: bool,
    segments: usize,
) -> f64 {
    // Wire length is normalised to 1, so kL = n*pi.
    let k = f64::from(harmonic) * PI;

    // Observer direction in the X-Z plane.
    let dir = Vector3::new(theta.cos(), 0.0, theta.sin());

    let droop = if inverted_v { INVERTED_V_DROOP } else { 0.0 };
    let (sin_d, cos_d) = droop.sin_cos();

    // Per-component real/imag accumulators. Interference between segments
    // is phase sensitive; magnitude-only accumulation would lose it.
    let mut re = Vector3::zeros();
    let mut im = Vector3::zeros();

    for i in 0..segments {
        let t = (i as f64 + 0.5) / segments as f64;

        // Standing wave current, zero at both wire ends.
        let current = (k * t).sin();

        // The feed sits at the apex (origin). The short arm runs towards -Z,
        // the long arm towards +Z, both drooping towards -Y when bent.
        let arm = t - WINDOM_FEED_FRACTION;
        let (position, tangent) = if arm < 0.0 {
            let d = -arm;
            (
                Vector3::new(0.0, -d * sin_d, -d * cos_d),
                Vector3::new(0.0, sin_d, cos_d),
            )
        } else {
            (
                Vector3::new(0.0, -arm * sin_d, arm * cos_d),
                Vector3::new(0.0, -sin_d, cos_d),
            )
        };

        let phase = cexp(k * position.dot(&dir));
        let j = tangent * current;
        re += j * phase.re;
        im += j * phase.im;
    }

    // Transverse projection, A - (A.d)d, applied to the real and imaginary
    // parts independently.
    let re_perp = re - dir * re.dot(&dir);
    let im_perp = im - dir * im.dot(&dir);

    (re_perp.norm_squared() + im_perp.norm_squared()).sqrt()
        / (segments as f64 * MOMENT_NORMALISATION)
}

/// Electric-field magnitude of a straight wire of `length_wl` wavelengths,
/// by numerical integration of the chosen current profile against the
/// far-field phase kernel. The element factor `sin(theta)` is applied to
/// the integral's magnitude, so the result vanishes along the wire axis.
pub fn wire_field(theta: f64, length_wl: f64, profile: CurrentProfile) -> f64 {
    wire_field_n(theta, length_wl, profile, WIRE_FIELD_STEPS)
}

pub(crate) fn wire_field_n(
    theta: f64,
    length_wl: f64,
    profile: CurrentProfile,
    steps: usize,
) -> f64 {
    let dz = length_wl / steps as f64;
    let cos_theta = theta.cos();

    let mut sum = c64::new(0.0, 0.0);
    for i in 0..=steps {
        let z = i as f64 * dz;

        let current = match profile {
            CurrentProfile::Standing => c64::new((TAU * (length_wl - z)).sin(), 0.0),
            CurrentProfile::Traveling => cexp(-TAU * z),
        };

        // Phase kernel e^{jkz cos(theta)} with k = 2*pi (lambda = 1).
        sum += current * cexp(TAU * z * cos_theta);
    }
    sum *= dz;

    (theta.sin() * sum.norm()).abs()
}
