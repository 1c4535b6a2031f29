// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Far-field evaluation: antenna type and polarization mode in, directional
//! gain and polarization component scales out.
//!
//! Every closed-form pattern lives in [`gains`] as its own function so each
//! formula can be unit tested on its own; [`evaluate`] is only the dispatch
//! that selects a formula and derives the polarization scales. Types whose
//! pattern has no closed form delegate to the [`crate::moment`] integrator.
//!
//! All branches are total over theta. Divisions by near-zero denominators
//! use fixed floors or fallback multipliers; the exact values are part of
//! the visual contract and must not be swapped for other
//! numerical-stability tricks.

pub(crate) mod gains;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    constants::FRAC_PI_2,
    moment::bent_wire_moment,
};

/// Exponent sharpening integrator-derived gains for display.
const WIRE_GAIN_EXPONENT: f64 = 1.5;

/// Scale and offset mapping a raw wire gain into the brightness range the
/// renderer expects. Tuning constants, not physics; preserved exactly for
/// visual parity.
const WIRE_GAIN_SCALE: f64 = 0.5;
const WIRE_GAIN_OFFSET: f64 = 0.05;

/// Supported antenna types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AntennaType {
    /// Quarter-wave vertical over ground.
    DipoleVertical,

    /// Half-wave dipole, horizontal orientation. Its broadside axis is
    /// rotated 90 degrees relative to the beam antennas.
    DipoleHorizontal,

    /// Vertical with elevated radials.
    GroundPlane,

    Yagi,

    /// Cubical quad. Shares the yagi forward lobe in this model.
    Quad,

    /// Moxon rectangle; yagi-like lobe rotated 90 degrees.
    Moxon,

    /// Two-element phased array with fixed quadrature feed.
    Hb9cv,

    /// Small transmitting loop; figure-eight azimuth pattern.
    MagneticLoop,

    /// Non-resonant wire of several wavelengths.
    LongWire,

    /// Off-centre-fed dipole, feed tap at 1/3.
    Windom,

    /// End-fed half-wave (and its harmonics).
    EndFed,

    /// A dipole with no specific orientation; the polarization mode decides
    /// what it looks like.
    DipoleGeneric,
}

/// How the radiated field is polarized. Orthogonal to [`AntennaType`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PolarizationMode {
    Vertical,
    Horizontal,
    Circular,
    Elliptical,
}

/// Rotation sense of a circularly (or elliptically) polarized wave.
///
/// RHCP is +1 and LHCP is -1 throughout the crate. The sign multiplies the
/// horizontal component scale, flipping the apparent rotation direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Handedness {
    Rhcp,
    Lhcp,
}

impl Handedness {
    pub fn signum(self) -> f64 {
        match self {
            Handedness::Rhcp => 1.0,
            Handedness::Lhcp => -1.0,
        }
    }
}

impl Default for Handedness {
    fn default() -> Self {
        Handedness::Rhcp
    }
}

/// Wire geometry for the types that need it. Ignored by the closed-form
/// beam antennas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireParams {
    /// Wire length in wavelengths.
    pub length_wl: f64,

    /// Standing-wave harmonic number, >= 1. Values of 0 are rejected at the
    /// CLI boundary; the formulas themselves stay total.
    pub harmonic: u32,

    /// Droop both arms 30 degrees (inverted-V geometry).
    pub inverted_v: bool,
}

impl Default for WireParams {
    fn default() -> Self {
        WireParams {
            length_wl: 2.5,
            harmonic: 1,
            inverted_v: false,
        }
    }
}

/// The output of one far-field evaluation.
///
/// `directional_gain` is unnormalised relative gain, not dBi; callers map it
/// into display ranges themselves. The two scales weight the vertical and
/// tangential displacement of a rendered sample and may be negative (the
/// sign carries rotation direction for circular modes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub directional_gain: f64,
    pub vertical_scale: f64,
    pub horizontal_scale: f64,
}

/// Evaluate the far-field response of `antenna` at azimuth `theta` (radians,
/// `atan2(z, x)` convention).
///
/// Pure and stateless: identical inputs give bit-identical outputs, and the
/// result is finite and non-negative for every `theta`, including the
/// angles where a pattern's denominator vanishes.
pub fn evaluate(
    antenna: AntennaType,
    polarization: PolarizationMode,
    handedness: Handedness,
    theta: f64,
    params: &WireParams,
) -> FieldSample {
    let cos_dir = theta.cos();

    // Circular and elliptical polarization override the antenna-specific
    // pattern entirely.
    match polarization {
        PolarizationMode::Circular | PolarizationMode::Elliptical => {
            let mut h_scale = handedness.signum() * cos_dir;
            if polarization == PolarizationMode::Elliptical {
                h_scale *= gains::ELLIPTICAL_MINOR_RATIO;
            }
            return FieldSample {
                directional_gain: gains::circular_lobe(cos_dir),
                vertical_scale: 1.0,
                horizontal_scale: h_scale,
            };
        }
        PolarizationMode::Vertical | PolarizationMode::Horizontal => (),
    }

    let mut vertical_scale = 1.0;
    let mut horizontal_scale = 1.0;
    let mut directional_gain = 1.0;

    match antenna {
        AntennaType::Yagi | AntennaType::Quad => {
            directional_gain = gains::forward_lobe(cos_dir);
            plane_polarize(polarization, &mut vertical_scale, &mut horizontal_scale);
        }

        AntennaType::Moxon => {
            // Same lobe as the yagi, axis rotated 90 degrees.
            directional_gain = gains::forward_lobe(theta.sin());
            plane_polarize(polarization, &mut vertical_scale, &mut horizontal_scale);
        }

        AntennaType::Hb9cv => {
            directional_gain = gains::hb9cv_array_factor(theta);
            plane_polarize(polarization, &mut vertical_scale, &mut horizontal_scale);
        }

        AntennaType::MagneticLoop => {
            directional_gain = gains::magnetic_loop(theta);
            plane_polarize(polarization, &mut vertical_scale, &mut horizontal_scale);
        }

        AntennaType::LongWire => {
            let raw = gains::long_wire(theta, params.length_wl);
            directional_gain = raw * WIRE_GAIN_SCALE + WIRE_GAIN_OFFSET;
        }

        AntennaType::Windom | AntennaType::EndFed => {
            // No closed form; integrate the current moments. The end-fed
            // shares the integrator (its flat geometry makes the feed
            // position irrelevant to the pattern).
            let raw = bent_wire_moment(theta, params.harmonic, params.inverted_v);
            directional_gain =
                raw.powf(WIRE_GAIN_EXPONENT) * WIRE_GAIN_SCALE + WIRE_GAIN_OFFSET;
            plane_polarize(polarization, &mut vertical_scale, &mut horizontal_scale);
        }

        AntennaType::DipoleVertical | AntennaType::GroundPlane => {
            // Omnidirectional in azimuth.
            horizontal_scale = 0.0;
        }

        AntennaType::DipoleHorizontal => {
            // Broadside axis rotated 90 degrees relative to the beams.
            directional_gain = gains::dipole_interference(theta - FRAC_PI_2, params.length_wl);
            vertical_scale = 0.0;
        }

        AntennaType::DipoleGeneric => {
            if polarization == PolarizationMode::Horizontal {
                vertical_scale = 0.0;
                horizontal_scale = theta.sin();
                directional_gain = theta.sin().abs() + 0.1;
            }
        }
    }

    FieldSample {
        directional_gain,
        vertical_scale,
        horizontal_scale,
    }
}

/// A single-plane-polarized antenna radiates one component only; force the
/// other scale to zero.
fn plane_polarize(polarization: PolarizationMode, vertical: &mut f64, horizontal: &mut f64) {
    match polarization {
        PolarizationMode::Vertical => *horizontal = 0.0,
        _ => {
            *vertical = 0.0;
            *horizontal = 1.0;
        }
    }
}
