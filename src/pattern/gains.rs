// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The closed-form directional-gain formulas, one function per pattern.

use std::f64::consts::{FRAC_PI_4, SQRT_2};

use crate::constants::PI;

/// Minor-axis ratio of the elliptical polarization mode.
pub(crate) const ELLIPTICAL_MINOR_RATIO: f64 = 0.6;

/// Denominator floor for the generic dipole interference pattern.
const DIPOLE_SIN_FLOOR: f64 = 0.001;

/// Below this `|sin(theta)|` the long-wire element-factor division is
/// replaced by a fixed multiplier. A numerical floor, not a physical limit:
/// the true element factor has a removable form here that this model
/// approximates with a bounded value instead.
const LONG_WIRE_SIN_FLOOR: f64 = 0.1;
const LONG_WIRE_AXIAL_FALLBACK: f64 = 10.0;

/// Lobes per wavelength scaling of the long-wire pattern argument.
const LONG_WIRE_LOBE_RATE: f64 = 2.5;

/// Asymmetric front/back lobe used by the circular and elliptical modes.
/// The front lobe is sharpened (exponent 1.5); the back lobe is linear and
/// damped to 30%, with a 0.1 omnidirectional floor.
pub(crate) fn circular_lobe(cos_dir: f64) -> f64 {
    let front = cos_dir.max(0.0);
    let back = (-cos_dir).max(0.0);
    front.powf(1.5) + 0.3 * back + 0.1
}

/// Forward-only beam lobe. `x` is the cosine of the angle off boresight;
/// the moxon passes a sine instead to rotate the axis.
pub(crate) fn forward_lobe(x: f64) -> f64 {
    let front = x.max(0.0);
    front.powi(2) + 0.1
}

/// Two-element phased-array factor of the HB9CV: quarter-wave-ish spacing
/// with fixed quadrature phasing, `psi = (pi/4) cos(theta) + 5pi/4`,
/// normalised so the peak is 1.
pub(crate) fn hb9cv_array_factor(theta: f64) -> f64 {
    let psi = FRAC_PI_4 * theta.cos() + 5.0 * FRAC_PI_4;
    let mag = (2.0 + 2.0 * psi.cos()).sqrt();
    (mag / SQRT_2).powi(2)
}

/// Figure-eight loop pattern with a small floor so the nulls never reach a
/// true zero on screen.
pub(crate) fn magnetic_loop(theta: f64) -> f64 {
    theta.cos().abs() + 0.05
}

/// Multi-lobe long-wire pattern for a wire of `length_wl` wavelengths.
/// Returns the raw (untuned) value.
pub(crate) fn long_wire(theta: f64, length_wl: f64) -> f64 {
    let lobe_arg = LONG_WIRE_LOBE_RATE * PI * length_wl * theta.cos();
    let num = lobe_arg.sin().powi(2);
    let den = theta.sin().abs();
    if den > LONG_WIRE_SIN_FLOOR {
        num / den
    } else {
        num * LONG_WIRE_AXIAL_FALLBACK
    }
}

/// Classic two-point-source interference pattern of a centre-fed dipole of
/// `length_wl` wavelengths: `|cos(kL/2 cos(theta)) - cos(kL/2)| /
/// max(|sin(theta)|, floor)` with `kL/2 = pi L`.
pub(crate) fn dipole_interference(theta: f64, length_wl: f64) -> f64 {
    let half_kl = PI * length_wl;
    let num = (half_kl * theta.cos()).cos() - half_kl.cos();
    let den = theta.sin().abs().max(DIPOLE_SIN_FLOOR);
    (num / den).abs()
}
