// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. `hamfield` should do as many
calculations as possible in double precision before converting to a lower
precision, if it is ever required.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Speed of light \[km/s\]. Divided by a frequency in MHz this gives a
/// wavelength in mm.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299792.458;

/// The off-centre feed tap of a windom/OCFD wire, as a fraction of the total
/// wire length from one end. Fixed by the antenna's definition, not
/// configurable.
pub const WINDOM_FEED_FRACTION: f64 = 1.0 / 3.0;

/// Arm droop of an inverted-V wire, measured from horizontal. 30 degrees of
/// droop leaves a 120-degree included angle between the arms.
pub const INVERTED_V_DROOP: f64 = PI / 6.0;
