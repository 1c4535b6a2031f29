// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Far-field radiation patterns, current-moment integration and Yagi-Uda
dimensioning for amateur-radio antenna visualisation.

The numeric core is pure and stateless: [`pattern::evaluate`] maps an
antenna type, polarization mode and azimuth to a directional gain and
polarization component scales, delegating to the [`moment`] integrator for
wire geometries with no closed form. [`sampler`] turns those evaluations
into renderer-ready instance buffers, [`yagi`] dimensions beam antennas and
[`skywave`] traces ionospheric hop paths.
 */

pub mod cli;
pub mod constants;
pub(crate) mod math;
pub(crate) mod misc;
pub mod moment;
pub mod pattern;
pub mod sampler;
pub mod skywave;
pub mod yagi;

// Re-exports.
pub use cli::HamfieldError;

use crossbeam_utils::atomic::AtomicCell;

/// Should progress bars be drawn? The CLI sets this once at startup.
pub static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
