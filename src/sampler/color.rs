// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colour mapping for sampled field points.

use crate::pattern::{AntennaType, PolarizationMode};

/// Heat-map hue span: gain 0 maps to blue (0.66), gain 1 to red (0).
const HEAT_HUE_SPAN: f64 = 0.66;

/// Fixed cyan-ish hue for scenes without a gain heat map.
const BASE_HUE: f64 = 0.55;
const BASE_SATURATION: f64 = 0.9;

/// The colour of one sample, already scaled by the wave-pulse brightness.
pub(crate) fn sample_color(
    antenna: AntennaType,
    polarization: PolarizationMode,
    cos_dir: f64,
    gain: f64,
    phase: f64,
    decay: f64,
) -> [f64; 3] {
    let circular = matches!(
        polarization,
        PolarizationMode::Circular | PolarizationMode::Elliptical
    );
    let variable_gain = matches!(
        antenna,
        AntennaType::Yagi
            | AntennaType::Quad
            | AntennaType::Moxon
            | AntennaType::Hb9cv
            | AntennaType::MagneticLoop
    ) || polarization == PolarizationMode::Horizontal;

    let [r, g, b] = if circular {
        let normalized = (cos_dir + 1.0) * 0.5;
        hsl_to_rgb((1.0 - normalized) * HEAT_HUE_SPAN, 1.0, 0.5)
    } else if variable_gain {
        let normalized = ((gain - 0.1) / 1.0).clamp(0.0, 1.0);
        hsl_to_rgb((1.0 - normalized) * HEAT_HUE_SPAN, 1.0, 0.5)
    } else {
        hsl_to_rgb(BASE_HUE, BASE_SATURATION, 0.5)
    };

    // Sharpened wave pulse riding the phase.
    let pulse = ((phase.sin() + 1.0) * 0.5).powi(2);
    let brightness = pulse * decay * 2.0 * gain.max(0.3) + 0.2;

    [r * brightness, g * brightness, b * brightness]
}

/// HSL to RGB, all components in [0, 1].
pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
