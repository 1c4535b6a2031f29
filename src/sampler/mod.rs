// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning per-direction field samples into a grid of instance transforms
//! and colours.
//!
//! This is the calling convention the evaluator exists to serve: one
//! evaluation per grid point per animation frame, tens of thousands per
//! frame, written straight into a pair of preallocated buffers that a
//! renderer consumes as instance matrices and RGB colours. The simulation
//! clock is an explicit argument; nothing here keeps time of its own.

pub mod batch;
pub(crate) mod color;
#[cfg(test)]
mod tests;

use ndarray::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    math::atan2,
    pattern::{self, AntennaType, Handedness, PolarizationMode, WireParams},
};

/// Spatial wavenumber of the rendered wave. The wave travels; the sample
/// points don't.
const WAVE_NUMBER: f64 = 2.0;

/// Radians of wave phase per clock unit.
const ANGULAR_RATE: f64 = 6.0;

/// Amplitude fades linearly to zero at this distance from the antenna.
const DECAY_RADIUS: f64 = 22.0;

/// Samples closer than this to the antenna are collapsed to zero scale.
const NEAR_FIELD_CULL_RADIUS: f64 = 1.0;

/// Vertical rise per unit distance of the conical ground-plane fabric when
/// the radials sit at 60 degrees.
const RADIAL_CONE_SLOPE: f64 = 1.2;

/// Elevated-radial angle of a ground-plane antenna.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum RadialAngle {
    /// Radials drooped to 60 degrees; the wave fabric rides a 45-degree
    /// cone instead of a plane.
    #[strum(serialize = "60")]
    #[serde(rename = "60")]
    Deg60,

    /// Radials at 135 degrees (flat fabric).
    #[strum(serialize = "135")]
    #[serde(rename = "135")]
    Deg135,
}

/// Everything that selects what the sampled field looks like, minus time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldScene {
    pub antenna: AntennaType,
    pub polarization: PolarizationMode,
    pub handedness: Handedness,
    pub amplitude_scale: f64,
    pub wire: WireParams,
    pub radial_angle: Option<RadialAngle>,
}

impl Default for FieldScene {
    fn default() -> Self {
        FieldScene {
            antenna: AntennaType::DipoleVertical,
            polarization: PolarizationMode::Vertical,
            handedness: Handedness::Rhcp,
            amplitude_scale: 1.0,
            wire: WireParams::default(),
            radial_angle: None,
        }
    }
}

/// The sampled plane: `grid_size` x `grid_size` points covering
/// `extent` x `extent` units, centred on the antenna.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub grid_size: usize,
    pub extent: f64,
}

impl GridSpec {
    pub fn spacing(&self) -> f64 {
        self.extent / self.grid_size as f64
    }

    pub fn num_samples(&self) -> usize {
        self.grid_size * self.grid_size
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        // 100 x 100 = 10,000 samples per frame.
        GridSpec {
            grid_size: 100,
            extent: 40.0,
        }
    }
}

/// The output buffers of one batch: a column-major 4x4 transform per
/// sample (translation + uniform scale) and an RGB colour per sample.
/// Allocated once and repopulated in place every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBuffers {
    pub transforms: Array3<f32>,
    pub colors: Array3<f32>,
}

impl FieldBuffers {
    pub fn new(spec: &GridSpec) -> FieldBuffers {
        FieldBuffers {
            transforms: Array3::zeros((spec.grid_size, spec.grid_size, 16)),
            colors: Array3::zeros((spec.grid_size, spec.grid_size, 3)),
        }
    }

    /// The transform data as one flat slice, 16 floats per sample.
    pub fn transform_slice(&self) -> &[f32] {
        self.transforms.as_slice().expect("buffers are C-contiguous")
    }

    /// The colour data as one flat slice, 3 floats per sample.
    pub fn color_slice(&self) -> &[f32] {
        self.colors.as_slice().expect("buffers are C-contiguous")
    }
}

/// Populate `buffers` with one frame of the field fabric at simulation time
/// `clock`. Rows are independent and processed in parallel.
///
/// Samples inside the near-field cull radius get a zero-scale transform and
/// their colour is left untouched.
pub fn sample_grid(scene: &FieldScene, spec: &GridSpec, clock: f64, buffers: &mut FieldBuffers) {
    let spacing = spec.spacing();
    let center_offset = spec.extent / 2.0;

    buffers
        .transforms
        .outer_iter_mut()
        .into_par_iter()
        .zip(buffers.colors.outer_iter_mut().into_par_iter())
        .enumerate()
        .for_each(|(x, (mut transform_row, mut color_row))| {
            let pos_x = x as f64 * spacing - center_offset;
            for z in 0..spec.grid_size {
                let pos_z = z as f64 * spacing - center_offset;
                let transform = transform_row.slice_mut(s![z, ..]);
                let color = color_row.slice_mut(s![z, ..]);
                sample_point(scene, clock, pos_x, pos_z, transform, color);
            }
        });
}

fn sample_point(
    scene: &FieldScene,
    clock: f64,
    pos_x: f64,
    pos_z: f64,
    mut transform: ArrayViewMut1<f32>,
    mut color: ArrayViewMut1<f32>,
) {
    let dist = (pos_x * pos_x + pos_z * pos_z).sqrt();

    if dist < NEAR_FIELD_CULL_RADIUS {
        write_matrix(&mut transform, 0.0, 0.0, 0.0, 0.0);
        return;
    }

    // The wave fabric of a drooped ground plane rides a cone.
    let y_offset = match (scene.antenna, scene.radial_angle) {
        (AntennaType::GroundPlane, Some(RadialAngle::Deg60)) => dist * RADIAL_CONE_SLOPE,
        _ => 0.0,
    };

    // The wave travels outward; the particles stay put.
    let phase = WAVE_NUMBER * dist - clock * ANGULAR_RATE;

    let theta = atan2(pos_z, pos_x);
    let sample = pattern::evaluate(
        scene.antenna,
        scene.polarization,
        scene.handedness,
        theta,
        &scene.wire,
    );

    let amp = scene.amplitude_scale * sample.directional_gain;
    let decay = (1.0 - dist / DECAY_RADIUS).max(0.0);
    let effective_amp = amp * decay;

    let disp_y = phase.sin() * sample.vertical_scale * effective_amp;
    let disp_h = phase.cos() * sample.horizontal_scale * effective_amp;

    // Tangential unit vector of the ring through this sample.
    let tan_x = -theta.sin();
    let tan_z = theta.cos();

    let final_x = pos_x + tan_x * disp_h;
    let final_y = disp_y + y_offset;
    let final_z = pos_z + tan_z * disp_h;

    let scale = if decay > 0.01 { 1.0 } else { 0.0 };
    write_matrix(&mut transform, final_x, final_y, final_z, scale);

    let [r, g, b] = color::sample_color(
        scene.antenna,
        scene.polarization,
        theta.cos(),
        sample.directional_gain,
        phase,
        decay,
    );
    color[0] = r as f32;
    color[1] = g as f32;
    color[2] = b as f32;
}

/// Write a column-major translation + uniform-scale matrix into 16 floats.
fn write_matrix(row: &mut ArrayViewMut1<f32>, x: f64, y: f64, z: f64, scale: f64) {
    row.fill(0.0);
    let s = scale as f32;
    row[0] = s;
    row[5] = s;
    row[10] = s;
    row[12] = x as f32;
    row[13] = y as f32;
    row[14] = z as f32;
    row[15] = 1.0;
}
