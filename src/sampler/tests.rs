// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::batch::{BatchRunner, FieldBatch};
use super::color::{hsl_to_rgb, sample_color};
use super::*;

fn small_spec() -> GridSpec {
    GridSpec {
        grid_size: 20,
        extent: 40.0,
    }
}

#[test]
fn buffers_have_one_matrix_and_colour_per_sample() {
    let spec = GridSpec::default();
    let buffers = FieldBuffers::new(&spec);
    assert_eq!(buffers.transform_slice().len(), spec.num_samples() * 16);
    assert_eq!(buffers.color_slice().len(), spec.num_samples() * 3);
}

#[test]
fn near_field_samples_are_culled() {
    // With 20 samples over 40 units, sample (10, 10) lands exactly on the
    // antenna.
    let spec = small_spec();
    let mut buffers = FieldBuffers::new(&spec);
    sample_grid(&FieldScene::default(), &spec, 0.0, &mut buffers);

    // Centre sample: scale 0, no translation, homogeneous 1.
    let m = buffers.transforms.slice(ndarray::s![10, 10, ..]);
    assert_abs_diff_eq!(m[0], 0.0);
    assert_abs_diff_eq!(m[5], 0.0);
    assert_abs_diff_eq!(m[10], 0.0);
    assert_abs_diff_eq!(m[12], 0.0);
    assert_abs_diff_eq!(m[15], 1.0);
}

#[test]
fn distant_samples_decay_to_zero_scale() {
    let spec = small_spec();
    let mut buffers = FieldBuffers::new(&spec);
    sample_grid(&FieldScene::default(), &spec, 0.0, &mut buffers);

    // The grid corner is ~28 units out, past the 22-unit decay radius; it
    // keeps its position but renders at zero scale.
    let m = buffers.transforms.slice(ndarray::s![0, 0, ..]);
    assert_abs_diff_eq!(m[0], 0.0);
    assert_abs_diff_eq!(m[12], -20.0, epsilon = 1e-6);
    assert_abs_diff_eq!(m[14], -20.0, epsilon = 1e-6);
}

#[test]
fn vertical_antennas_displace_vertically_only() {
    let spec = small_spec();
    let mut buffers = FieldBuffers::new(&spec);
    sample_grid(&FieldScene::default(), &spec, 0.3, &mut buffers);

    // For a vertical the horizontal scale is 0, so x/z never move off the
    // grid positions.
    let spacing = spec.spacing();
    for x in 0..spec.grid_size {
        for z in 0..spec.grid_size {
            let m = buffers.transforms.slice(ndarray::s![x, z, ..]);
            if m[0] == 0.0 {
                continue;
            }
            let pos_x = x as f64 * spacing - spec.extent / 2.0;
            let pos_z = z as f64 * spacing - spec.extent / 2.0;
            assert_abs_diff_eq!(m[12], pos_x as f32, epsilon = 1e-5);
            assert_abs_diff_eq!(m[14], pos_z as f32, epsilon = 1e-5);
        }
    }
}

#[test]
fn ground_plane_cone_lifts_the_fabric() {
    let spec = small_spec();
    let scene = FieldScene {
        antenna: AntennaType::GroundPlane,
        radial_angle: Some(RadialAngle::Deg60),
        ..Default::default()
    };
    let mut buffers = FieldBuffers::new(&spec);
    sample_grid(&scene, &spec, 0.0, &mut buffers);

    // A mid-distance sample must sit on the 1.2 * dist cone (plus its wave
    // displacement, which is vertical-only for a ground plane).
    let m = buffers.transforms.slice(ndarray::s![10, 15, ..]);
    let spacing = spec.spacing();
    let pos_x = 10.0 * spacing - 20.0;
    let pos_z = 15.0 * spacing - 20.0;
    let dist = (pos_x * pos_x + pos_z * pos_z).sqrt();
    let y = f64::from(m[13]);
    assert!((y - 1.2 * dist).abs() <= 1.0 * (1.0 - dist / 22.0) + 1e-6);
}

#[test]
fn sampling_is_deterministic() {
    let spec = small_spec();
    let scene = FieldScene {
        antenna: AntennaType::Windom,
        polarization: PolarizationMode::Horizontal,
        ..Default::default()
    };
    let mut a = FieldBuffers::new(&spec);
    let mut b = FieldBuffers::new(&spec);
    sample_grid(&scene, &spec, 1.25, &mut a);
    sample_grid(&scene, &spec, 1.25, &mut b);
    assert_eq!(a, b);
}

#[test]
fn the_clock_advances_the_wave() {
    let spec = small_spec();
    let mut a = FieldBuffers::new(&spec);
    let mut b = FieldBuffers::new(&spec);
    sample_grid(&FieldScene::default(), &spec, 0.0, &mut a);
    sample_grid(&FieldScene::default(), &spec, 0.5, &mut b);
    assert_ne!(a, b);
}

#[test]
fn primary_hues_convert_exactly() {
    assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
    let [r, g, b] = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
    assert_abs_diff_eq!(r, 0.0);
    assert_abs_diff_eq!(g, 1.0);
    assert_abs_diff_eq!(b, 0.0);
    // Achromatic.
    assert_eq!(hsl_to_rgb(0.25, 0.0, 0.3), [0.3, 0.3, 0.3]);
}

#[test]
fn beam_colours_run_hot_towards_the_main_lobe() {
    // Heat map: high gain leans red, low gain leans blue.
    let hot = sample_color(
        AntennaType::Yagi,
        PolarizationMode::Vertical,
        1.0,
        1.1,
        crate::constants::FRAC_PI_2,
        1.0,
    );
    let cold = sample_color(
        AntennaType::Yagi,
        PolarizationMode::Vertical,
        -1.0,
        0.1,
        crate::constants::FRAC_PI_2,
        1.0,
    );
    assert!(hot[0] > hot[2]);
    assert!(cold[2] > cold[0]);
}

#[test]
fn batch_in_flight_refuses_a_second_submission() {
    let runner = BatchRunner::new();

    // A deliberately heavy batch so the worker is still busy when the
    // second submit lands.
    let heavy_spec = GridSpec {
        grid_size: 300,
        extent: 40.0,
    };
    let heavy = FieldBatch {
        scene: FieldScene {
            antenna: AntennaType::Windom,
            wire: WireParams {
                harmonic: 5,
                ..Default::default()
            },
            ..Default::default()
        },
        spec: heavy_spec,
        clock: 0.0,
        buffers: FieldBuffers::new(&heavy_spec),
    };
    assert!(runner.submit(heavy).is_ok());

    let small = FieldBatch {
        scene: FieldScene::default(),
        spec: small_spec(),
        clock: 0.0,
        buffers: FieldBuffers::new(&small_spec()),
    };
    // Dropped, not queued; the batch comes back to the caller.
    let refused = runner.submit(small);
    assert!(refused.is_err());

    // Once collected, the slot opens up again.
    let buffers = runner.collect().expect("worker returns buffers");
    assert_eq!(buffers.transform_slice().len(), 300 * 300 * 16);
    let again = refused.unwrap_err();
    assert!(runner.submit(again).is_ok());
    assert!(runner.collect().is_some());
    assert!(!runner.has_failed());
}
