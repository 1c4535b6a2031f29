// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use nalgebra::Vector3;

use super::*;
use crate::constants::FRAC_PI_2;

#[test]
fn muf_at_vertical_incidence_is_the_critical_frequency() {
    // Straight up: incidence 0, MUF = foF2.
    assert_abs_diff_eq!(
        maximum_usable_frequency(FRAC_PI_2, 15.0),
        CRITICAL_FREQUENCY_FOF2,
        epsilon = 1e-12
    );
}

#[test]
fn muf_rises_as_the_takeoff_angle_drops() {
    let shallow = maximum_usable_frequency(0.1, 15.0);
    let steep = maximum_usable_frequency(1.0, 15.0);
    assert!(shallow > steep);
    assert!(steep > CRITICAL_FREQUENCY_FOF2);
}

#[test]
fn ground_wave_rolls_off_linearly() {
    assert_abs_diff_eq!(ground_wave_strength(7.0), 15.0 - 2.8);
    assert_abs_diff_eq!(ground_wave_strength(40.0), 0.0);
    assert_abs_diff_eq!(ground_wave_strength(37.5), 0.0);
}

#[test]
fn sphere_intersection_finds_the_near_face() {
    let hit = intersect_sphere(
        Vector3::zeros(),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(10.0, 0.0, 0.0),
        1.0,
    )
    .unwrap();
    assert_abs_diff_eq!(hit.x, 9.0, epsilon = 1e-12);

    // A ray pointed away misses.
    assert!(intersect_sphere(
        Vector3::zeros(),
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(10.0, 0.0, 0.0),
        1.0,
    )
    .is_none());
}

#[test]
fn low_band_hops_between_shell_and_ground() {
    let path = trace_signal_path(Band::Hf, 0.4, 3.5, 15.0);
    assert_eq!(path.outcome, PathOutcome::HopLimit);
    assert_eq!(path.bounces.len(), MAX_HOPS);

    // Intensity halves at every ground contact.
    assert_abs_diff_eq!(path.bounces[0].intensity, 0.5);
    assert_abs_diff_eq!(path.bounces[1].intensity, 0.25);
    assert_abs_diff_eq!(path.bounces[2].intensity, 0.125);

    // Every bounce sits on the ground, every path vertex stays within the
    // shell.
    for bounce in &path.bounces {
        assert_abs_diff_eq!(bounce.position.norm(), EARTH_RADIUS, epsilon = 1e-6);
    }
    for point in &path.points {
        assert!(point.norm() <= EARTH_RADIUS + 15.0 + 1e-6);
    }
}

#[test]
fn frequencies_above_the_muf_penetrate() {
    let muf = maximum_usable_frequency(0.9, 15.0);
    let path = trace_signal_path(Band::Hf, 0.9, muf + 1.0, 15.0);
    assert_eq!(path.outcome, PathOutcome::Penetrated);
    assert!(path.bounces.is_empty());
    // Launch point, shell hit, escape ray end.
    assert_eq!(path.points.len(), 3);
}

#[test]
fn vhf_always_penetrates() {
    // Even below foF2 in frequency.
    let path = trace_signal_path(Band::Vhf, 0.9, 2.0, 15.0);
    assert_eq!(path.outcome, PathOutcome::Penetrated);
}

#[test]
fn tracing_is_pure() {
    let a = trace_signal_path(Band::Hf, 0.4, 3.5, 15.0);
    let b = trace_signal_path(Band::Hf, 0.4, 3.5, 15.0);
    assert_eq!(a, b);
}
