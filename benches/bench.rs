// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;

use hamfield::{
    moment::bent_wire_moment,
    pattern::{evaluate, AntennaType, Handedness, PolarizationMode, WireParams},
    sampler::{sample_grid, FieldBuffers, FieldScene, GridSpec},
};

fn pattern_evaluation(c: &mut Criterion) {
    let params = WireParams::default();
    c.bench_function("hb9cv array factor", |b| {
        b.iter(|| {
            evaluate(
                AntennaType::Hb9cv,
                PolarizationMode::Vertical,
                Handedness::Rhcp,
                black_box(0.7),
                &params,
            )
        })
    });

    c.bench_function("windom current-moment integration", |b| {
        b.iter(|| bent_wire_moment(black_box(0.7), 3, true))
    });
}

fn grid_sampling(c: &mut Criterion) {
    let scene = FieldScene {
        antenna: AntennaType::Windom,
        polarization: PolarizationMode::Horizontal,
        ..Default::default()
    };
    let spec = GridSpec::default();
    let mut buffers = FieldBuffers::new(&spec);

    c.bench_function("100x100 grid sample", |b| {
        b.iter(|| sample_grid(&scene, &spec, black_box(1.0), &mut buffers))
    });
}

criterion_group!(benches, pattern_evaluation, grid_sampling);
criterion_main!(benches);
