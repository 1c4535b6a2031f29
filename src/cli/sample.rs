// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fs::File, io::BufWriter, path::PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;

use super::{display_warnings, HamfieldError, InfoPrinter};
use crate::{
    misc::expensive_op,
    pattern::{AntennaType, Handedness, PolarizationMode, WireParams},
    sampler::{
        batch::{BatchRunner, FieldBatch},
        FieldBuffers, FieldScene, GridSpec, RadialAngle,
    },
    PROGRESS_BARS,
};

/// Sample the field fabric over a grid, one batch per animation frame.
///
/// The output file starts with three little-endian u32s (grid size, frame
/// count, floats per sample = 19), followed per frame by the 16-float
/// column-major instance transforms and then the RGB colour triples.
#[derive(Parser, Debug, Serialize)]
pub(super) struct SampleFieldArgs {
    /// The antenna type to sample.
    #[clap(short, long, default_value = "dipole-vertical")]
    antenna: AntennaType,

    /// The polarization mode.
    #[clap(short, long, default_value = "vertical")]
    polarization: PolarizationMode,

    /// Rotation sense for circular/elliptical polarization.
    #[clap(long, default_value = "rhcp")]
    handedness: Handedness,

    /// Overall displacement amplitude scale.
    #[clap(long, default_value = "1.0")]
    amplitude: f64,

    /// Wire length [wavelengths].
    #[clap(long, default_value = "2.5")]
    length: f64,

    /// Standing-wave harmonic number for wire antennas. Must be >= 1.
    #[clap(long, default_value = "1")]
    harmonic: u32,

    /// Treat the wire as an inverted V (30-degree arm droop).
    #[clap(long)]
    inverted_v: bool,

    /// Elevated-radial angle for the ground plane (60 or 135).
    #[clap(long)]
    radial_angle: Option<RadialAngle>,

    /// Samples along each side of the grid.
    #[clap(long, default_value = "100")]
    grid_size: usize,

    /// Side length of the sampled plane [scene units].
    #[clap(long, default_value = "40.0")]
    extent: f64,

    /// Number of animation frames to compute.
    #[clap(long, default_value = "1")]
    frames: usize,

    /// Simulation-clock step between frames.
    #[clap(long, default_value = "0.016")]
    time_step: f64,

    /// The file to write the raw buffers to.
    #[clap(short, long, default_value = "field_samples.bin")]
    output: PathBuf,
}

impl SampleFieldArgs {
    pub(super) fn run(&self, dry_run: bool) -> Result<(), HamfieldError> {
        if self.harmonic < 1 {
            return Err(HamfieldError::SampleField(format!(
                "The harmonic number must be a positive integer; got {}",
                self.harmonic
            )));
        }
        if self.grid_size < 2 {
            return Err(HamfieldError::SampleField(format!(
                "The grid needs at least 2 samples per side; got {}",
                self.grid_size
            )));
        }

        let scene = FieldScene {
            antenna: self.antenna,
            polarization: self.polarization,
            handedness: self.handedness,
            amplitude_scale: self.amplitude,
            wire: WireParams {
                length_wl: self.length,
                harmonic: self.harmonic,
                inverted_v: self.inverted_v,
            },
            radial_angle: self.radial_angle,
        };
        let spec = GridSpec {
            grid_size: self.grid_size,
            extent: self.extent,
        };

        let mut printer = InfoPrinter::new("Field sampling".into());
        printer.push_block(vec![
            format!("Antenna: {} ({})", self.antenna, self.polarization).into(),
            format!(
                "Grid: {0} x {0} samples over {1} x {1} units",
                spec.grid_size, spec.extent
            )
            .into(),
            format!(
                "{} frame(s), {} evaluations each",
                self.frames,
                spec.num_samples()
            )
            .into(),
        ]);
        printer.display();

        if dry_run {
            display_warnings();
            return Ok(());
        }

        let progress = ProgressBar::with_draw_target(
            Some(self.frames as u64),
            if PROGRESS_BARS.load() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(
            ProgressStyle::default_bar()
                .template("{msg:16}: [{wide_bar:.blue}] {pos:4}/{len:4} frames ({elapsed_precise}<{eta_precise})")
                .unwrap()
                .progress_chars("=> "),
        )
        .with_message("Sampling field");
        progress.tick();

        let mut out = BufWriter::new(File::create(&self.output)?);
        out.write_u32::<LittleEndian>(spec.grid_size as u32)?;
        out.write_u32::<LittleEndian>(self.frames as u32)?;
        out.write_u32::<LittleEndian>(19)?;

        // One buffer pair ping-pongs between this thread and the sampling
        // worker; a batch is always collected before the next submit, so
        // nothing is ever dropped here.
        let runner = BatchRunner::new();
        let mut buffers = FieldBuffers::new(&spec);
        for frame in 0..self.frames {
            let batch = FieldBatch {
                scene: scene.clone(),
                spec,
                clock: frame as f64 * self.time_step,
                buffers,
            };
            runner
                .submit(batch)
                .map_err(|_| HamfieldError::SampleField("Sampling worker is busy".to_string()))?;
            buffers = expensive_op(|| runner.collect(), "Still waiting on the sampling worker")
                .ok_or_else(|| {
                    HamfieldError::SampleField("The sampling worker died unexpectedly".to_string())
                })?;

            for &value in buffers.transform_slice() {
                out.write_f32::<LittleEndian>(value)?;
            }
            for &value in buffers.color_slice() {
                out.write_f32::<LittleEndian>(value)?;
            }
            progress.inc(1);
        }
        progress.finish();

        log::info!(
            "Wrote {} frame(s) of {} samples to {}",
            self.frames,
            spec.num_samples(),
            self.output.display()
        );
        display_warnings();
        Ok(())
    }
}
