// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use num_traits::{Float, FromPrimitive};
use serde::Serialize;

use super::{display_warnings, HamfieldError};
use crate::{
    constants::TAU,
    moment::{wire_field, CurrentProfile},
    pattern::{evaluate, AntennaType, Handedness, PolarizationMode, WireParams},
};

/// Generate far-field pattern values.
#[derive(Parser, Debug, Serialize)]
pub(super) struct PatternArgs {
    /// The antenna type to evaluate.
    #[clap(short, long, default_value = "yagi")]
    antenna: AntennaType,

    /// The polarization mode.
    #[clap(short, long, default_value = "vertical")]
    polarization: PolarizationMode,

    /// Rotation sense for circular/elliptical polarization.
    #[clap(long, default_value = "rhcp")]
    handedness: Handedness,

    /// Wire length [wavelengths], used by the wire antenna types.
    #[clap(short, long, default_value = "2.5")]
    length: f64,

    /// Standing-wave harmonic number for wire antennas. Must be >= 1.
    #[clap(long, default_value = "1")]
    harmonic: u32,

    /// Treat the wire as an inverted V (30-degree arm droop).
    #[clap(long)]
    inverted_v: bool,

    /// Ignore the antenna type and evaluate the straight-wire field
    /// integral with this current profile (standing or traveling) instead.
    #[clap(long)]
    wire_integral: Option<CurrentProfile>,

    /// The azimuth step to use [degrees]. Larger steps produce fewer
    /// values, but will give coarser resolution.
    #[clap(short, long, default_value = "1.0")]
    step: f64,

    /// The file to write the results to. The files are formatted as
    /// tab-separated, with each line (1) the azimuth in radians, (2) the
    /// directional gain, (3) the vertical component scale and (4) the
    /// horizontal component scale.
    #[clap(short, long, default_value = "pattern_responses.tsv")]
    output: PathBuf,

    /// Also render the pattern as a polar plot. Only available if compiled
    /// with the "plotting" feature.
    #[cfg(feature = "plotting")]
    #[clap(long)]
    plot: Option<PathBuf>,
}

impl PatternArgs {
    pub(super) fn run(&self, dry_run: bool) -> Result<(), HamfieldError> {
        if self.harmonic < 1 {
            return Err(HamfieldError::Pattern(format!(
                "The harmonic number must be a positive integer; got {}",
                self.harmonic
            )));
        }

        // The raw wire integral bypasses the antenna-type dispatch.
        if let Some(profile) = self.wire_integral {
            return self.run_wire_integral(profile, dry_run);
        }

        let params = WireParams {
            length_wl: self.length,
            harmonic: self.harmonic,
            inverted_v: self.inverted_v,
        };

        let samples: Vec<(f64, crate::pattern::FieldSample)> =
            gen_azimuths(self.step.to_radians())
                .map(|theta| {
                    (
                        theta,
                        evaluate(
                            self.antenna,
                            self.polarization,
                            self.handedness,
                            theta,
                            &params,
                        ),
                    )
                })
                .collect();

        if dry_run {
            log::info!(
                "{} azimuths would be evaluated for a {}",
                samples.len(),
                self.antenna
            );
            display_warnings();
            return Ok(());
        }

        let mut out = BufWriter::new(File::create(&self.output)?);
        for (theta, sample) in &samples {
            writeln!(
                &mut out,
                "{}\t{:e}\t{:e}\t{:e}",
                theta, sample.directional_gain, sample.vertical_scale, sample.horizontal_scale
            )?;
        }
        log::info!(
            "Wrote {} pattern values to {}",
            samples.len(),
            self.output.display()
        );

        #[cfg(feature = "plotting")]
        if let Some(plot_file) = &self.plot {
            plot::polar_plot(plot_file, &self.antenna.to_string(), &samples)?;
            log::info!("Wrote plot to {}", plot_file.display());
        }

        display_warnings();
        Ok(())
    }

    fn run_wire_integral(
        &self,
        profile: CurrentProfile,
        dry_run: bool,
    ) -> Result<(), HamfieldError> {
        let rows: Vec<(f64, f64)> = gen_azimuths(self.step.to_radians())
            .map(|theta| (theta, wire_field(theta, self.length, profile)))
            .collect();

        if dry_run {
            log::info!(
                "{} azimuths would be integrated for a {} wavelength {} wave wire",
                rows.len(),
                self.length,
                profile
            );
            display_warnings();
            return Ok(());
        }

        let mut out = BufWriter::new(File::create(&self.output)?);
        for (theta, field) in &rows {
            writeln!(&mut out, "{theta}\t{field:e}")?;
        }
        log::info!(
            "Wrote {} field values to {}",
            rows.len(),
            self.output.display()
        );
        display_warnings();
        Ok(())
    }
}

/// All the azimuths from 0 up to (but excluding) a full turn, in
/// `step_radians` increments.
fn gen_azimuths<F: Float + FromPrimitive>(step_radians: f64) -> impl Iterator<Item = F> {
    (0..)
        .map(move |i| step_radians * i as f64)
        .take_while(|theta| *theta < TAU)
        .map(|theta| F::from_f64(theta).unwrap())
}

#[cfg(feature = "plotting")]
mod plot {
    use std::path::Path;

    use plotters::prelude::*;

    use super::HamfieldError;
    use crate::pattern::FieldSample;

    /// Draw the gain pattern as a polar trace on a square bitmap.
    pub(super) fn polar_plot(
        file: &Path,
        title: &str,
        samples: &[(f64, FieldSample)],
    ) -> Result<(), HamfieldError> {
        let max_gain = samples
            .iter()
            .map(|(_, s)| s.directional_gain)
            .fold(f64::EPSILON, f64::max);

        let root = BitMapBackend::new(file, (800, 800)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(20)
            .build_cartesian_2d(-1.1..1.1, -1.1..1.1)?;
        chart.configure_mesh().disable_mesh().draw()?;

        let mut points: Vec<(f64, f64)> = samples
            .iter()
            .map(|(theta, s)| {
                let r = s.directional_gain / max_gain;
                (r * theta.cos(), r * theta.sin())
            })
            .collect();
        // Close the trace.
        if let Some(&first) = points.first() {
            points.push(first);
        }

        chart.draw_series(LineSeries::new(points, &BLUE))?;
        root.present()
            .map_err(|e| HamfieldError::Pattern(e.to_string()))?;
        Ok(())
    }
}
