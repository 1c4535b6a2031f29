// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use itertools::Itertools;
use serde::Serialize;

use super::{display_warnings, HamfieldError, InfoPrinter, Warn};
use crate::skywave::{
    ground_wave_strength, trace_signal_path, Band, PathOutcome, CRITICAL_FREQUENCY_FOF2,
};

/// Trace a skywave hop path and report the MUF.
#[derive(Parser, Debug, Serialize)]
pub(super) struct SkywaveArgs {
    /// The band of the transmitted signal.
    #[clap(short, long, default_value = "hf")]
    band: Band,

    /// Takeoff elevation above the horizon [degrees].
    #[clap(short, long, default_value = "30.0")]
    elevation_deg: f64,

    /// The transmit frequency [MHz].
    #[clap(short, long, default_value = "7.1")]
    freq_mhz: f64,

    /// Height of the reflecting layer [scene units above ground].
    #[clap(long, default_value = "15.0")]
    iono_height: f64,
}

impl SkywaveArgs {
    pub(super) fn run(&self) -> Result<(), HamfieldError> {
        let path = trace_signal_path(
            self.band,
            self.elevation_deg.to_radians(),
            self.freq_mhz,
            self.iono_height,
        );

        let mut printer = InfoPrinter::new("Skywave trace".into());
        printer.push_block(vec![
            format!(
                "{} MHz at {} degrees elevation (foF2 {} MHz)",
                self.freq_mhz, self.elevation_deg, CRITICAL_FREQUENCY_FOF2
            )
            .into(),
            format!("MUF for this takeoff angle: {:.2} MHz", path.muf).into(),
        ]);
        match path.outcome {
            PathOutcome::Penetrated => {
                printer.push_line("The signal penetrates the ionosphere and is lost".into())
            }
            PathOutcome::Escaped => {
                printer.push_line("The signal reflects but escapes without returning".into())
            }
            PathOutcome::HopLimit => printer.push_line(
                format!(
                    "{} ground contact(s); intensities {}",
                    path.bounces.len(),
                    path.bounces
                        .iter()
                        .map(|b| format!("{:.3}", b.intensity))
                        .join(", ")
                )
                .into(),
            ),
        }
        let ground_wave = ground_wave_strength(self.freq_mhz);
        printer.push_line(format!("Relative ground-wave strength: {ground_wave:.1}").into());
        printer.display();

        if self.band == Band::Hf && self.freq_mhz > path.muf {
            format!(
                "{} MHz is above the MUF; lower the frequency or the takeoff angle for a skywave path",
                self.freq_mhz
            )
            .warn();
        }

        display_warnings();
        Ok(())
    }
}
