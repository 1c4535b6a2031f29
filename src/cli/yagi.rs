// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use log::debug;
use serde::Serialize;

use super::{display_warnings, HamfieldError, InfoPrinter};
use crate::yagi::{
    design, BoomShape, DrivenElementType, MountMethod, SpacingType, YagiConfig, YagiDesign,
};

/// Dimension a Yagi-Uda antenna.
#[derive(Parser, Debug, Serialize)]
pub(super) struct YagiArgs {
    /// The design frequency [MHz].
    #[clap(short, long, default_value = "144.1")]
    freq_mhz: f64,

    /// Total element count, including the reflector and driven element.
    #[clap(short, long, default_value = "5")]
    elements: usize,

    /// Element diameter [mm].
    #[clap(long, default_value = "4")]
    element_diameter: f64,

    /// Boom diameter [mm].
    #[clap(long, default_value = "20")]
    boom_diameter: f64,

    /// Boom cross-section (round or square).
    #[clap(long, default_value = "round")]
    boom_shape: BoomShape,

    /// How elements are mounted to the boom; decides the boom-correction
    /// factor.
    #[clap(short, long, default_value = "through_bonded")]
    mount: MountMethod,

    /// Feed-point gap of a straight driven element [mm].
    #[clap(long, default_value = "10")]
    feed_gap: f64,

    /// Driven element style (folded or straight).
    #[clap(long, default_value = "folded")]
    driven_element: DrivenElementType,

    /// Element spacing model (dl6wu or uniform).
    #[clap(long, default_value = "dl6wu")]
    spacing: SpacingType,

    /// Spacing between all elements [wavelengths], used with uniform
    /// spacing.
    #[clap(long, default_value = "0.15")]
    uniform_spacing: f64,

    /// Override the boom-correction factor k instead of deriving it from
    /// the mount method.
    #[clap(long)]
    bc_factor: Option<f64>,

    /// Also write the design to a JSON file.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl YagiArgs {
    pub(super) fn run(&self, dry_run: bool) -> Result<(), HamfieldError> {
        let config = YagiConfig {
            frequency_mhz: self.freq_mhz,
            element_count: self.elements,
            element_diameter_mm: self.element_diameter,
            boom_diameter_mm: self.boom_diameter,
            boom_shape: self.boom_shape,
            mount_method: self.mount,
            feed_gap_mm: self.feed_gap,
            driven_element_type: self.driven_element,
            spacing_type: self.spacing,
            manual_spacing_lambda: self.uniform_spacing,
            manual_bc_factor: self.bc_factor,
        };
        debug!("Yagi config: {config:?}");

        let yagi = design(&config)?;
        print_design(&yagi);

        if dry_run {
            display_warnings();
            return Ok(());
        }

        if let Some(output) = &self.output {
            let f = BufWriter::new(File::create(output)?);
            serde_json::to_writer_pretty(f, &yagi)
                .map_err(|e| HamfieldError::Yagi(e.to_string()))?;
            log::info!("Wrote design to {}", output.display());
        }

        display_warnings();
        Ok(())
    }
}

fn print_design(yagi: &YagiDesign) {
    let mut printer = InfoPrinter::new(
        format!("{}-element Yagi at {} MHz", yagi.config.element_count, yagi.config.frequency_mhz)
            .into(),
    );
    printer.push_block(vec![
        format!("Wavelength: {:.1} mm", yagi.wavelength_mm).into(),
        format!(
            "Boom correction: k = {:.3}, {:.1} mm per element",
            yagi.bc_factor, yagi.boom_correction_mm
        )
        .into(),
        format!("Estimated gain: {:.2} dBi", yagi.estimated_gain_dbi).into(),
    ]);
    for element in yagi.elements.iter() {
        printer.push_block(vec![
            format!("{:>3} {}", element.role, element.name).into(),
            format!(
                "position {:8.1} mm, spacing {:7.1} mm",
                element.position_mm, element.spacing_mm
            )
            .into(),
            format!(
                "length {:8.1} mm, cut {:8.1} mm",
                element.length_mm, element.cut_length_mm
            )
            .into(),
        ]);
    }
    printer.push_line(format!("Total boom length: {:.1} mm", yagi.total_boom_length_mm).into());
    printer.display();
}
