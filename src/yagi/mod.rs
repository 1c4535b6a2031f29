// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Yagi-Uda dimensioning from the DL6WU/VK5DJ empirical models.
//!
//! A single deterministic pass over the element count: no iteration, no
//! convergence. Lengths and spacings come out in mm for a frequency given
//! in MHz.

mod error;

pub use error::YagiError;

use log::warn;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use vec1::Vec1;

use crate::constants::SPEED_OF_LIGHT_KM_S;

/// Cross-section of the boom. Carried in the config for reporting; the
/// correction models in use don't distinguish the two shapes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BoomShape {
    Round,
    Square,
}

/// How elements are fixed to the boom. This decides the boom-correction
/// factor k; element lengths grow by k * boom diameter to compensate for
/// the boom's loading.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MountMethod {
    ThroughBonded,
    ThroughInsulated,
    AboveBonded,
    AboveInsulated,
    NonMetal,
    /// Short aliases used by the pro-mode controls.
    Bonded,
    Insulated,
    Above,
    None,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DrivenElementType {
    /// Folded dipole. The stated total length already represents the folded
    /// loop, so no feed gap is cut out of it.
    Folded,
    Straight,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SpacingType {
    /// DL6WU tapered spacing.
    Dl6wu,
    /// The same manual spacing between every pair of elements.
    Uniform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ElementRole {
    #[strum(serialize = "REF")]
    #[serde(rename = "REF")]
    Reflector,
    #[strum(serialize = "DE")]
    #[serde(rename = "DE")]
    Driven,
    #[strum(serialize = "DIR")]
    #[serde(rename = "DIR")]
    Director,
}

/// Everything the dimensioning pass needs. All lengths in mm, frequency in
/// MHz, manual spacing in wavelengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YagiConfig {
    pub frequency_mhz: f64,
    pub element_count: usize,
    pub element_diameter_mm: f64,
    pub boom_diameter_mm: f64,
    pub boom_shape: BoomShape,
    pub mount_method: MountMethod,
    pub feed_gap_mm: f64,
    pub driven_element_type: DrivenElementType,
    pub spacing_type: SpacingType,
    pub manual_spacing_lambda: f64,
    pub manual_bc_factor: Option<f64>,
}

/// One element of the finished design. Positions are cumulative from the
/// reflector; cut length is the length to saw after feed-gap adjustment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YagiElement {
    pub role: ElementRole,
    pub name: String,
    pub position_mm: f64,
    pub spacing_mm: f64,
    pub length_mm: f64,
    pub half_length_mm: f64,
    pub cut_length_mm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<DrivenElementType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YagiDesign {
    pub config: YagiConfig,
    /// Reflector, driven element, then directors in increasing distance
    /// from the feed. Never empty.
    pub elements: Vec1<YagiElement>,
    pub total_boom_length_mm: f64,
    /// Coarse heuristic, not EM-simulated.
    pub estimated_gain_dbi: f64,
    pub boom_correction_mm: f64,
    pub bc_factor: f64,
    pub wavelength_mm: f64,
}

/// Boom-correction factor for a mount method, given the boom/element
/// diameter ratio.
///
/// The `through_bonded` branch uses the VK5DJ log model, which has no data
/// for booms thinner than their elements; that degenerate case yields 0 and
/// a warning rather than an invented value.
fn boom_correction_factor(mount: MountMethod, ratio: f64) -> f64 {
    match mount {
        MountMethod::NonMetal | MountMethod::None => 0.0,
        MountMethod::AboveInsulated | MountMethod::AboveBonded | MountMethod::Above => 0.05,
        MountMethod::ThroughInsulated | MountMethod::Insulated => 0.3,
        MountMethod::ThroughBonded | MountMethod::Bonded => {
            if ratio > 1.0 {
                (0.35 + 0.23 * ratio.ln()).min(1.0)
            } else {
                warn!(
                    "Boom is not thicker than its elements (ratio {ratio:.3}); the VK5DJ \
                     correction model has no data here and no correction is applied"
                );
                0.0
            }
        }
    }
}

/// Produce a complete Yagi design from a config. Single pass,
/// O(element count).
pub fn design(config: &YagiConfig) -> Result<YagiDesign, YagiError> {
    if config.element_count < 2 {
        return Err(YagiError::TooFewElements {
            got: config.element_count,
        });
    }
    if config.frequency_mhz <= 0.0 {
        return Err(YagiError::NonPositiveFrequency {
            got: config.frequency_mhz,
        });
    }

    let lambda = SPEED_OF_LIGHT_KM_S / config.frequency_mhz;

    let bc_factor = match config.manual_bc_factor {
        Some(k) => k,
        None => {
            let ratio = if config.element_diameter_mm > 0.0 {
                config.boom_diameter_mm / config.element_diameter_mm
            } else {
                0.0
            };
            boom_correction_factor(config.mount_method, ratio)
        }
    };
    let correction = bc_factor * config.boom_diameter_mm;

    // Reflector.
    let ref_len = 0.495 * lambda + correction;
    let mut elements = Vec1::new(YagiElement {
        role: ElementRole::Reflector,
        name: "Reflector".to_string(),
        position_mm: 0.0,
        spacing_mm: 0.0,
        length_mm: ref_len,
        half_length_mm: ref_len / 2.0,
        cut_length_mm: ref_len,
        gap_mm: None,
        style: None,
    });

    // Driven element.
    let de_spacing = match config.spacing_type {
        SpacingType::Dl6wu => 0.2 * lambda,
        SpacingType::Uniform => config.manual_spacing_lambda * lambda,
    };
    let mut position = de_spacing;

    let de_len = 0.473 * lambda + correction - 0.5 * config.element_diameter_mm;
    let de_cut_len = match config.driven_element_type {
        DrivenElementType::Straight => de_len - config.feed_gap_mm,
        DrivenElementType::Folded => de_len,
    };
    elements.push(YagiElement {
        role: ElementRole::Driven,
        name: "Driven Element".to_string(),
        position_mm: position,
        spacing_mm: de_spacing,
        length_mm: de_len,
        half_length_mm: de_len / 2.0,
        cut_length_mm: de_cut_len,
        gap_mm: Some(config.feed_gap_mm),
        style: Some(config.driven_element_type),
    });

    // Directors.
    for i in 1..=config.element_count.saturating_sub(2) {
        let spacing = match config.spacing_type {
            SpacingType::Uniform => config.manual_spacing_lambda * lambda,
            SpacingType::Dl6wu => director_spacing_factor(i) * lambda,
        };
        position += spacing;

        let len_factor = (0.455 - (i - 1) as f64 * 0.005).max(0.405);
        let dir_len = len_factor * lambda + correction;

        elements.push(YagiElement {
            role: ElementRole::Director,
            name: format!("Director {i}"),
            position_mm: position,
            spacing_mm: spacing,
            length_mm: dir_len,
            half_length_mm: dir_len / 2.0,
            cut_length_mm: dir_len,
            gap_mm: None,
            style: None,
        });
    }

    let estimated_gain_dbi = config.element_count as f64 * 1.2 + 2.15;

    Ok(YagiDesign {
        config: config.clone(),
        elements,
        total_boom_length_mm: position,
        estimated_gain_dbi,
        boom_correction_mm: correction,
        bc_factor,
        wavelength_mm: lambda,
    })
}

/// DL6WU tapered director spacing, in wavelengths, for director `i`
/// (1-based).
fn director_spacing_factor(i: usize) -> f64 {
    match i {
        1 => 0.075,
        2 => 0.18,
        3 => 0.215,
        4 => 0.25,
        _ => (0.28 + (i - 5) as f64 * 0.01).min(0.35),
    }
}
