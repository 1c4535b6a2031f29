// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all hamfield-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use crate::yagi::YagiError;

const URL: &str = "https://github.com/hamfield/hamfield";

/// The *only* publicly visible error from hamfield. Each error message
/// should include the URL, unless it's "generic".
#[derive(Error, Debug)]
pub enum HamfieldError {
    /// An error related to yagi dimensioning.
    #[error("{0}\n\nSee for more info: {URL}/blob/main/docs/yagi.md")]
    Yagi(String),

    /// An error related to pattern evaluation.
    #[error("{0}\n\nSee for more info: {URL}/blob/main/docs/pattern.md")]
    Pattern(String),

    /// An error related to field sampling.
    #[error("{0}\n\nSee for more info: {URL}/blob/main/docs/sample_field.md")]
    SampleField(String),

    /// A generic error.
    #[error("{0}")]
    Generic(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

impl From<YagiError> for HamfieldError {
    fn from(e: YagiError) -> Self {
        Self::Yagi(e.to_string())
    }
}

#[cfg(feature = "plotting")]
impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for HamfieldError
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Self::Pattern(e.to_string())
    }
}
