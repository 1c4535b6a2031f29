// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with Yagi dimensioning.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum YagiError {
    #[error("A Yagi needs at least a reflector and a driven element (2 elements), but {got} were requested")]
    TooFewElements { got: usize },

    #[error("The design frequency must be positive, but {got} MHz was given")]
    NonPositiveFrequency { got: f64 },
}
