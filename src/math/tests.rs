// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;
use crate::constants::{FRAC_PI_2, PI};

#[test]
fn test_atan2() {
    assert_abs_diff_eq!(atan2(1.0, -1.0), 3.0 / 4.0 * PI);
    assert_abs_diff_eq!(atan2(0.0, 1.0), 0.0);
    assert_abs_diff_eq!(atan2(1.0, 0.0), FRAC_PI_2);
}

#[test]
fn test_cexp() {
    assert_abs_diff_eq!(cexp(0.0).re, 1.0);
    assert_abs_diff_eq!(cexp(0.0).im, 0.0);
    assert_abs_diff_eq!(cexp(PI).re, -1.0);
    assert_abs_diff_eq!(cexp(PI).im, 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(cexp(FRAC_PI_2).re, 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(cexp(FRAC_PI_2).im, 1.0);
}
