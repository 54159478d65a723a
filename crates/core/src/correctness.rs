// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Functions for correctness checks similar to the *design by contract* philosophy.
//!
//! A condition is a predicate which must be true just prior to the execution of
//! some section of code - for correct behavior as per the design specification.
//!
//! An [`anyhow::Result`] is returned with a descriptive message when the
//! condition check fails.

use rust_decimal::Decimal;

/// A message prefix that can be used with calls to `expect` or other assertion-related functions.
pub const FAILED: &str = "Condition failed";

/// Checks the `predicate` is true.
///
/// # Errors
///
/// Returns an error if the validation check fails.
#[inline(always)]
pub fn check_predicate_true(predicate: bool, fail_msg: &str) -> anyhow::Result<()> {
    if !predicate {
        anyhow::bail!("{fail_msg}")
    }
    Ok(())
}

/// Checks the string `s` has semantic meaning and contains only ASCII characters.
///
/// # Errors
///
/// This function returns an error:
/// - If `s` is an empty string.
/// - If `s` consists solely of whitespace characters.
/// - If `s` contains one or more non-ASCII characters.
#[inline(always)]
pub fn check_valid_string<T: AsRef<str>>(s: T, param: &str) -> anyhow::Result<()> {
    let s = s.as_ref();

    if s.is_empty() {
        anyhow::bail!("invalid string for '{param}', was empty");
    }

    let mut has_non_whitespace = false;
    for c in s.chars() {
        if !c.is_whitespace() {
            has_non_whitespace = true;
        }
        if !c.is_ascii() {
            anyhow::bail!("invalid string for '{param}' contained a non-ASCII char, was '{s}'");
        }
    }

    if !has_non_whitespace {
        anyhow::bail!("invalid string for '{param}', was all whitespace");
    }

    Ok(())
}

/// Checks the decimal `value` is positive (> 0).
///
/// # Errors
///
/// Returns an error if the validation check fails.
#[inline(always)]
pub fn check_positive_decimal(value: Decimal, param: &str) -> anyhow::Result<()> {
    if value <= Decimal::ZERO {
        anyhow::bail!("invalid decimal for '{param}' not positive, was {value}")
    }
    Ok(())
}

/// Checks the decimal `value` is non-zero.
///
/// # Errors
///
/// Returns an error if the validation check fails.
#[inline(always)]
pub fn check_nonzero_decimal(value: Decimal, param: &str) -> anyhow::Result<()> {
    if value.is_zero() {
        anyhow::bail!("invalid decimal for '{param}' was zero")
    }
    Ok(())
}

/// Checks the decimal `value` is non-negative (>= 0).
///
/// # Errors
///
/// Returns an error if the validation check fails.
#[inline(always)]
pub fn check_non_negative_decimal(value: Decimal, param: &str) -> anyhow::Result<()> {
    if value < Decimal::ZERO {
        anyhow::bail!("invalid decimal for '{param}' negative, was {value}")
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    #[case(false, "predicate was false")]
    fn test_check_predicate_true_fails(#[case] predicate: bool, #[case] fail_msg: &str) {
        assert!(check_predicate_true(predicate, fail_msg).is_err());
    }

    #[rstest]
    fn test_check_predicate_true_ok() {
        assert!(check_predicate_true(true, "this should not fail").is_ok());
    }

    #[rstest]
    #[case("")]
    #[case(" ")]
    #[case("  \t")]
    #[case("marlín")]
    fn test_check_valid_string_fails(#[case] s: &str) {
        assert!(check_valid_string(s, "value").is_err());
    }

    #[rstest]
    #[case("AUD/USD")]
    #[case("SPY")]
    fn test_check_valid_string_ok(#[case] s: &str) {
        assert!(check_valid_string(s, "value").is_ok());
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-0.01))]
    fn test_check_positive_decimal_fails(#[case] value: rust_decimal::Decimal) {
        assert!(check_positive_decimal(value, "value").is_err());
    }

    #[rstest]
    fn test_check_positive_decimal_ok() {
        assert!(check_positive_decimal(dec!(101.5), "value").is_ok());
    }

    #[rstest]
    fn test_check_nonzero_decimal() {
        assert!(check_nonzero_decimal(dec!(0.0), "quantity").is_err());
        assert!(check_nonzero_decimal(dec!(-100), "quantity").is_ok());
    }

    #[rstest]
    fn test_check_non_negative_decimal() {
        assert!(check_non_negative_decimal(dec!(-1), "fee").is_err());
        assert!(check_non_negative_decimal(dec!(0), "fee").is_ok());
    }
}
