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

//! Represents a canonical symbol ID for a tradable instrument.

use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
};

use marlin_core::correctness::{FAILED, check_valid_string};
use serde::{Deserialize, Serialize};
use ustr::Ustr;

use crate::enums::SecurityType;

/// Represents a canonical symbol ID for a tradable instrument.
///
/// Equality and hashing consider the canonical `value` only; the security type,
/// market, and underlying are carried metadata.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    /// The canonical identifier value.
    #[serde(alias = "Value")]
    value: Ustr,
    /// The security type of the instrument.
    #[serde(alias = "SecurityType")]
    pub security_type: SecurityType,
    /// The market (venue) the instrument trades on.
    #[serde(alias = "Market")]
    pub market: Ustr,
    /// The canonical identifier of the underlying, for derivative instruments.
    #[serde(alias = "Underlying", default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<Ustr>,
}

impl Symbol {
    /// Creates a new [`Symbol`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` or `market` is not a valid string.
    pub fn new_checked<T: AsRef<str>>(
        value: T,
        security_type: SecurityType,
        market: T,
    ) -> anyhow::Result<Self> {
        check_valid_string(&value, stringify!(value))?;
        check_valid_string(&market, stringify!(market))?;
        Ok(Self {
            value: Ustr::from(value.as_ref()),
            security_type,
            market: Ustr::from(market.as_ref()),
            underlying: None,
        })
    }

    /// Creates a new [`Symbol`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `value` or `market` is not a valid string.
    pub fn new<T: AsRef<str>>(value: T, security_type: SecurityType, market: T) -> Self {
        Self::new_checked(value, security_type, market).expect(FAILED)
    }

    /// Returns a copy of the symbol with the given underlying canonical ID attached.
    #[must_use]
    pub fn with_underlying<T: AsRef<str>>(mut self, underlying: T) -> Self {
        self.underlying = Some(Ustr::from(underlying.as_ref()));
        self
    }

    /// Returns the canonical identifier value.
    #[must_use]
    pub fn value(&self) -> Ustr {
        self.value
    }

    /// Returns the canonical identifier value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_symbol_equality_by_canonical_id() {
        let a = Symbol::new("SPY", SecurityType::Equity, "usa");
        let b = Symbol::new("SPY", SecurityType::Index, "other");
        assert_eq!(a, b);
    }

    #[rstest]
    fn test_symbol_hash_stable_across_metadata() {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher_a = DefaultHasher::new();
        let mut hasher_b = DefaultHasher::new();
        Symbol::new("BTCUSD", SecurityType::Crypto, "coinbase").hash(&mut hasher_a);
        Symbol::new("BTCUSD", SecurityType::CryptoFuture, "binance").hash(&mut hasher_b);
        assert_eq!(hasher_a.finish(), hasher_b.finish());
    }

    #[rstest]
    fn test_symbol_new_invalid_value_fails() {
        assert!(Symbol::new_checked("", SecurityType::Equity, "usa").is_err());
    }

    #[rstest]
    fn test_symbol_with_underlying() {
        let option = Symbol::new("SPY 240119C00450000", SecurityType::Option, "usa")
            .with_underlying("SPY");
        assert_eq!(option.underlying.unwrap().as_str(), "SPY");
    }

    #[rstest]
    fn test_symbol_serde_accepts_pascal_case() {
        let json = r#"{"Value":"SPY","SecurityType":"EQUITY","Market":"usa"}"#;
        let symbol: Symbol = serde_json::from_str(json).unwrap();
        assert_eq!(symbol.as_str(), "SPY");
        assert_eq!(symbol.security_type, SecurityType::Equity);
    }
}
