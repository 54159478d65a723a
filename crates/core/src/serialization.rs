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

//! Serialization helpers for permissive JSON readers.

/// Serde adapter reading a [`rust_decimal::Decimal`] from either a JSON string or number,
/// preserving full precision, and writing it back as a string.
///
/// External order files represent quantities and prices inconsistently; this module
/// normalizes on read rather than keeping parallel schemas.
pub mod decimal_lenient {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes `value` as a decimal string with full precision.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserializes a decimal from a string or a JSON number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a valid decimal string nor a number.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            String(String),
            Number(serde_json::Number),
        }

        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(s) => Decimal::from_str(&s).map_err(Error::custom),
            StringOrNumber::Number(n) => Decimal::from_str(&n.to_string()).map_err(Error::custom),
        }
    }
}

/// Serde adapter for `Option<Decimal>` fields with the same leniency as [`decimal_lenient`].
pub mod decimal_lenient_opt {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes an optional decimal as a string, or null.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&d.to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional decimal from a string, number, or null.
    ///
    /// # Errors
    ///
    /// Returns an error if a present value is neither a valid decimal string nor a number.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            String(String),
            Number(serde_json::Number),
        }

        let raw: Option<Raw> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(Raw::String(s)) => Decimal::from_str(&s).map(Some).map_err(Error::custom),
            Some(Raw::Number(n)) => Decimal::from_str(&n.to_string())
                .map(Some)
                .map_err(Error::custom),
        }
    }
}

/// Serde adapter reading a [`chrono::TimeDelta`] as a whole number of seconds.
///
/// Bar periods are exchanged as integral seconds; sub-second periods are not
/// representable on the wire.
pub mod timedelta_secs {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes `value` as a whole number of seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_seconds())
    }

    /// Deserializes a [`TimeDelta`] from a whole number of seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is out of range.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        TimeDelta::try_seconds(secs)
            .ok_or_else(|| Error::custom(format!("TimeDelta seconds out of range: {secs}")))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        #[serde(with = "super::decimal_lenient")]
        quantity: Decimal,
        #[serde(with = "super::decimal_lenient_opt", default)]
        limit_price: Option<Decimal>,
    }

    #[rstest]
    #[case(r#"{"quantity":"100.25"}"#, dec!(100.25))]
    #[case(r#"{"quantity":100.25}"#, dec!(100.25))]
    #[case(r#"{"quantity":-100}"#, dec!(-100))]
    fn test_decimal_from_string_or_number(#[case] json: &str, #[case] expected: Decimal) {
        let payload: Payload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.quantity, expected);
        assert_eq!(payload.limit_price, None);
    }

    #[rstest]
    fn test_decimal_full_precision_round_trip() {
        let payload = Payload {
            quantity: dec!(0.000000000000000000000000001),
            limit_price: Some(dec!(290.55)),
        };
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
    }

    #[rstest]
    fn test_decimal_rejects_garbage() {
        let result: Result<Payload, _> = serde_json::from_str(r#"{"quantity":"abc"}"#);
        assert!(result.is_err());
    }
}
