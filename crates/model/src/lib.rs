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

//! Domain model for the Marlin fill simulation engine.
//!
//! The *model* crate defines the types the fill engine operates over:
//!
//! - Identifiers (symbols, order IDs).
//! - Enumerations for the trading domain.
//! - Market data primitives (trade bars, quote bars, ticks).
//! - Securities with exchange hours and a per-security data cache.
//! - Orders as a closed tagged union with per-variant trigger state.
//! - Order events emitted by the fill engine.
//! - Closed trades consumed by the analysis crate.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod data;
pub mod enums;
pub mod events;
pub mod identifiers;
pub mod orders;
pub mod securities;
pub mod trades;

/// Bridges an enum's serde representation through its `strum` string forms,
/// serializing via `AsRef<str>` and deserializing case-insensitively via `FromStr`.
#[macro_export]
macro_rules! enum_strum_serde {
    ($type:ty) => {
        impl serde::Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_ref())
            }
        }

        impl<'de> serde::Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value_str: String = serde::Deserialize::deserialize(deserializer)?;
                std::str::FromStr::from_str(&value_str).map_err(serde::de::Error::custom)
            }
        }
    };
}
