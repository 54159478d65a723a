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

//! Fill model engine for the Marlin simulation core.
//!
//! The *execution* crate decides, at each data arrival, whether an open order
//! becomes fillable, at what price and quantity, and emits the order event
//! describing the transition:
//!
//! - Price snapshot extraction with direction dependent quote side selection.
//! - Freshness and session gating of cached data.
//! - Trailing stop/limit state updates.
//! - One fill evaluator per order variant, dispatched by tag.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod error;
pub mod freshness;
pub mod prices;
pub mod trailing;

pub use config::{FillEngineConfig, PriceMode};
pub use engine::{FillEngine, FillResult};
pub use error::FillError;
