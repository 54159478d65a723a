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

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::orders::base::OrderCore;

/// An order which fills at the open of the next regular session after
/// submission.
///
/// Submission is only permitted outside the configured blackout window around
/// the session open; submissions inside it are invalid at evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketOnOpenOrder {
    /// The shared order header.
    #[serde(flatten)]
    pub core: OrderCore,
}

impl MarketOnOpenOrder {
    /// Creates a new [`MarketOnOpenOrder`] instance.
    #[must_use]
    pub const fn new(core: OrderCore) -> Self {
        Self { core }
    }
}

impl Deref for MarketOnOpenOrder {
    type Target = OrderCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for MarketOnOpenOrder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}
