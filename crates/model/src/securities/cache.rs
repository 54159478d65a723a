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

//! The per-security market data cache read by the fill engine.

use chrono::{DateTime, Utc};

use crate::{
    data::{MarketData, QuoteBar, Tick, TradeBar},
    enums::TickType,
};

/// Holds the most recent market data per type for a single security.
///
/// The cache is owned exclusively by its [`Security`](crate::securities::Security)
/// and mutated by exactly one data-feed thread.
#[derive(Clone, Debug, Default)]
pub struct SecurityCache {
    trade_bar: Option<TradeBar>,
    quote_bar: Option<QuoteBar>,
    trade_tick: Option<Tick>,
    quote_tick: Option<Tick>,
    open_interest: Option<Tick>,
}

impl SecurityCache {
    /// Creates a new empty [`SecurityCache`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` in the slot for its type, replacing any prior datum.
    pub fn update(&mut self, data: MarketData) {
        match data {
            MarketData::TradeBar(bar) => self.trade_bar = Some(bar),
            MarketData::QuoteBar(bar) => self.quote_bar = Some(bar),
            MarketData::Tick(tick) => match tick.tick_type {
                TickType::Trade => self.trade_tick = Some(tick),
                TickType::Quote => self.quote_tick = Some(tick),
                TickType::OpenInterest => self.open_interest = Some(tick),
            },
        }
    }

    /// Returns the most recent trade bar, if any.
    #[must_use]
    pub const fn trade_bar(&self) -> Option<&TradeBar> {
        self.trade_bar.as_ref()
    }

    /// Returns the most recent quote bar, if any.
    #[must_use]
    pub const fn quote_bar(&self) -> Option<&QuoteBar> {
        self.quote_bar.as_ref()
    }

    /// Returns the most recent trade tick, if any.
    #[must_use]
    pub const fn trade_tick(&self) -> Option<&Tick> {
        self.trade_tick.as_ref()
    }

    /// Returns the most recent quote tick, if any.
    #[must_use]
    pub const fn quote_tick(&self) -> Option<&Tick> {
        self.quote_tick.as_ref()
    }

    /// Returns the most recent open interest tick, if any.
    #[must_use]
    pub const fn open_interest(&self) -> Option<&Tick> {
        self.open_interest.as_ref()
    }

    /// Returns whether any price-bearing data has been cached.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.trade_bar.is_some()
            || self.quote_bar.is_some()
            || self.trade_tick.is_some()
            || self.quote_tick.is_some()
    }

    /// Returns the end time and fill-forward flag of the most recent
    /// price-bearing datum in the cache.
    #[must_use]
    pub fn last_update(&self) -> Option<(DateTime<Utc>, bool)> {
        let mut latest: Option<(DateTime<Utc>, bool)> = None;
        let mut consider = |end: DateTime<Utc>, is_fill_forward: bool| match latest {
            Some((current, _)) if end <= current => {}
            _ => latest = Some((end, is_fill_forward)),
        };

        if let Some(bar) = &self.trade_bar {
            consider(bar.end_time(), bar.is_fill_forward);
        }
        if let Some(bar) = &self.quote_bar {
            consider(bar.end_time(), bar.is_fill_forward);
        }
        if let Some(tick) = &self.trade_tick {
            consider(tick.time, tick.is_fill_forward);
        }
        if let Some(tick) = &self.quote_tick {
            consider(tick.time, tick.is_fill_forward);
        }

        latest
    }
}
