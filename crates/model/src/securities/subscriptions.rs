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

//! Data subscription descriptions resolved per symbol.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    enums::{MarketDataType, Resolution},
    identifiers::Symbol,
};

/// Describes one data subscription a symbol is receiving.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDataConfig {
    /// The subscribed symbol.
    pub symbol: Symbol,
    /// The content type delivered by the subscription.
    pub data_type: MarketDataType,
    /// The sampling resolution of the subscription.
    pub resolution: Resolution,
    /// Whether data outside regular session hours is delivered.
    #[serde(default)]
    pub extended_market_hours: bool,
}

impl SubscriptionDataConfig {
    /// Creates a new [`SubscriptionDataConfig`] instance.
    #[must_use]
    pub const fn new(symbol: Symbol, data_type: MarketDataType, resolution: Resolution) -> Self {
        Self {
            symbol,
            data_type,
            resolution,
            extended_market_hours: false,
        }
    }

    /// Returns whether the subscription delivers quote driven data.
    #[must_use]
    pub const fn is_quote_data(&self) -> bool {
        matches!(
            self.data_type,
            MarketDataType::QuoteBar | MarketDataType::QuoteTick
        )
    }

    /// Returns whether the subscription delivers trade driven data.
    #[must_use]
    pub const fn is_trade_data(&self) -> bool {
        matches!(
            self.data_type,
            MarketDataType::TradeBar | MarketDataType::TradeTick
        )
    }
}

/// Enumerates, per symbol, which data subscriptions exist.
///
/// The subscription plumbing itself is external; the fill engine only asks
/// what is subscribed so it can select the pricing data slice.
pub trait SubscriptionProvider {
    /// Returns the subscriptions active for `symbol`.
    fn configs_for(&self, symbol: &Symbol) -> Vec<SubscriptionDataConfig>;
}

/// A fixed in-memory [`SubscriptionProvider`].
#[derive(Clone, Debug, Default)]
pub struct StaticSubscriptionProvider {
    configs: IndexMap<Symbol, Vec<SubscriptionDataConfig>>,
}

impl StaticSubscriptionProvider {
    /// Creates a new empty [`StaticSubscriptionProvider`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider from a single symbol's subscriptions.
    #[must_use]
    pub fn from_configs(symbol: Symbol, configs: Vec<SubscriptionDataConfig>) -> Self {
        let mut provider = Self::new();
        provider.configs.insert(symbol, configs);
        provider
    }

    /// Adds a subscription for its symbol.
    pub fn add(&mut self, config: SubscriptionDataConfig) {
        self.configs
            .entry(config.symbol.clone())
            .or_default()
            .push(config);
    }
}

impl SubscriptionProvider for StaticSubscriptionProvider {
    fn configs_for(&self, symbol: &Symbol) -> Vec<SubscriptionDataConfig> {
        self.configs.get(symbol).cloned().unwrap_or_default()
    }
}

/// Returns whether any subscription delivers the given content type.
#[must_use]
pub fn is_subscribed(configs: &[SubscriptionDataConfig], data_type: MarketDataType) -> bool {
    configs.iter().any(|config| config.data_type == data_type)
}

/// Returns whether any subscription is at tick resolution.
#[must_use]
pub fn has_tick_subscription(configs: &[SubscriptionDataConfig]) -> bool {
    configs
        .iter()
        .any(|config| config.resolution == Resolution::Tick)
}

/// Returns the finest resolution across the subscriptions, if any exist.
#[must_use]
pub fn finest_resolution(configs: &[SubscriptionDataConfig]) -> Option<Resolution> {
    configs.iter().map(|config| config.resolution).min()
}

/// Returns whether any subscription allows data outside regular hours.
#[must_use]
pub fn allows_extended_hours(configs: &[SubscriptionDataConfig]) -> bool {
    configs.iter().any(|config| config.extended_market_hours)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::data::stubs::spy;

    #[rstest]
    fn test_provider_round_trip(spy: Symbol) {
        let mut provider = StaticSubscriptionProvider::new();
        provider.add(SubscriptionDataConfig::new(
            spy.clone(),
            MarketDataType::TradeBar,
            Resolution::Minute,
        ));
        provider.add(SubscriptionDataConfig::new(
            spy.clone(),
            MarketDataType::QuoteTick,
            Resolution::Tick,
        ));

        let configs = provider.configs_for(&spy);
        assert_eq!(configs.len(), 2);
        assert!(is_subscribed(&configs, MarketDataType::TradeBar));
        assert!(!is_subscribed(&configs, MarketDataType::QuoteBar));
        assert!(has_tick_subscription(&configs));
        assert_eq!(finest_resolution(&configs), Some(Resolution::Tick));
    }

    #[rstest]
    fn test_unknown_symbol_has_no_configs(spy: Symbol) {
        let provider = StaticSubscriptionProvider::new();
        assert!(provider.configs_for(&spy).is_empty());
    }
}
