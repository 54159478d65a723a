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

//! The flat performance panel computed over a closed trade sequence.

use chrono::{DateTime, TimeDelta, Utc};
use marlin_model::trades::Trade;
use rust_decimal::{Decimal, MathematicalOps};

/// The cap applied to ratio statistics whose denominator is empty.
const RATIO_CAP: Decimal = Decimal::TEN;

/// The performance panel computed over an ordered sequence of closed trades.
///
/// An empty sequence produces zeros throughout with `None` timestamps. Full
/// precision is kept internally; banker's rounding belongs at presentation
/// boundaries only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeStatistics {
    /// The entry time of the first trade.
    pub start_time: Option<DateTime<Utc>>,
    /// The exit time of the last trade.
    pub end_time: Option<DateTime<Utc>>,
    /// The number of trades in the sequence.
    pub total: usize,
    /// Trades with positive profit or an explicit win marker.
    pub winning: usize,
    /// Non-winning trades with non-zero profit/loss.
    pub losing: usize,
    /// The sum of profit/loss over every trade.
    pub total_profit_loss: Decimal,
    /// The sum of profit/loss over winning trades.
    pub total_profit: Decimal,
    /// The sum of profit/loss over losing trades (non-positive).
    pub total_loss: Decimal,
    /// The sum of fees over every trade.
    pub total_fees: Decimal,
    /// The largest single-trade profit.
    pub largest_profit: Decimal,
    /// The largest single-trade loss (most negative).
    pub largest_loss: Decimal,
    /// The most adverse excursion across trades (most negative).
    pub largest_mae: Decimal,
    /// The most favorable excursion across trades.
    pub largest_mfe: Decimal,
    /// The mean profit/loss across every trade.
    pub average_profit_loss: Decimal,
    /// The mean profit across winning trades.
    pub average_profit: Decimal,
    /// The mean loss across losing trades (non-positive).
    pub average_loss: Decimal,
    /// The mean maximum adverse excursion.
    pub average_mae: Decimal,
    /// The mean maximum favorable excursion.
    pub average_mfe: Decimal,
    /// The mean of profit/loss minus favorable excursion.
    pub average_end_trade_drawdown: Decimal,
    /// The mean holding time across every trade.
    pub average_trade_duration: TimeDelta,
    /// The mean holding time across winning trades.
    pub average_winning_trade_duration: TimeDelta,
    /// The mean holding time across losing trades.
    pub average_losing_trade_duration: TimeDelta,
    /// The longest interval the running profit/loss spent at or below a
    /// prior peak.
    pub maximum_drawdown_duration: TimeDelta,
    /// The longest run of consecutive winning trades.
    pub max_consecutive_winning_trades: usize,
    /// The longest run of consecutive losing trades.
    pub max_consecutive_losing_trades: usize,
    /// Winning trades over total trades.
    pub win_rate: Decimal,
    /// One minus the win rate (zero for an empty sequence).
    pub loss_rate: Decimal,
    /// Average profit over the absolute average loss; zero without losers.
    pub profit_loss_ratio: Decimal,
    /// Winner count over loser count, capped at 10 without losers.
    pub win_loss_ratio: Decimal,
    /// Total profit over the absolute total loss, capped at 10 without
    /// losers; zero without winners.
    pub profit_factor: Decimal,
    /// Total profit/loss over the absolute maximum closed trade drawdown.
    pub profit_to_max_drawdown_ratio: Decimal,
    /// The standard deviation of per-trade profit/loss.
    pub profit_loss_standard_deviation: Decimal,
    /// The standard deviation of losing trades' profit/loss.
    pub profit_loss_downside_deviation: Decimal,
    /// Mean profit/loss over its standard deviation; zero when flat.
    pub sharpe_ratio: Decimal,
    /// Mean profit/loss over the downside deviation; zero when flat.
    pub sortino_ratio: Decimal,
    /// The deepest peak-to-trough fall of the running closed profit/loss.
    pub maximum_closed_trade_drawdown: Decimal,
    /// The deepest in-trade excursion spread, the minimum of MAE minus MFE.
    pub maximum_intra_trade_drawdown: Decimal,
    /// The worst give-back between a trade's best price and its exit.
    pub maximum_end_trade_drawdown: Decimal,
}

impl Default for TradeStatistics {
    fn default() -> Self {
        Self {
            start_time: None,
            end_time: None,
            total: 0,
            winning: 0,
            losing: 0,
            total_profit_loss: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            total_loss: Decimal::ZERO,
            total_fees: Decimal::ZERO,
            largest_profit: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
            largest_mae: Decimal::ZERO,
            largest_mfe: Decimal::ZERO,
            average_profit_loss: Decimal::ZERO,
            average_profit: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            average_mae: Decimal::ZERO,
            average_mfe: Decimal::ZERO,
            average_end_trade_drawdown: Decimal::ZERO,
            average_trade_duration: TimeDelta::zero(),
            average_winning_trade_duration: TimeDelta::zero(),
            average_losing_trade_duration: TimeDelta::zero(),
            maximum_drawdown_duration: TimeDelta::zero(),
            max_consecutive_winning_trades: 0,
            max_consecutive_losing_trades: 0,
            win_rate: Decimal::ZERO,
            loss_rate: Decimal::ZERO,
            profit_loss_ratio: Decimal::ZERO,
            win_loss_ratio: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            profit_to_max_drawdown_ratio: Decimal::ZERO,
            profit_loss_standard_deviation: Decimal::ZERO,
            profit_loss_downside_deviation: Decimal::ZERO,
            sharpe_ratio: Decimal::ZERO,
            sortino_ratio: Decimal::ZERO,
            maximum_closed_trade_drawdown: Decimal::ZERO,
            maximum_intra_trade_drawdown: Decimal::ZERO,
            maximum_end_trade_drawdown: Decimal::ZERO,
        }
    }
}

impl TradeStatistics {
    /// Computes the panel over an ordered sequence of closed trades.
    #[must_use]
    pub fn from_trades(trades: &[Trade]) -> Self {
        if trades.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            start_time: trades.first().map(|t| t.entry_time),
            end_time: trades.last().map(|t| t.exit_time),
            total: trades.len(),
            ..Default::default()
        };

        let mut total_duration = TimeDelta::zero();
        let mut winning_duration = TimeDelta::zero();
        let mut losing_duration = TimeDelta::zero();
        let mut consecutive_winners = 0usize;
        let mut consecutive_losers = 0usize;

        // Running-sum state for closed trade drawdown tracking
        let mut cumulative = Decimal::ZERO;
        let mut peak = Decimal::ZERO;
        let mut peak_time = trades[0].entry_time;

        for trade in trades {
            let pl = trade.profit_loss;
            stats.total_profit_loss += pl;
            stats.total_fees += trade.total_fees;
            total_duration += trade.duration();

            if trade.is_winner() {
                stats.winning += 1;
                stats.total_profit += pl;
                stats.largest_profit = stats.largest_profit.max(pl);
                winning_duration += trade.duration();
                consecutive_winners += 1;
                consecutive_losers = 0;
            } else if trade.is_loser() {
                stats.losing += 1;
                stats.total_loss += pl;
                stats.largest_loss = stats.largest_loss.min(pl);
                losing_duration += trade.duration();
                consecutive_losers += 1;
                consecutive_winners = 0;
            } else {
                consecutive_winners = 0;
                consecutive_losers = 0;
            }
            stats.max_consecutive_winning_trades = stats
                .max_consecutive_winning_trades
                .max(consecutive_winners);
            stats.max_consecutive_losing_trades =
                stats.max_consecutive_losing_trades.max(consecutive_losers);

            stats.largest_mae = stats.largest_mae.min(trade.mae);
            stats.largest_mfe = stats.largest_mfe.max(trade.mfe);
            stats.average_mae += trade.mae;
            stats.average_mfe += trade.mfe;
            stats.average_end_trade_drawdown += trade.end_trade_drawdown();
            stats.maximum_intra_trade_drawdown = stats
                .maximum_intra_trade_drawdown
                .min(trade.mae - trade.mfe);
            stats.maximum_end_trade_drawdown = stats
                .maximum_end_trade_drawdown
                .min(trade.end_trade_drawdown());

            cumulative += pl;
            if cumulative > peak {
                peak = cumulative;
                peak_time = trade.exit_time;
            } else {
                stats.maximum_closed_trade_drawdown = stats
                    .maximum_closed_trade_drawdown
                    .min(cumulative - peak);
                let underwater = trade.exit_time - peak_time;
                if underwater > stats.maximum_drawdown_duration {
                    stats.maximum_drawdown_duration = underwater;
                }
            }
        }

        let total = Decimal::from(stats.total as u64);
        stats.average_profit_loss = stats.total_profit_loss / total;
        stats.average_mae /= total;
        stats.average_mfe /= total;
        stats.average_end_trade_drawdown /= total;
        stats.average_trade_duration = total_duration / stats.total as i32;
        if stats.winning > 0 {
            stats.average_profit = stats.total_profit / Decimal::from(stats.winning as u64);
            stats.average_winning_trade_duration = winning_duration / stats.winning as i32;
        }
        if stats.losing > 0 {
            stats.average_loss = stats.total_loss / Decimal::from(stats.losing as u64);
            stats.average_losing_trade_duration = losing_duration / stats.losing as i32;
        }

        stats.win_rate = Decimal::from(stats.winning as u64) / total;
        stats.loss_rate = Decimal::ONE - stats.win_rate;

        stats.profit_loss_ratio = if stats.losing == 0 {
            Decimal::ZERO
        } else {
            stats.average_profit / stats.average_loss.abs()
        };
        stats.win_loss_ratio = if stats.losing == 0 {
            if stats.winning > 0 { RATIO_CAP } else { Decimal::ZERO }
        } else {
            Decimal::from(stats.winning as u64) / Decimal::from(stats.losing as u64)
        };
        stats.profit_factor = if stats.winning == 0 {
            Decimal::ZERO
        } else if stats.losing == 0 {
            RATIO_CAP
        } else {
            stats.total_profit / stats.total_loss.abs()
        };

        stats.profit_loss_standard_deviation = standard_deviation(
            trades.iter().map(|t| t.profit_loss),
            stats.average_profit_loss,
            stats.total,
        );
        let losing_pls: Vec<Decimal> = trades
            .iter()
            .filter(|t| t.is_loser())
            .map(|t| t.profit_loss)
            .collect();
        stats.profit_loss_downside_deviation = standard_deviation(
            losing_pls.iter().copied(),
            stats.average_loss,
            losing_pls.len(),
        );

        stats.sharpe_ratio = if stats.profit_loss_standard_deviation.is_zero() {
            Decimal::ZERO
        } else {
            stats.average_profit_loss / stats.profit_loss_standard_deviation
        };
        stats.sortino_ratio = if stats.profit_loss_downside_deviation.is_zero() {
            Decimal::ZERO
        } else {
            stats.average_profit_loss / stats.profit_loss_downside_deviation
        };

        stats.profit_to_max_drawdown_ratio = if stats.maximum_closed_trade_drawdown.is_zero() {
            if stats.total_profit_loss > Decimal::ZERO {
                RATIO_CAP
            } else {
                Decimal::ZERO
            }
        } else {
            stats.total_profit_loss / stats.maximum_closed_trade_drawdown.abs()
        };

        stats
    }
}

/// The sample standard deviation of `values` around `mean`; zero below two
/// observations.
fn standard_deviation(
    values: impl Iterator<Item = Decimal>,
    mean: Decimal,
    count: usize,
) -> Decimal {
    if count < 2 {
        return Decimal::ZERO;
    }
    let sum_squares: Decimal = values.map(|value| (value - mean) * (value - mean)).sum();
    let variance = sum_squares / Decimal::from(count as u64 - 1);
    variance.sqrt().unwrap_or_default()
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use marlin_model::{enums::{SecurityType, TradeDirection}, identifiers::Symbol};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn spy() -> Symbol {
        Symbol::new("SPY", SecurityType::Equity, "usa")
    }

    /// Builds an hour-long trade starting `offset_hours` after the session base.
    fn trade(
        offset_hours: i64,
        profit_loss: Decimal,
        mae: Decimal,
        mfe: Decimal,
        fees: Decimal,
    ) -> Trade {
        let entry = Utc.with_ymd_and_hms(2024, 6, 3, 14, 0, 0).unwrap()
            + TimeDelta::hours(offset_hours);
        Trade {
            symbol: spy(),
            entry_time: entry,
            entry_price: dec!(100),
            exit_time: entry + TimeDelta::hours(1),
            exit_price: dec!(100) + profit_loss / dec!(10),
            direction: TradeDirection::Long,
            quantity: dec!(10),
            profit_loss,
            total_fees: fees,
            mae,
            mfe,
            is_win: None,
        }
    }

    #[rstest]
    fn test_empty_sequence_is_all_zeros() {
        let stats = TradeStatistics::from_trades(&[]);
        assert_eq!(stats, TradeStatistics::default());
        assert_eq!(stats.start_time, None);
        assert_eq!(stats.end_time, None);
        assert_eq!(stats.average_trade_duration, TimeDelta::zero());
    }

    #[rstest]
    fn test_three_long_winners_panel() {
        // Seed case: PLs [20, 20, 10], MAEs [-5, -30, -15], MFEs [30, 40, 30],
        // fees 2 each
        let trades = vec![
            trade(0, dec!(20), dec!(-5), dec!(30), dec!(2)),
            trade(2, dec!(20), dec!(-30), dec!(40), dec!(2)),
            trade(4, dec!(10), dec!(-15), dec!(30), dec!(2)),
        ];
        let stats = TradeStatistics::from_trades(&trades);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.winning, 3);
        assert_eq!(stats.losing, 0);
        assert_eq!(stats.total_profit_loss, dec!(50));
        assert_eq!(stats.total_profit, dec!(50));
        assert_eq!(stats.total_loss, dec!(0));
        assert_eq!(stats.total_fees, dec!(6));
        assert_eq!(stats.largest_profit, dec!(20));
        assert_eq!(stats.largest_loss, dec!(0));
        assert_eq!(stats.largest_mae, dec!(-30));
        assert_eq!(stats.largest_mfe, dec!(40));
        assert_eq!(stats.win_rate, dec!(1));
        assert_eq!(stats.loss_rate, dec!(0));
        assert_eq!(stats.profit_factor, dec!(10));
        assert_eq!(stats.win_loss_ratio, dec!(10));
        assert_eq!(stats.maximum_intra_trade_drawdown, dec!(-70));
        assert_eq!(stats.max_consecutive_winning_trades, 3);
        assert_eq!(stats.max_consecutive_losing_trades, 0);

        let third = dec!(50) / dec!(3);
        assert_eq!(stats.average_profit_loss, third);
        assert_eq!(stats.average_profit, third);

        // Sample standard deviation of [20, 20, 10] is sqrt(100/3)
        let expected_std = (dec!(100) / dec!(3)).sqrt().unwrap();
        assert!((stats.profit_loss_standard_deviation - expected_std).abs() < dec!(0.0001));
        assert!((stats.profit_loss_standard_deviation - dec!(5.7735)).abs() < dec!(0.001));
        assert!((stats.sharpe_ratio - dec!(2.8868)).abs() < dec!(0.001));

        // No losers: downside statistics collapse to zero
        assert_eq!(stats.profit_loss_downside_deviation, dec!(0));
        assert_eq!(stats.sortino_ratio, dec!(0));

        // Running sum never falls below a prior peak
        assert_eq!(stats.maximum_closed_trade_drawdown, dec!(0));
        assert_eq!(stats.profit_to_max_drawdown_ratio, dec!(10));

        assert_eq!(stats.average_trade_duration, TimeDelta::hours(1));
        assert_eq!(stats.average_winning_trade_duration, TimeDelta::hours(1));
        assert_eq!(stats.average_losing_trade_duration, TimeDelta::zero());
    }

    #[rstest]
    fn test_mixed_winners_and_losers() {
        let trades = vec![
            trade(0, dec!(30), dec!(-5), dec!(35), dec!(1)),
            trade(2, dec!(-20), dec!(-25), dec!(5), dec!(1)),
            trade(4, dec!(-10), dec!(-12), dec!(2), dec!(1)),
            trade(6, dec!(40), dec!(-8), dec!(45), dec!(1)),
        ];
        let stats = TradeStatistics::from_trades(&trades);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.winning, 2);
        assert_eq!(stats.losing, 2);
        assert_eq!(stats.total_profit, dec!(70));
        assert_eq!(stats.total_loss, dec!(-30));
        assert_eq!(stats.average_profit, dec!(35));
        assert_eq!(stats.average_loss, dec!(-15));
        assert_eq!(stats.profit_loss_ratio, dec!(35) / dec!(15));
        assert_eq!(stats.win_loss_ratio, dec!(1));
        assert_eq!(stats.profit_factor, dec!(70) / dec!(30));
        assert_eq!(stats.win_rate, dec!(0.5));
        assert_eq!(stats.loss_rate, dec!(0.5));
        assert_eq!(stats.max_consecutive_winning_trades, 1);
        assert_eq!(stats.max_consecutive_losing_trades, 2);

        // The running sum peaks at 30, troughs at 0: drawdown is -30
        assert_eq!(stats.maximum_closed_trade_drawdown, dec!(-30));
        // Underwater from the first exit until the final recovery
        assert_eq!(stats.maximum_drawdown_duration, TimeDelta::hours(4));
        assert_eq!(
            stats.profit_to_max_drawdown_ratio,
            dec!(40) / dec!(30),
        );
    }

    #[rstest]
    fn test_all_losers_has_zero_profit_factor() {
        let trades = vec![
            trade(0, dec!(-10), dec!(-12), dec!(2), dec!(1)),
            trade(2, dec!(-5), dec!(-8), dec!(1), dec!(1)),
        ];
        let stats = TradeStatistics::from_trades(&trades);
        assert_eq!(stats.profit_factor, dec!(0));
        assert_eq!(stats.win_loss_ratio, dec!(0));
        assert_eq!(stats.win_rate, dec!(0));
        assert_eq!(stats.loss_rate, dec!(1));
        assert_eq!(stats.largest_loss, dec!(-10));
        assert!(stats.sortino_ratio < dec!(0));
    }

    #[rstest]
    fn test_explicit_win_marker_overrides_sign() {
        // A scratch trade marked as a win (for example a fee rebate)
        let mut marked = trade(0, dec!(-1), dec!(-2), dec!(1), dec!(0));
        marked.is_win = Some(true);
        let stats = TradeStatistics::from_trades(&[marked]);
        assert_eq!(stats.winning, 1);
        assert_eq!(stats.losing, 0);
    }

    #[rstest]
    fn test_zero_profit_trade_counts_in_neither_bucket() {
        let stats = TradeStatistics::from_trades(&[trade(0, dec!(0), dec!(-2), dec!(1), dec!(1))]);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.winning, 0);
        assert_eq!(stats.losing, 0);
    }

    #[rstest]
    fn test_end_trade_drawdown_statistics() {
        let trades = vec![
            trade(0, dec!(20), dec!(-5), dec!(30), dec!(2)),
            trade(2, dec!(20), dec!(-30), dec!(40), dec!(2)),
            trade(4, dec!(10), dec!(-15), dec!(30), dec!(2)),
        ];
        let stats = TradeStatistics::from_trades(&trades);
        // End-trade drawdowns: [-10, -20, -20]
        assert_eq!(stats.maximum_end_trade_drawdown, dec!(-20));
        assert_eq!(stats.average_end_trade_drawdown, dec!(-50) / dec!(3));
        assert_eq!(stats.average_mae, dec!(-50) / dec!(3));
        assert_eq!(stats.average_mfe, dec!(100) / dec!(3));
    }
}
