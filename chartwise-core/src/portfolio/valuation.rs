//! Read-only valuation views over a ledger.

use serde::{Deserialize, Serialize};

use crate::domain::Position;

/// Percentage change of `value` against `base`; zero when `base` is zero.
pub(crate) fn pct_of(value: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        value / base * 100.0
    }
}

/// One position marked at a current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionValuation {
    pub symbol: String,
    pub quantity: f64,
    pub average_price: f64,
    pub current_price: f64,
    pub cost_basis: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_pct: f64,
}

impl PositionValuation {
    pub fn mark(position: &Position, current_price: f64) -> Self {
        let cost_basis = position.cost_basis();
        let current_value = position.market_value(current_price);
        let profit_loss = current_value - cost_basis;
        Self {
            symbol: position.symbol.clone(),
            quantity: position.quantity,
            average_price: position.average_price,
            current_price,
            cost_basis,
            current_value,
            profit_loss,
            profit_loss_pct: pct_of(profit_loss, cost_basis),
        }
    }
}

/// Aggregate value against cost, over positions that have a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_pct: f64,
    /// All held positions, priced or not.
    pub total_positions: usize,
    /// Priced positions only, in symbol order.
    pub positions: Vec<PositionValuation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub unrealized_pnl: f64,
    pub unrealized_pnl_pct: f64,
    pub realized_pnl: f64,
    pub total_pnl: f64,
    pub best_performer: Option<PositionValuation>,
    pub worst_performer: Option<PositionValuation>,
    pub total_transactions: usize,
    /// Percentage of SELL transactions with positive P/L; 0 with no sells.
    pub win_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn mark_position() {
        let position = Position {
            symbol: "MSFT".into(),
            quantity: 4.0,
            average_price: 250.0,
            first_purchase_date: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        };
        let v = PositionValuation::mark(&position, 200.0);
        assert_eq!(v.cost_basis, 1000.0);
        assert_eq!(v.current_value, 800.0);
        assert_eq!(v.profit_loss, -200.0);
        assert_eq!(v.profit_loss_pct, -20.0);
    }

    #[test]
    fn pct_of_zero_base() {
        assert_eq!(pct_of(5.0, 0.0), 0.0);
        assert_eq!(pct_of(5.0, 50.0), 10.0);
    }
}
