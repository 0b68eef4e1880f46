//! Portfolio ledger: positions plus an append-only transaction log.
//!
//! Pure arithmetic, no persistence. The ledger is serde-serializable so the
//! caller can store it wherever it likes. Every failing operation returns
//! before touching state.

pub mod valuation;

pub use valuation::{PerformanceMetrics, PortfolioSummary, PositionValuation};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::domain::{Position, Transaction, TransactionType};
use valuation::pct_of;

#[derive(Debug, Error, PartialEq)]
pub enum PortfolioError {
    #[error("no position in {0}")]
    NoPosition(String),

    #[error("insufficient shares of {symbol}: holding {held}, requested {requested}")]
    InsufficientShares {
        symbol: String,
        held: f64,
        requested: f64,
    },

    #[error("quantity must be positive and finite, got {0}")]
    InvalidQuantity(f64),

    #[error("price must be positive and finite, got {0}")]
    InvalidPrice(f64),
}

fn check_trade(quantity: f64, price: f64) -> Result<(), PortfolioError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(PortfolioError::InvalidQuantity(quantity));
    }
    if !price.is_finite() || price <= 0.0 {
        return Err(PortfolioError::InvalidPrice(price));
    }
    Ok(())
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    positions: BTreeMap<String, Position>,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.values()
    }

    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(&normalize(symbol))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Buy `quantity` at `price`, averaging into any existing position.
    pub fn add_position(
        &mut self,
        symbol: &str,
        quantity: f64,
        price: f64,
        timestamp: NaiveDateTime,
    ) -> Result<&Position, PortfolioError> {
        check_trade(quantity, price)?;
        let symbol = normalize(symbol);

        self.transactions.push(Transaction {
            kind: TransactionType::Buy,
            symbol: symbol.clone(),
            quantity,
            price,
            timestamp,
            total: quantity * price,
            profit_loss: None,
            profit_loss_pct: None,
        });

        let position = self
            .positions
            .entry(symbol.clone())
            .and_modify(|p| p.add_lot(quantity, price))
            .or_insert_with(|| Position {
                symbol,
                quantity,
                average_price: price,
                first_purchase_date: timestamp,
            });
        Ok(position)
    }

    /// Sell `quantity` at `price`. Returns the SELL transaction.
    ///
    /// A position sold down to exactly zero is removed.
    pub fn remove_position(
        &mut self,
        symbol: &str,
        quantity: f64,
        price: f64,
        timestamp: NaiveDateTime,
    ) -> Result<&Transaction, PortfolioError> {
        check_trade(quantity, price)?;
        let symbol = normalize(symbol);

        let position = self
            .positions
            .get_mut(&symbol)
            .ok_or_else(|| PortfolioError::NoPosition(symbol.clone()))?;
        if quantity > position.quantity {
            return Err(PortfolioError::InsufficientShares {
                symbol,
                held: position.quantity,
                requested: quantity,
            });
        }

        let average_price = position.average_price;
        let profit_loss = (price - average_price) * quantity;
        let profit_loss_pct = pct_of(price - average_price, average_price);

        position.quantity -= quantity;
        if position.quantity == 0.0 {
            self.positions.remove(&symbol);
        }

        self.transactions.push(Transaction {
            kind: TransactionType::Sell,
            symbol,
            quantity,
            price,
            timestamp,
            total: quantity * price,
            profit_loss: Some(profit_loss),
            profit_loss_pct: Some(profit_loss_pct),
        });
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Mark one held position at `current_price`.
    pub fn position_value(
        &self,
        symbol: &str,
        current_price: f64,
    ) -> Result<PositionValuation, PortfolioError> {
        let symbol = normalize(symbol);
        let position = self
            .positions
            .get(&symbol)
            .ok_or(PortfolioError::NoPosition(symbol))?;
        Ok(PositionValuation::mark(position, current_price))
    }

    fn priced(&self, prices: &HashMap<String, f64>) -> Vec<PositionValuation> {
        self.positions
            .values()
            .filter_map(|p| {
                let price = prices.get(&p.symbol)?;
                Some(PositionValuation::mark(p, *price))
            })
            .collect()
    }

    /// Totals over positions present in `prices`; others are left out.
    pub fn summary(&self, prices: &HashMap<String, f64>) -> PortfolioSummary {
        let positions = self.priced(prices);
        let total_value: f64 = positions.iter().map(|v| v.current_value).sum();
        let total_cost: f64 = positions.iter().map(|v| v.cost_basis).sum();
        let total_gain_loss = total_value - total_cost;
        PortfolioSummary {
            total_value,
            total_cost,
            total_gain_loss,
            total_gain_loss_pct: pct_of(total_gain_loss, total_cost),
            total_positions: self.positions.len(),
            positions,
        }
    }

    pub fn metrics(&self, prices: &HashMap<String, f64>) -> PerformanceMetrics {
        let summary = self.summary(prices);

        let sells: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Sell)
            .collect();
        let realized_pnl: f64 = sells.iter().filter_map(|t| t.profit_loss).sum();
        let wins = sells.iter().filter(|t| t.is_winning_sale()).count();
        let win_rate = if sells.is_empty() {
            0.0
        } else {
            wins as f64 / sells.len() as f64 * 100.0
        };

        let by_pct = |a: &&PositionValuation, b: &&PositionValuation| {
            a.profit_loss_pct.total_cmp(&b.profit_loss_pct)
        };
        let best_performer = summary.positions.iter().max_by(by_pct).cloned();
        let worst_performer = summary.positions.iter().min_by(by_pct).cloned();

        PerformanceMetrics {
            unrealized_pnl: summary.total_gain_loss,
            unrealized_pnl_pct: summary.total_gain_loss_pct,
            realized_pnl,
            total_pnl: summary.total_gain_loss + realized_pnl,
            best_performer,
            worst_performer,
            total_transactions: self.transactions.len(),
            win_rate,
        }
    }

    /// Transactions matching the filters, newest first.
    pub fn transaction_history(
        &self,
        symbol: Option<&str>,
        kind: Option<TransactionType>,
    ) -> Vec<&Transaction> {
        let symbol = symbol.map(normalize);
        let mut history: Vec<&Transaction> = self
            .transactions
            .iter()
            .rev()
            .filter(|t| symbol.as_deref().map_or(true, |s| t.symbol == s))
            .filter(|t| kind.map_or(true, |k| t.kind == k))
            .collect();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        history
    }
}
