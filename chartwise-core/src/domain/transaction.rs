//! Transaction: one append-only entry of the portfolio ledger.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// A completed buy or sell.
///
/// `profit_loss` and `profit_loss_pct` are only present on sells; they are
/// measured against the position's average price at the time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
    pub timestamp: NaiveDateTime,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_loss_pct: Option<f64>,
}

impl Transaction {
    pub fn is_winning_sale(&self) -> bool {
        self.kind == TransactionType::Sell && self.profit_loss.is_some_and(|pnl| pnl > 0.0)
    }
}
