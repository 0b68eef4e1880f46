use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Open holding of one symbol, valued at its average purchase price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    pub average_price: f64,
    pub first_purchase_date: NaiveDateTime,
}

impl Position {
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.average_price
    }

    pub fn market_value(&self, current_price: f64) -> f64 {
        self.quantity * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.market_value(current_price) - self.cost_basis()
    }

    /// Fold a new lot into the position, re-weighting the average price.
    pub(crate) fn add_lot(&mut self, quantity: f64, price: f64) {
        let new_quantity = self.quantity + quantity;
        self.average_price =
            (self.quantity * self.average_price + quantity * price) / new_quantity;
        self.quantity = new_quantity;
    }
}
