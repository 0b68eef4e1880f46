//! Domain types for chartwise

pub mod bar;
pub mod position;
pub mod series;
pub mod signal;
pub mod transaction;

pub use bar::Bar;
pub use position::Position;
pub use series::{Series, SeriesError};
pub use signal::{Signal, SignalDirection, SignalKind, SignalStrength};
pub use transaction::{Transaction, TransactionType};
