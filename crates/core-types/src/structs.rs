use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered member of the expense pool.
///
/// The `share` field always holds the equal percentage split for the roster
/// size at the time of the last successful registration, rounded to two
/// decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Auto-assigned by the store on creation, immutable afterwards.
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Equal percentage portion of the pooled cost (0-100, two decimals).
    pub share: Decimal,
}
