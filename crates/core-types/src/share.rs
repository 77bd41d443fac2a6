use rust_decimal::{Decimal, RoundingStrategy};

/// Computes the equal percentage share for a roster of `count` participants.
///
/// The result is `100 / count` rounded to two decimal places, with midpoints
/// rounded away from zero, and rescaled so it always carries two fractional
/// digits (`100.00`, `33.33`, ...). `count` must be at least 1; a roster of
/// zero participants has no shares to compute.
pub fn equal_share(count: i64) -> Decimal {
    assert!(count > 0, "equal share of an empty roster is undefined");

    let mut share = (Decimal::ONE_HUNDRED / Decimal::from(count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    share.rescale(2);
    share
}
