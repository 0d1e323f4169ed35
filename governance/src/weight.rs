//! Influence dampening: maps a locked amount to the weight it adds to a tally.
//!
//! Larger stakes are divided by larger factors so that a single large holder
//! cannot dominate a round. Tiers are matched from the highest floor down;
//! the first tier whose floor the amount reaches wins.

use lockvote_types::Amount;

/// One dampening band: amounts `>= floor` (and below the next band up) are
/// integer-divided by `divisor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightTier {
    pub floor: u128,
    pub divisor: u128,
}

/// Dampening bands, highest floor first.
pub const TIERS: [WeightTier; 3] = [
    WeightTier { floor: 1_000_001, divisor: 910 },
    WeightTier { floor: 100_001, divisor: 90 },
    WeightTier { floor: 1_500, divisor: 10 },
];

/// Stateless dampening function.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeightEngine;

impl WeightEngine {
    /// Influence contributed by locking `amount`.
    ///
    /// Amounts below the lowest floor count one-for-one.
    pub fn weight(&self, amount: Amount) -> Amount {
        weight(amount)
    }

    /// The band `amount` falls into, or `None` if it is undampened.
    pub fn tier_of(&self, amount: Amount) -> Option<WeightTier> {
        TIERS.iter().copied().find(|t| amount.raw() >= t.floor)
    }
}

/// Free-function form of [`WeightEngine::weight`].
pub fn weight(amount: Amount) -> Amount {
    let raw = amount.raw();
    for tier in TIERS {
        if raw >= tier.floor {
            return Amount::new(raw / tier.divisor);
        }
    }
    amount
}
