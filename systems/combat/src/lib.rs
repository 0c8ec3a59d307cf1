#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure damage resolution shared by every attacker.
//!
//! A hit rolls `atk * uniform(5, 10) - def * uniform(1, 3)`. Rolls that come
//! out at or below zero are replaced by a fresh `uniform(1, 3)` so every
//! resolved hit deals at least one point of damage.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Multiplier range applied to the attacker's attack statistic.
pub const ATTACK_ROLL: RangeInclusive<u32> = 5..=10;
/// Multiplier range applied to the defender's defence statistic.
pub const DEFENCE_ROLL: RangeInclusive<u32> = 1..=3;
/// Range of the fallback damage used when the raw roll is not positive.
pub const FLOOR_ROLL: RangeInclusive<u32> = 1..=3;

/// Computes the raw, possibly non-positive, damage for the provided rolls.
#[must_use]
pub fn raw_damage(atk: u32, def: u32, attack_roll: u32, defence_roll: u32) -> i64 {
    i64::from(atk) * i64::from(attack_roll) - i64::from(def) * i64::from(defence_roll)
}

/// Seeded source of damage rolls.
#[derive(Clone, Debug)]
pub struct DamageRoller {
    rng: ChaCha8Rng,
}

impl DamageRoller {
    /// Creates a roller whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rolls the damage dealt by an attacker with `atk` to a defender with `def`.
    ///
    /// The result is always at least one.
    pub fn roll(&mut self, atk: u32, def: u32) -> u32 {
        let attack_roll = self.rng.gen_range(ATTACK_ROLL);
        let defence_roll = self.rng.gen_range(DEFENCE_ROLL);
        let raw = raw_damage(atk, def, attack_roll, defence_roll);
        if raw <= 0 {
            return self.rng.gen_range(FLOOR_ROLL);
        }
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}
