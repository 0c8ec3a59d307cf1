//! Explicit simulation configuration passed into the world.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_WALK_UPDATE_DELAY: Duration = Duration::from_millis(80);
const DEFAULT_FIGHT_UPDATE_DELAY: Duration = Duration::from_millis(200);
const DEFAULT_DAMAGE_DELAY: Duration = Duration::from_millis(1_000);
const DEFAULT_POSITION_CHECK_DELAY: Duration = Duration::from_millis(1_000);
const DEFAULT_REENGAGE_DELAY: Duration = Duration::from_millis(300);
const DEFAULT_LOOT_DROP_DELAY: Duration = Duration::from_millis(200);
const DEFAULT_MONSTER_RESPAWN_DELAY: Duration = Duration::from_secs(30);
const DEFAULT_RNG_SEED: u64 = 0x5eed_7a1e_c0de_f00d;

/// Delays, cooldown thresholds and seeds that drive one simulation.
///
/// Durations serialize as whole milliseconds so the configuration reads
/// naturally from a TOML table. Missing fields fall back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    #[serde(with = "millis")]
    walk_update_delay: Duration,
    #[serde(with = "millis")]
    fight_update_delay: Duration,
    #[serde(with = "millis")]
    damage_delay: Duration,
    #[serde(with = "millis")]
    position_check_delay: Duration,
    #[serde(with = "millis")]
    reengage_delay: Duration,
    #[serde(with = "millis")]
    loot_drop_delay: Duration,
    #[serde(with = "millis")]
    monster_respawn_delay: Duration,
    rng_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            walk_update_delay: DEFAULT_WALK_UPDATE_DELAY,
            fight_update_delay: DEFAULT_FIGHT_UPDATE_DELAY,
            damage_delay: DEFAULT_DAMAGE_DELAY,
            position_check_delay: DEFAULT_POSITION_CHECK_DELAY,
            reengage_delay: DEFAULT_REENGAGE_DELAY,
            loot_drop_delay: DEFAULT_LOOT_DROP_DELAY,
            monster_respawn_delay: DEFAULT_MONSTER_RESPAWN_DELAY,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl SimConfig {
    /// Minimum time between two movement evaluations of one entity.
    #[must_use]
    pub const fn walk_update_delay(&self) -> Duration {
        self.walk_update_delay
    }

    /// Minimum time between two fight evaluations of one entity.
    #[must_use]
    pub const fn fight_update_delay(&self) -> Duration {
        self.fight_update_delay
    }

    /// Minimum time between two damage instances dealt by one attacker.
    #[must_use]
    pub const fn damage_delay(&self) -> Duration {
        self.damage_delay
    }

    /// Minimum time between two position checks of one monster.
    #[must_use]
    pub const fn position_check_delay(&self) -> Duration {
        self.position_check_delay
    }

    /// Delay between foe-set dissolution and opponent re-engagement.
    #[must_use]
    pub const fn reengage_delay(&self) -> Duration {
        self.reengage_delay
    }

    /// Delay between a monster's death and its loot drop request.
    #[must_use]
    pub const fn loot_drop_delay(&self) -> Duration {
        self.loot_drop_delay
    }

    /// Delay forwarded to the respawn collaborator when a monster dies.
    #[must_use]
    pub const fn monster_respawn_delay(&self) -> Duration {
        self.monster_respawn_delay
    }

    /// Seed for the damage roller.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Overrides the movement cooldown.
    #[must_use]
    pub const fn with_walk_update_delay(mut self, delay: Duration) -> Self {
        self.walk_update_delay = delay;
        self
    }

    /// Overrides the fight cooldown.
    #[must_use]
    pub const fn with_fight_update_delay(mut self, delay: Duration) -> Self {
        self.fight_update_delay = delay;
        self
    }

    /// Overrides the damage cooldown.
    #[must_use]
    pub const fn with_damage_delay(mut self, delay: Duration) -> Self {
        self.damage_delay = delay;
        self
    }

    /// Overrides the monster position-check cooldown.
    #[must_use]
    pub const fn with_position_check_delay(mut self, delay: Duration) -> Self {
        self.position_check_delay = delay;
        self
    }

    /// Overrides the re-engagement delay.
    #[must_use]
    pub const fn with_reengage_delay(mut self, delay: Duration) -> Self {
        self.reengage_delay = delay;
        self
    }

    /// Overrides the loot drop delay.
    #[must_use]
    pub const fn with_loot_drop_delay(mut self, delay: Duration) -> Self {
        self.loot_drop_delay = delay;
        self
    }

    /// Overrides the monster respawn delay.
    #[must_use]
    pub const fn with_monster_respawn_delay(mut self, delay: Duration) -> Self {
        self.monster_respawn_delay = delay;
        self
    }

    /// Overrides the damage roller seed.
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
