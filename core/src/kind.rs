//! Entity kinds, vitals and spawn templates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ChestAreaId, LootTableId, TilePosition};

/// Category tag announced to observers alongside entity updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
    /// Player-controlled entity.
    Player,
    /// Server-controlled monster.
    Monster,
}

/// Monster-only data consumed when the monster dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterProfile {
    spawn: TilePosition,
    respawn: bool,
    loot_table: LootTableId,
    chest_area: Option<ChestAreaId>,
}

impl MonsterProfile {
    /// Creates a profile for a monster anchored at `spawn`.
    #[must_use]
    pub const fn new(spawn: TilePosition, respawn: bool, loot_table: LootTableId) -> Self {
        Self {
            spawn,
            respawn,
            loot_table,
            chest_area: None,
        }
    }

    /// Associates the monster with a chest-area counter.
    #[must_use]
    pub const fn with_chest_area(mut self, area: ChestAreaId) -> Self {
        self.chest_area = Some(area);
        self
    }

    /// Tile the monster returns to when respawned.
    #[must_use]
    pub const fn spawn(&self) -> TilePosition {
        self.spawn
    }

    /// Whether the monster should come back after dying.
    #[must_use]
    pub const fn respawn(&self) -> bool {
        self.respawn
    }

    /// Loot table rolled when the monster dies.
    #[must_use]
    pub const fn loot_table(&self) -> LootTableId {
        self.loot_table
    }

    /// Chest-area counter decremented when the monster dies.
    #[must_use]
    pub const fn chest_area(&self) -> Option<ChestAreaId> {
        self.chest_area
    }
}

/// Closed set of entity kinds simulated by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Player-controlled entity.
    Player,
    /// Server-controlled monster with its respawn and loot data.
    Monster(MonsterProfile),
}

impl EntityKind {
    /// Category tag announced to observers.
    #[must_use]
    pub const fn tag(&self) -> KindTag {
        match self {
            Self::Player => KindTag::Player,
            Self::Monster(_) => KindTag::Monster,
        }
    }

    /// Monster profile, present only for monsters.
    #[must_use]
    pub const fn monster_profile(&self) -> Option<&MonsterProfile> {
        match self {
            Self::Player => None,
            Self::Monster(profile) => Some(profile),
        }
    }
}

/// Life and combat statistics of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vitals {
    /// Current life, always within `0..=max_life`.
    pub life: u32,
    /// Upper bound for `life`.
    pub max_life: u32,
    /// Attack statistic scaled by the attack roll.
    pub atk: u32,
    /// Defence statistic scaled by the defence roll.
    pub def: u32,
}

impl Vitals {
    /// Creates vitals at full life.
    #[must_use]
    pub const fn new(max_life: u32, atk: u32, def: u32) -> Self {
        Self {
            life: max_life,
            max_life,
            atk,
            def,
        }
    }

    /// Overrides the starting life.
    #[must_use]
    pub const fn with_life(mut self, life: u32) -> Self {
        self.life = life;
        self
    }
}

/// Everything required to register a new entity with the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Kind of entity to create.
    pub kind: EntityKind,
    /// Tile the entity initially occupies.
    pub position: TilePosition,
    /// Starting vitals.
    pub vitals: Vitals,
}

impl EntityTemplate {
    /// Checks that the template describes a living entity with sane vitals.
    pub fn validate(&self) -> Result<(), SpawnError> {
        if self.vitals.max_life == 0 {
            return Err(SpawnError::ZeroMaxLife);
        }
        if self.vitals.life == 0 {
            return Err(SpawnError::ZeroLife);
        }
        if self.vitals.life > self.vitals.max_life {
            return Err(SpawnError::LifeExceedsMax {
                life: self.vitals.life,
                max_life: self.vitals.max_life,
            });
        }
        Ok(())
    }
}

/// Reasons a spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum SpawnError {
    /// The template declared a maximum life of zero.
    #[error("maximum life must be positive")]
    ZeroMaxLife,
    /// The template would spawn an entity that is already dead.
    #[error("starting life must be positive")]
    ZeroLife,
    /// The starting life exceeds the maximum life.
    #[error("starting life {life} exceeds maximum life {max_life}")]
    LifeExceedsMax {
        /// Requested starting life.
        life: u32,
        /// Declared maximum life.
        max_life: u32,
    },
    /// Every entity identifier has already been handed out.
    #[error("entity identifiers are exhausted")]
    IdsExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(vitals: Vitals) -> EntityTemplate {
        EntityTemplate {
            kind: EntityKind::Player,
            position: TilePosition::new(0, 0),
            vitals,
        }
    }

    #[test]
    fn full_life_template_is_valid() {
        assert_eq!(template(Vitals::new(20, 3, 1)).validate(), Ok(()));
    }

    #[test]
    fn invalid_vitals_are_reported() {
        assert_eq!(
            template(Vitals::new(0, 3, 1)).validate(),
            Err(SpawnError::ZeroMaxLife)
        );
        assert_eq!(
            template(Vitals::new(10, 3, 1).with_life(0)).validate(),
            Err(SpawnError::ZeroLife)
        );
        assert_eq!(
            template(Vitals::new(10, 3, 1).with_life(11)).validate(),
            Err(SpawnError::LifeExceedsMax {
                life: 11,
                max_life: 10
            })
        );
    }

    #[test]
    fn kind_tags_follow_variants() {
        let profile = MonsterProfile::new(TilePosition::new(4, 4), true, LootTableId::new(2));
        assert_eq!(EntityKind::Player.tag(), KindTag::Player);
        assert_eq!(EntityKind::Monster(profile).tag(), KindTag::Monster);
        assert_eq!(
            EntityKind::Monster(profile).monster_profile(),
            Some(&profile)
        );
        assert_eq!(EntityKind::Player.monster_profile(), None);
    }
}
