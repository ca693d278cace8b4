//! Level-scaled enemy generation.
//!
//! | Tier   | Health        | Attack      | Defense     |
//! |--------|---------------|-------------|-------------|
//! | Normal | 50 + 15·level | 10 + 3·level | 5 + 2·level |
//! | Boss   | 100 + 25·level | 20 + 5·level | 10 + 3·level |
//!
//! Every fifth level (including level 0) spawns a boss.

use tracing::debug;

use super::enemy::{Enemy, EnemyAbility};
use super::templates::{template, templates_of, EnemyTemplate, EnemyTier};
use crate::core::{EnemyId, EngineError, GameRng, GameRngState, Result};

/// Base stats before template data is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyStats {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
}

impl EnemyStats {
    #[must_use]
    pub fn normal(level: u32) -> Self {
        Self {
            health: 50 + 15 * level,
            attack: 10 + 3 * level,
            defense: 5 + 2 * level,
        }
    }

    #[must_use]
    pub fn boss(level: u32) -> Self {
        Self {
            health: 100 + 25 * level,
            attack: 20 + 5 * level,
            defense: 10 + 3 * level,
        }
    }
}

/// Spawns enemies with unique ids.
#[derive(Clone, Debug)]
pub struct EncounterGenerator {
    rng: GameRng,
    next_id: u32,
}

impl EncounterGenerator {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng, next_id: 0 }
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    fn allocate(&mut self) -> EnemyId {
        self.next_id += 1;
        EnemyId::new(self.next_id)
    }

    fn pick(&mut self, tier: EnemyTier) -> Option<&'static EnemyTemplate> {
        let pool: Vec<&'static EnemyTemplate> = templates_of(tier).collect();
        self.rng.choose(&pool).copied()
    }

    /// Spawn a regular enemy.
    ///
    /// `tag` of `None` picks uniformly among the normal templates. An
    /// unknown tag spawns a generic foe with no abilities.
    pub fn normal_enemy(&mut self, level: u32, tag: Option<&str>) -> Enemy {
        let found = match tag {
            Some(tag) => template(tag),
            None => self.pick(EnemyTier::Normal),
        };
        let stats = EnemyStats::normal(level);
        match found {
            Some(t) => self.spawn(t, EnemyTier::Normal, level, stats),
            None => self.spawn_unknown(tag.unwrap_or("unknown"), level, stats),
        }
    }

    /// Spawn a boss.
    ///
    /// `tag` of `None` picks uniformly among the boss templates. An unknown
    /// tag is an error.
    pub fn boss_enemy(&mut self, level: u32, tag: Option<&str>) -> Result<Enemy> {
        let found = match tag {
            Some(tag) => template(tag)
                .ok_or_else(|| EngineError::UnknownBossTemplate(tag.to_string()))?,
            None => self
                .pick(EnemyTier::Boss)
                .ok_or_else(|| EngineError::UnknownBossTemplate("random".to_string()))?,
        };
        Ok(self.spawn(found, EnemyTier::Boss, level, EnemyStats::boss(level)))
    }

    /// The enemy for a level: a boss every fifth level, otherwise a normal
    /// enemy, template chosen at random.
    pub fn for_level(&mut self, level: u32) -> Enemy {
        if level % 5 == 0 {
            if let Some(t) = self.pick(EnemyTier::Boss) {
                return self.spawn(t, EnemyTier::Boss, level, EnemyStats::boss(level));
            }
        }
        self.normal_enemy(level, None)
    }

    fn spawn(&mut self, t: &EnemyTemplate, tier: EnemyTier, level: u32, stats: EnemyStats) -> Enemy {
        let enemy = Enemy {
            id: self.allocate(),
            template: t.tag.to_string(),
            tier,
            name: t.name.to_string(),
            description: t.description.to_string(),
            level,
            health: stats.health,
            max_health: stats.health,
            attack: stats.attack,
            defense: stats.defense,
            abilities: t.abilities.iter().map(EnemyAbility::from_template).collect(),
            weaknesses: t.weaknesses.iter().map(|s| (*s).to_string()).collect(),
            resistances: t.resistances.iter().map(|s| (*s).to_string()).collect(),
        };
        debug!(id = %enemy.id, name = %enemy.name, level, ?tier, "enemy spawned");
        enemy
    }

    fn spawn_unknown(&mut self, tag: &str, level: u32, stats: EnemyStats) -> Enemy {
        debug!(tag, "unknown enemy template, spawning generic foe");
        Enemy {
            id: self.allocate(),
            template: tag.to_string(),
            tier: EnemyTier::Normal,
            name: "Unknown Foe".to_string(),
            description: "A mysterious opponent".to_string(),
            level,
            health: stats.health,
            max_health: stats.health,
            attack: stats.attack,
            defense: stats.defense,
            abilities: Vec::new(),
            weaknesses: Vec::new(),
            resistances: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> EncounterGenerator {
        EncounterGenerator::new(GameRng::new(8))
    }

    #[test]
    fn test_normal_stats() {
        let enemy = generator().normal_enemy(3, Some("inflation"));
        assert_eq!(enemy.name, "Inflation");
        assert_eq!((enemy.health, enemy.max_health), (95, 95));
        assert_eq!(enemy.attack, 19);
        assert_eq!(enemy.defense, 11);
        assert!(!enemy.is_boss());
    }

    #[test]
    fn test_boss_stats() {
        let enemy = generator().boss_enemy(5, Some("market_crash")).unwrap();
        assert_eq!(enemy.health, 225);
        assert_eq!(enemy.attack, 45);
        assert_eq!(enemy.defense, 25);
        assert!(enemy.is_boss());
        assert!(enemy.abilities.iter().all(|a| a.current_cooldown == 0));
    }

    #[test]
    fn test_unknown_boss_is_error() {
        let err = generator().boss_enemy(5, Some("dragon")).unwrap_err();
        assert!(matches!(err, EngineError::UnknownBossTemplate(t) if t == "dragon"));
    }

    #[test]
    fn test_unknown_normal_falls_back() {
        let enemy = generator().normal_enemy(1, Some("dragon"));
        assert_eq!(enemy.name, "Unknown Foe");
        assert_eq!(enemy.template, "dragon");
        assert!(enemy.abilities.is_empty());
    }

    #[test]
    fn test_random_picks_stay_in_tier() {
        let mut generator = generator();
        for _ in 0..50 {
            let normal = generator.normal_enemy(1, None);
            assert!(["market_volatility", "inflation", "recession"].contains(&normal.template.as_str()));
            let boss = generator.boss_enemy(1, None).unwrap();
            assert!(["financial_crisis", "market_crash"].contains(&boss.template.as_str()));
        }
    }

    #[test]
    fn test_for_level_boss_cadence() {
        let mut generator = generator();
        assert!(generator.for_level(5).is_boss());
        assert!(generator.for_level(10).is_boss());
        assert!(!generator.for_level(4).is_boss());
        assert!(!generator.for_level(6).is_boss());
    }

    #[test]
    fn test_ids_unique() {
        let mut generator = generator();
        let a = generator.for_level(1);
        let b = generator.for_level(1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_instantiation_does_not_share_cooldowns() {
        let mut generator = generator();
        let mut first = generator.boss_enemy(5, Some("financial_crisis")).unwrap();
        first.use_ready_ability();

        let second = generator.boss_enemy(5, Some("financial_crisis")).unwrap();
        assert!(second.abilities.iter().all(|a| a.current_cooldown == 0));
    }
}
