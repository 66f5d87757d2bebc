//! Seeded encounter generation for world-map locations.
use tactics_core::rng::context;
use tactics_core::{
    ArchetypeCatalog, BaseStats, BattleConfig, BattleSetup, EnemyArchetype, EnemySpawn,
    GridLayout, HeroSetup, PcgRng, Position, RngOracle, compute_seed,
};

/// A destination on the world map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub description: String,
    pub difficulty: u32,
}

impl Location {
    pub fn new(name: impl Into<String>, description: impl Into<String>, difficulty: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            difficulty,
        }
    }

    /// The bundled world map, ordered roughly by danger along the road east.
    pub fn catalog() -> Vec<Location> {
        [
            ("Hobbiton", "Peaceful fields hiding ancient secrets.", 1),
            ("Bree", "Crossroads town with many travelers.", 1),
            ("Weathertop", "Ruined watchtower claimed by goblins.", 2),
            ("Rivendell", "Elven refuge amidst waterfalls.", 2),
            ("Misty Pass", "Treacherous pass patrolled by orcs.", 3),
            ("Moria Gates", "Ancient dwarven halls overrun by shadows.", 4),
            ("Lorien", "Golden forest of timeless guardians.", 3),
            ("Rohan Plains", "Horse-lords rally against raiders.", 3),
            ("Helm's Deep", "Stone fortress resisting the dark tide.", 4),
            ("Minas Tirith", "White city standing firm against Mordor.", 5),
            ("Mordor", "Land of shadow and fire.", 6),
        ]
        .into_iter()
        .map(|(name, description, difficulty)| Location::new(name, description, difficulty))
        .collect()
    }

    /// Case-insensitive lookup in [`Location::catalog`].
    pub fn find(name: &str) -> Option<Location> {
        Self::catalog()
            .into_iter()
            .find(|location| location.name.eq_ignore_ascii_case(name))
    }
}

/// Builds a [`BattleSetup`] for a location from a seed.
///
/// Every generated enemy is a Marauder whose stats scale with difficulty.
/// Spawns fall on rows 1 and 2, one tile in from the side edges; the hero
/// starts centred two rows above the bottom edge.
#[derive(Clone, Debug)]
pub struct EncounterGenerator {
    width: u32,
    height: u32,
    catalog: ArchetypeCatalog,
    config: BattleConfig,
}

impl Default for EncounterGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

impl EncounterGenerator {
    pub const DEFAULT_WIDTH: u32 = 12;
    pub const DEFAULT_HEIGHT: u32 = 8;

    const SPAWN_ROWS: (u32, u32) = (1, 2);
    const SPAWN_ATTEMPTS: u64 = 8;

    /// Lattices smaller than 3×5 are widened so the spawn band and hero row
    /// stay disjoint.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(3),
            height: height.max(5),
            catalog: ArchetypeCatalog::default(),
            config: BattleConfig::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: ArchetypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hero_start(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height - 2) as i32)
    }

    /// Number of enemies `location` fields for `seed`, before the spawn band cap.
    pub fn enemy_count(&self, location: &Location, seed: u64) -> u32 {
        let roll = PcgRng.range(compute_seed(seed, 0, 0, context::ENCOUNTER_COUNT), 0, 1);
        (location.difficulty + roll).max(1)
    }

    pub fn enemy_stats(&self, location: &Location, seed: u64, index: usize) -> BaseStats {
        let d = location.difficulty;
        let actor = index as u32 + 1;
        let roll_seed = compute_seed(seed, index as u64, actor, context::ENCOUNTER_HEALTH);
        let health = PcgRng.range(roll_seed, 12, 20) + d * 4;
        BaseStats::new(health, 3 + d as i32, 1 + (d / 2) as i32, 1)
    }

    pub fn generate(&self, location: &Location, hero: HeroSetup, seed: u64) -> BattleSetup {
        let hero = HeroSetup {
            position: self.hero_start(),
            ..hero
        };
        let band = ((self.width - 2) * (Self::SPAWN_ROWS.1 - Self::SPAWN_ROWS.0 + 1)) as usize;
        let count = (self.enemy_count(location, seed) as usize)
            .min(band)
            .min(self.config.max_enemies);

        let mut taken: Vec<Position> = Vec::with_capacity(count);
        let mut roster = Vec::with_capacity(count);
        for index in 0..count {
            let position = self.spawn_position(seed, index, &taken);
            taken.push(position);
            roster.push(
                EnemySpawn::new(EnemyArchetype::Marauder, position)
                    .with_stats(self.enemy_stats(location, seed, index)),
            );
        }

        BattleSetup::new(hero, GridLayout::open(self.width, self.height))
            .with_roster(roster)
            .with_catalog(self.catalog.clone())
            .with_config(self.config.clone())
            .with_seed(seed)
    }

    /// Rolls a free spawn tile; after a few collisions, takes the first free
    /// tile of the band in row-major order.
    fn spawn_position(&self, seed: u64, index: usize, taken: &[Position]) -> Position {
        let actor = index as u32 + 1;
        for attempt in 0..Self::SPAWN_ATTEMPTS {
            let nonce = index as u64 * Self::SPAWN_ATTEMPTS + attempt;
            let x = PcgRng.range(
                compute_seed(seed, nonce, actor, context::ENCOUNTER_COLUMN),
                1,
                self.width - 2,
            );
            let y = PcgRng.range(
                compute_seed(seed, nonce, actor, context::ENCOUNTER_ROW),
                Self::SPAWN_ROWS.0,
                Self::SPAWN_ROWS.1,
            );
            let candidate = Position::new(x as i32, y as i32);
            if !taken.contains(&candidate) {
                return candidate;
            }
        }

        (Self::SPAWN_ROWS.0..=Self::SPAWN_ROWS.1)
            .flat_map(|y| (1..=self.width - 2).map(move |x| Position::new(x as i32, y as i32)))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or(Position::new(1, Self::SPAWN_ROWS.0 as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::Battle;

    fn hero() -> HeroSetup {
        HeroSetup::new("Aldric", BaseStats::default(), Position::ORIGIN)
    }

    #[test]
    fn catalog_lists_every_location() {
        let catalog = Location::catalog();
        assert_eq!(catalog.len(), 11);
        assert_eq!(Location::find("mordor").map(|l| l.difficulty), Some(6));
        assert!(Location::find("Gondolin").is_none());
    }

    #[test]
    fn stats_scale_with_difficulty() {
        let generator = EncounterGenerator::default();
        let weathertop = Location::find("Weathertop").unwrap();

        for index in 0..4 {
            let stats = generator.enemy_stats(&weathertop, 42, index);
            assert!((20..=28).contains(&stats.max_health));
            assert_eq!(stats.attack, 5);
            assert_eq!(stats.defense, 2);
        }
    }

    #[test]
    fn generated_setup_starts_a_battle() {
        let generator = EncounterGenerator::default();
        for location in Location::catalog() {
            for seed in 0..16 {
                let setup = generator.generate(&location, hero(), seed);
                let count = setup.roster.len() as u32;
                assert!(count >= location.difficulty.max(1));
                assert!(count <= location.difficulty + 1);
                assert_eq!(setup.hero.position, Position::new(6, 6));
                for spawn in &setup.roster {
                    assert!((1..=10).contains(&spawn.position.x));
                    assert!((1..=2).contains(&spawn.position.y));
                }

                let battle = Battle::start(setup).unwrap();
                assert_eq!(battle.units().len() as u32, count + 1);
            }
        }
    }

    #[test]
    fn same_seed_same_encounter() {
        let generator = EncounterGenerator::default();
        let mordor = Location::find("Mordor").unwrap();
        let first = generator.generate(&mordor, hero(), 77);
        let second = generator.generate(&mordor, hero(), 77);
        assert_eq!(first, second);
    }

    #[test]
    fn small_lattice_caps_the_roster() {
        let generator = EncounterGenerator::new(3, 5);
        let mordor = Location::find("Mordor").unwrap();
        let setup = generator.generate(&mordor, hero(), 5);

        assert_eq!(setup.roster.len(), 2);
        assert!(Battle::start(setup).is_ok());
    }
}
