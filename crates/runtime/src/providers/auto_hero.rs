//! A simple automatic hero for simulations.
use tactics_core::{Battle, DistanceField, Intent, Position};

use crate::api::{IntentProvider, Result};

/// Fights the way a cautious player would: strike an adjacent enemy, else
/// walk as close as one turn allows to the nearest enemy, else end the turn.
///
/// Adjacent targets are taken in roster order. Among equally good
/// destinations the shorter walk wins, then the first in row-major order.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoHero;

impl AutoHero {
    pub fn decide(&self, battle: &Battle) -> Intent {
        let field = battle.field();
        let hero = field.hero();
        let origin = hero.position();

        if let Some(target) = field
            .living_enemies()
            .find(|enemy| enemy.position().is_adjacent(origin))
        {
            return Intent::AttackAt(target.position());
        }

        let grid = field.grid();
        let towards_enemies: Vec<DistanceField> = field
            .living_enemies()
            .map(|enemy| grid.distance_field(enemy.position()))
            .collect();
        let gap = |position: Position| {
            towards_enemies
                .iter()
                .filter_map(|df| df.distance(position))
                .min()
        };
        // The hero's own tile is occupied and never enters an enemy field, so
        // its gap is measured through the walkable tiles around it.
        let Some(current) = grid
            .neighbors(origin)
            .into_iter()
            .filter_map(&gap)
            .min()
            .map(|steps| steps + 1)
        else {
            return Intent::EndTurn;
        };

        // Distances from the hero; only walkable tiles are ever reached.
        let walk = grid.distance_field(origin);
        let dims = grid.dimensions();
        let mut best: Option<(u32, u32, Position)> = None;
        for y in 0..dims.height as i32 {
            for x in 0..dims.width as i32 {
                let tile = Position::new(x, y);
                let Some(steps) = walk.distance(tile) else {
                    continue;
                };
                if steps == 0 || steps > hero.movement_range() {
                    continue;
                }
                let Some(remaining) = gap(tile) else {
                    continue;
                };
                if best.is_none_or(|(r, s, _)| (remaining, steps) < (r, s)) {
                    best = Some((remaining, steps, tile));
                }
            }
        }

        match best {
            Some((remaining, _, tile)) if remaining < current => Intent::MoveTo(tile),
            _ => Intent::EndTurn,
        }
    }
}

impl IntentProvider for AutoHero {
    fn provide_intent(&mut self, battle: &Battle) -> Result<Intent> {
        Ok(self.decide(battle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{
        BaseStats, BattleSetup, EnemyArchetype, EnemySpawn, GridLayout, HeroSetup,
    };

    fn setup(layout: &str, hero: Position, enemies: &[Position]) -> Battle {
        let mut setup = BattleSetup::new(
            HeroSetup::new("Hero", BaseStats::new(30, 5, 2, 2), hero),
            GridLayout::parse(layout).unwrap(),
        );
        for position in enemies {
            setup = setup.with_enemy(EnemySpawn::new(EnemyArchetype::Sentinel, *position));
        }
        Battle::start(setup).unwrap()
    }

    #[test]
    fn attacks_the_first_adjacent_enemy() {
        let battle = setup(
            "
            ...
            ...
            ...
            ",
            Position::new(1, 1),
            &[Position::new(0, 0), Position::new(1, 2), Position::new(2, 1)],
        );
        assert_eq!(AutoHero.decide(&battle), Intent::AttackAt(Position::new(1, 2)));
    }

    #[test]
    fn closes_distance_within_movement() {
        let battle = setup(
            "
            ......
            ......
            ",
            Position::new(0, 0),
            &[Position::new(5, 0)],
        );
        assert_eq!(AutoHero.decide(&battle), Intent::MoveTo(Position::new(2, 0)));
    }

    #[test]
    fn walks_around_walls() {
        let battle = setup(
            "
            .#..
            .#..
            ....
            ",
            Position::new(0, 0),
            &[Position::new(2, 0)],
        );
        assert_eq!(AutoHero.decide(&battle), Intent::MoveTo(Position::new(0, 2)));
    }

    #[test]
    fn approaches_the_nearer_of_two_enemies() {
        let battle = setup(
            "
            .......
            .......
            ",
            Position::new(3, 0),
            &[Position::new(6, 1), Position::new(1, 0)],
        );
        assert_eq!(AutoHero.decide(&battle), Intent::MoveTo(Position::new(2, 0)));
    }

    #[test]
    fn boxed_in_hero_ends_the_turn() {
        let battle = setup(
            "
            .#...
            ##...
            ",
            Position::new(0, 0),
            &[Position::new(4, 1)],
        );
        assert_eq!(AutoHero.decide(&battle), Intent::EndTurn);
    }

    #[test]
    fn unreachable_enemies_end_the_turn() {
        let battle = setup(
            "
            ..#..
            ..#..
            ",
            Position::new(0, 0),
            &[Position::new(4, 1)],
        );
        assert_eq!(AutoHero.decide(&battle), Intent::EndTurn);
    }
}
