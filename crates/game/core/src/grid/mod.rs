//! Bounded tile lattice with terrain and single-occupant tracking.
//!
//! The grid knows nothing about combat: it answers terrain and occupancy
//! queries and relocates occupant references. Rules about who may move where
//! live in the resolver.
mod layout;
mod path;

use std::collections::BTreeMap;
use std::fmt;

use arrayvec::ArrayVec;

use crate::error::{ErrorSeverity, GameError};
use crate::unit::UnitId;

pub use layout::{GridLayout, LayoutError};
pub use path::DistanceField;

/// Discrete grid position expressed in tile coordinates.
///
/// `x` is the column and `y` the row; row 0 is the top edge of the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Orthogonal (taxicab) distance.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when `other` shares an edge with this tile.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }

    pub fn step(self, direction: CardinalDirection) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    /// Row-major deltas: north decreases the row index.
    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }

    /// True for directions that change the row.
    pub fn is_vertical(self) -> bool {
        matches!(self, CardinalDirection::North | CardinalDirection::South)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

/// Canonical terrain classes for battle tiles.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    Water,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    pub fn is_blocking(self) -> bool {
        !self.is_passable()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    #[error("position {position} is out of bounds")]
    OutOfBounds { position: Position },

    #[error("cannot move occupant from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    #[error("tile {position} cannot take an occupant")]
    TileUnavailable { position: Position },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            GridError::OutOfBounds { .. } => ErrorSeverity::Validation,
            GridError::IllegalMove { .. } | GridError::TileUnavailable { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
            GridError::IllegalMove { .. } => "GRID_ILLEGAL_MOVE",
            GridError::TileUnavailable { .. } => "GRID_TILE_UNAVAILABLE",
        }
    }
}

/// Orthogonal in-bounds neighbours of a tile.
pub type Neighbors = ArrayVec<Position, 4>;

/// Fixed-size terrain lattice plus the occupancy table layered on top of it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dimensions: GridDimensions,
    terrain: Vec<TerrainKind>,
    occupancy: BTreeMap<Position, UnitId>,
}

impl Grid {
    pub fn from_layout(layout: &GridLayout) -> Self {
        Self {
            dimensions: layout.dimensions(),
            terrain: layout.tiles().to_vec(),
            occupancy: BTreeMap::new(),
        }
    }

    pub fn open(width: u32, height: u32) -> Self {
        Self::from_layout(&GridLayout::open(width, height))
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn tile_at(&self, position: Position) -> Result<TerrainKind, GridError> {
        self.dimensions
            .index(position)
            .map(|index| self.terrain[index])
            .ok_or(GridError::OutOfBounds { position })
    }

    pub fn occupant_at(&self, position: Position) -> Option<UnitId> {
        self.occupancy.get(&position).copied()
    }

    /// In bounds, passable terrain, and nobody standing there.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile_at(position)
            .map(|terrain| terrain.is_passable() && !self.occupancy.contains_key(&position))
            .unwrap_or(false)
    }

    pub fn occupancy(&self) -> &BTreeMap<Position, UnitId> {
        &self.occupancy
    }

    /// Relocates the occupant of `from` onto `to`.
    pub fn move_occupant(&mut self, from: Position, to: Position) -> Result<UnitId, GridError> {
        if !self.is_walkable(to) {
            return Err(GridError::IllegalMove { from, to });
        }
        let occupant = self
            .occupancy
            .remove(&from)
            .ok_or(GridError::IllegalMove { from, to })?;
        self.occupancy.insert(to, occupant);
        Ok(occupant)
    }

    pub fn place_occupant(&mut self, position: Position, unit: UnitId) -> Result<(), GridError> {
        if !self.contains(position) {
            return Err(GridError::OutOfBounds { position });
        }
        if !self.is_walkable(position) {
            return Err(GridError::TileUnavailable { position });
        }
        self.occupancy.insert(position, unit);
        Ok(())
    }

    pub fn remove_occupant(&mut self, position: Position) -> Option<UnitId> {
        self.occupancy.remove(&position)
    }

    pub fn neighbors(&self, position: Position) -> Neighbors {
        CardinalDirection::ALL
            .iter()
            .map(|&direction| position.step(direction))
            .filter(|neighbor| self.contains(*neighbor))
            .collect()
    }

    /// Length of the shortest walkable path from `from` to `to`, if one exists
    /// within `limit` steps. The start tile itself may be occupied.
    pub fn path_length(&self, from: Position, to: Position, limit: u32) -> Option<u32> {
        path::bounded_path_length(self, from, to, limit)
    }

    /// Walking distance from every tile to `goal` over walkable tiles.
    pub fn distance_field(&self, goal: Position) -> DistanceField {
        DistanceField::towards(self, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_at_rejects_out_of_bounds() {
        let grid = Grid::open(3, 2);
        assert_eq!(grid.tile_at(Position::new(2, 1)), Ok(TerrainKind::Floor));
        assert_eq!(
            grid.tile_at(Position::new(3, 0)),
            Err(GridError::OutOfBounds {
                position: Position::new(3, 0)
            })
        );
        assert!(grid.tile_at(Position::new(-1, 0)).is_err());
    }

    #[test]
    fn walkable_requires_floor_and_no_occupant() {
        let mut layout = GridLayout::open(3, 3);
        layout.set(Position::new(1, 1), TerrainKind::Wall).unwrap();
        let mut grid = Grid::from_layout(&layout);
        grid.place_occupant(Position::new(0, 0), UnitId::HERO).unwrap();

        assert!(!grid.is_walkable(Position::new(1, 1)));
        assert!(!grid.is_walkable(Position::new(0, 0)));
        assert!(!grid.is_walkable(Position::new(5, 5)));
        assert!(grid.is_walkable(Position::new(2, 2)));
    }

    #[test]
    fn move_occupant_relocates_reference() {
        let mut grid = Grid::open(3, 3);
        grid.place_occupant(Position::new(0, 0), UnitId(1)).unwrap();

        let moved = grid
            .move_occupant(Position::new(0, 0), Position::new(0, 1))
            .unwrap();

        assert_eq!(moved, UnitId(1));
        assert_eq!(grid.occupant_at(Position::new(0, 0)), None);
        assert_eq!(grid.occupant_at(Position::new(0, 1)), Some(UnitId(1)));
    }

    #[test]
    fn move_occupant_fails_without_occupant_or_onto_blocked_tile() {
        let mut layout = GridLayout::open(3, 3);
        layout.set(Position::new(1, 0), TerrainKind::Water).unwrap();
        let mut grid = Grid::from_layout(&layout);
        grid.place_occupant(Position::new(0, 0), UnitId(1)).unwrap();

        let blocked = grid.move_occupant(Position::new(0, 0), Position::new(1, 0));
        assert!(matches!(blocked, Err(GridError::IllegalMove { .. })));
        assert_eq!(grid.occupant_at(Position::new(0, 0)), Some(UnitId(1)));

        let empty = grid.move_occupant(Position::new(2, 2), Position::new(2, 1));
        assert!(matches!(empty, Err(GridError::IllegalMove { .. })));
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        let grid = Grid::open(4, 4);
        assert_eq!(grid.neighbors(Position::ORIGIN).len(), 2);
        assert_eq!(grid.neighbors(Position::new(1, 1)).len(), 4);
        assert_eq!(grid.neighbors(Position::new(3, 1)).len(), 3);
    }
}
