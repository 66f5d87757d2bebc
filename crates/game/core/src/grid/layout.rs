use std::str::FromStr;

use super::{GridDimensions, Position, TerrainKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout must have at least one row and one column")]
    Empty,

    #[error("row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("unknown terrain glyph '{glyph}' at {position}")]
    UnknownGlyph { glyph: char, position: Position },

    #[error("position {position} is outside the layout")]
    OutOfBounds { position: Position },
}

/// Terrain matrix handed to `Battle::start`.
///
/// Stored row-major; every tile defaults to [`TerrainKind::Floor`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    dimensions: GridDimensions,
    tiles: Vec<TerrainKind>,
}

impl GridLayout {
    pub fn open(width: u32, height: u32) -> Self {
        let dimensions = GridDimensions::new(width, height);
        Self {
            dimensions,
            tiles: vec![TerrainKind::Floor; dimensions.area()],
        }
    }

    pub fn from_rows(rows: Vec<Vec<TerrainKind>>) -> Result<Self, LayoutError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(LayoutError::Empty);
        }

        let mut tiles = Vec::with_capacity(expected * rows.len());
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(LayoutError::RaggedRow {
                    row,
                    width: cells.len(),
                    expected,
                });
            }
            tiles.extend_from_slice(cells);
        }

        Ok(Self {
            dimensions: GridDimensions::new(expected as u32, rows.len() as u32),
            tiles,
        })
    }

    /// Parses an ASCII picture: `.` floor, `#` wall, `~` water.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(picture: &str) -> Result<Self, LayoutError> {
        let mut rows = Vec::new();
        for (y, line) in picture
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
        {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, glyph)| match glyph {
                    '.' => Ok(TerrainKind::Floor),
                    '#' => Ok(TerrainKind::Wall),
                    '~' => Ok(TerrainKind::Water),
                    _ => Err(LayoutError::UnknownGlyph {
                        glyph,
                        position: Position::new(x as i32, y as i32),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn tiles(&self) -> &[TerrainKind] {
        &self.tiles
    }

    pub fn terrain(&self, position: Position) -> Option<TerrainKind> {
        self.dimensions
            .index(position)
            .map(|index| self.tiles[index])
    }

    pub fn set(&mut self, position: Position, terrain: TerrainKind) -> Result<(), LayoutError> {
        let index = self
            .dimensions
            .index(position)
            .ok_or(LayoutError::OutOfBounds { position })?;
        self.tiles[index] = terrain;
        Ok(())
    }

    /// Builder form of [`GridLayout::set`].
    pub fn with(mut self, position: Position, terrain: TerrainKind) -> Result<Self, LayoutError> {
        self.set(position, terrain)?;
        Ok(self)
    }
}

impl FromStr for GridLayout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_rows_top_down() {
        let layout = GridLayout::parse(
            "
            ..#
            ~..
            ",
        )
        .unwrap();

        assert_eq!(layout.dimensions(), GridDimensions::new(3, 2));
        assert_eq!(layout.terrain(Position::new(2, 0)), Some(TerrainKind::Wall));
        assert_eq!(layout.terrain(Position::new(0, 1)), Some(TerrainKind::Water));
        assert_eq!(layout.terrain(Position::new(1, 1)), Some(TerrainKind::Floor));
        assert_eq!(layout.terrain(Position::new(3, 0)), None);
    }

    #[test]
    fn parse_rejects_ragged_and_unknown() {
        assert_eq!(
            GridLayout::parse("...\n..").unwrap_err(),
            LayoutError::RaggedRow {
                row: 1,
                width: 2,
                expected: 3
            }
        );
        assert!(matches!(
            GridLayout::parse(".x."),
            Err(LayoutError::UnknownGlyph { glyph: 'x', .. })
        ));
        assert_eq!(GridLayout::parse("").unwrap_err(), LayoutError::Empty);
    }
}
