//! Breadth-first reachability over walkable tiles.
//!
//! Every search is bounded by the lattice area; there is no diagonal movement.
use std::collections::VecDeque;

use super::{Grid, GridDimensions, Position};

/// Shortest walkable path length from `from` to `to`, giving up beyond `limit`.
///
/// Intermediate tiles and the destination must be walkable; the origin is the
/// mover's own tile and is never re-checked.
pub(super) fn bounded_path_length(
    grid: &Grid,
    from: Position,
    to: Position,
    limit: u32,
) -> Option<u32> {
    let dims = grid.dimensions();
    let start = dims.index(from)?;
    let goal = dims.index(to)?;
    if start == goal {
        return Some(0);
    }

    let mut dist = vec![u32::MAX; dims.area()];
    dist[start] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        let d = dist[dims.index(current)?];
        if d >= limit {
            continue;
        }
        for neighbor in grid.neighbors(current) {
            if !grid.is_walkable(neighbor) {
                continue;
            }
            let Some(index) = dims.index(neighbor) else {
                continue;
            };
            if dist[index] <= d + 1 {
                continue;
            }
            if index == goal {
                return Some(d + 1);
            }
            dist[index] = d + 1;
            queue.push_back(neighbor);
        }
    }

    None
}

/// Walking distance to a goal tile from every tile of the grid.
///
/// The goal is usually occupied (it is the unit being approached), so it is
/// seeded directly; every other tile enters the field only if it is walkable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    goal: Position,
    dims: GridDimensions,
    dist: Vec<u32>,
}

impl DistanceField {
    pub(super) fn towards(grid: &Grid, goal: Position) -> Self {
        let dims = grid.dimensions();
        let mut dist = vec![u32::MAX; dims.area()];
        let mut queue = VecDeque::new();

        if let Some(index) = dims.index(goal) {
            dist[index] = 0;
            queue.push_back(goal);
        }

        while let Some(current) = queue.pop_front() {
            let Some(current_index) = dims.index(current) else {
                continue;
            };
            let d = dist[current_index];
            for neighbor in grid.neighbors(current) {
                if !grid.is_walkable(neighbor) {
                    continue;
                }
                let Some(index) = dims.index(neighbor) else {
                    continue;
                };
                if dist[index] <= d + 1 {
                    continue;
                }
                dist[index] = d + 1;
                queue.push_back(neighbor);
            }
        }

        Self { goal, dims, dist }
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Steps from `position` to the goal, or `None` when unreachable.
    pub fn distance(&self, position: Position) -> Option<u32> {
        match self.dist[self.dims.index(position)?] {
            u32::MAX => None,
            d => Some(d),
        }
    }
}
