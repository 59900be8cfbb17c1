use log::debug;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use super::error::SpawnError;
use super::geometry::{Grid, Position};

/// Owns the single piece of food and places it on free cells
#[derive(Debug, Clone)]
pub struct FoodSpawner<R = ThreadRng> {
    grid: Grid,
    position: Position,
    rng: R,
}

impl FoodSpawner<ThreadRng> {
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, rand::thread_rng())
    }
}

impl FoodSpawner<StdRng> {
    /// Deterministic spawner for replays and tests
    pub fn seeded(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FoodSpawner<R> {
    /// The food sits at the origin until the first `respawn`
    pub fn with_rng(grid: Grid, rng: R) -> Self {
        Self {
            grid,
            position: Position::new(0, 0),
            rng,
        }
    }

    /// Move the food to a uniformly random cell outside `occupied`
    pub fn respawn(&mut self, occupied: &HashSet<Position>) -> Result<Position, SpawnError> {
        let blocked = occupied.iter().filter(|&&c| self.grid.contains(c)).count();
        if blocked >= self.grid.cell_count() {
            return Err(SpawnError::ExhaustedGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        loop {
            let x = self.rng.gen_range(0..self.grid.width) as i32;
            let y = self.rng.gen_range(0..self.grid.height) as i32;
            let pos = Position::new(x, y);

            if !occupied.contains(&pos) {
                debug!("food spawned at ({}, {})", pos.x, pos.y);
                self.position = pos;
                return Ok(pos);
            }
        }
    }

    pub fn current_position(&self) -> Position {
        self.position
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, pos: Position) {
        self.position = pos;
    }
}
