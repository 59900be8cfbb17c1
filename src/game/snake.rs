use log::info;
use std::collections::HashSet;

use super::config::{GameConfig, TailPolicy};
use super::direction::Direction;
use super::geometry::{Grid, Position};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// What a single `update` did to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Translated by one cell
    Moved,
    /// Advanced and kept its tail, consuming one pending growth
    Grew,
    /// Died on this update
    Collided(CollisionType),
    /// Already dead, nothing happened
    Idle,
}

/// Builds a straight body with the head first and the rest trailing behind it
fn straight_body(head: Position, direction: Direction, length: usize) -> Vec<Position> {
    let (dx, dy) = direction.delta();
    (0..length as i32)
        .map(|i| head.moved_by(-dx * i, -dy * i))
        .collect()
}

/// Authoritative snake state: body, heading, growth queue, life
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeEngine {
    grid: Grid,
    initial_length: usize,
    tail_policy: TailPolicy,
    /// Body segments, with head at index 0
    body: Vec<Position>,
    direction: Direction,
    pending_growth: u32,
    death: Option<CollisionType>,
}

impl SnakeEngine {
    pub fn new(config: &GameConfig) -> Self {
        let mut engine = Self {
            grid: config.grid(),
            initial_length: config.initial_snake_length,
            tail_policy: config.tail_policy,
            body: Vec::new(),
            direction: Direction::Right,
            pending_growth: 0,
            death: None,
        };
        engine.reset();
        engine
    }

    /// Place a live snake at an arbitrary spot; `reset` still returns to the
    /// configured start
    pub fn with_snake(
        config: &GameConfig,
        head: Position,
        direction: Direction,
        length: usize,
    ) -> Self {
        let mut engine = Self::new(config);
        engine.body = straight_body(head, direction, length);
        engine.direction = direction;
        engine
    }

    /// Back to the start: centered, heading right, no growth pending, alive
    pub fn reset(&mut self) {
        let start = Position::new(
            (self.grid.width / 2) as i32,
            (self.grid.height / 2) as i32,
        );
        self.body = straight_body(start, Direction::Right, self.initial_length);
        self.direction = Direction::Right;
        self.pending_growth = 0;
        self.death = None;
    }

    /// Queue a heading for the next update; reversals are ignored
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    pub fn grow(&mut self, amount: u32) {
        self.pending_growth += amount;
    }

    /// Advance one cell in the current direction
    pub fn update(&mut self) -> UpdateOutcome {
        if !self.is_alive() {
            return UpdateOutcome::Idle;
        }

        let new_head = self.head().moved_in_direction(self.direction);

        if !self.grid.contains(new_head) {
            return self.die(CollisionType::Wall);
        }
        if self.blocks(new_head) {
            return self.die(CollisionType::SelfCollision);
        }

        self.body.insert(0, new_head);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
            UpdateOutcome::Grew
        } else {
            self.body.pop();
            UpdateOutcome::Moved
        }
    }

    /// Whether the head may not enter `pos`, judged on the pre-move body
    fn blocks(&self, pos: Position) -> bool {
        let keeps_tail = self.pending_growth > 0 || self.tail_policy == TailPolicy::Collide;
        let checked = if keeps_tail {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        checked.contains(&pos)
    }

    fn die(&mut self, cause: CollisionType) -> UpdateOutcome {
        info!(
            "snake died ({:?}) at length {} heading {:?}",
            cause,
            self.body.len(),
            self.direction
        );
        self.death = Some(cause);
        UpdateOutcome::Collided(cause)
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub fn death_cause(&self) -> Option<CollisionType> {
        self.death
    }
}
