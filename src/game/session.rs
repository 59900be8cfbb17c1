use log::{debug, info};
use rand::{
    Rng, SeedableRng,
    rngs::{StdRng, ThreadRng},
};
use serde::Serialize;
use std::time::Duration;

use super::{
    config::GameConfig,
    direction::Direction,
    error::SpawnError,
    food::FoodSpawner,
    geometry::Position,
    snake::{CollisionType, SnakeEngine, UpdateOutcome},
};

/// Read-only view of one tick, handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Head first
    pub snake_body: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub alive: bool,
    /// Ticks per second the host should run at
    pub speed: u32,
    /// The win threshold has been reached
    pub complete: bool,
}

/// Information about a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub snapshot: Snapshot,
    pub info: StepInfo,
    /// The session completed on this tick or earlier
    pub completed: bool,
}

/// One play-through: drives the snake, feeds it, keeps score and pace
pub struct GameSession<R = ThreadRng> {
    config: GameConfig,
    snake: SnakeEngine,
    food: FoodSpawner<R>,
    score: u32,
    speed: u32,
    completed: bool,
}

impl GameSession<ThreadRng> {
    pub fn new(config: GameConfig) -> Result<Self, SpawnError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl GameSession<StdRng> {
    /// Session with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, SpawnError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, SpawnError> {
        let snake = SnakeEngine::new(&config);
        let mut food = FoodSpawner::with_rng(config.grid(), rng);
        food.respawn(&snake.occupied_cells())?;

        info!(
            "session started on {}x{} grid",
            config.grid_width, config.grid_height
        );

        Ok(Self {
            speed: config.base_speed,
            config,
            snake,
            food,
            score: 0,
            completed: false,
        })
    }

    /// Advance the game by one step, applying at most one direction input
    ///
    /// A completed session is stopped: ticking it changes nothing until
    /// `restart`. The only error is a food respawn with no free cell left.
    pub fn tick(&mut self, input: Option<Direction>) -> Result<TickOutcome, SpawnError> {
        let mut info = StepInfo::default();

        if self.completed {
            return Ok(self.outcome(info));
        }

        if let Some(direction) = input {
            if self.snake.is_alive() {
                self.snake.set_direction(direction);
            }
        }

        if self.snake.is_alive() {
            if let UpdateOutcome::Collided(collision) = self.snake.update() {
                info.collision_type = Some(collision);
            }
        }

        if self.snake.is_alive() && self.snake.head() == self.food.current_position() {
            info.ate_food = true;
            self.snake.grow(1);
            self.score += 1;
            self.speed = self.config.speed_for_score(self.score);
            debug!("food eaten, score {} speed {}", self.score, self.speed);
            self.food.respawn(&self.snake.occupied_cells())?;
        }

        if let Some(win_score) = self.config.win_score {
            if self.score >= win_score {
                self.completed = true;
                info!("session complete with score {}", self.score);
            }
        }

        Ok(self.outcome(info))
    }

    /// Fresh snake, fresh food, score and speed back to defaults
    pub fn restart(&mut self) -> Result<Snapshot, SpawnError> {
        self.snake.reset();
        self.food.respawn(&self.snake.occupied_cells())?;
        self.score = 0;
        self.speed = self.config.base_speed;
        self.completed = false;
        info!("session restarted");
        Ok(self.snapshot())
    }

    fn outcome(&self, info: StepInfo) -> TickOutcome {
        TickOutcome {
            snapshot: self.snapshot(),
            info,
            completed: self.completed,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake_body: self.snake.body().to_vec(),
            food: self.food.current_position(),
            score: self.score,
            alive: self.snake.is_alive(),
            speed: self.speed,
            complete: self.completed,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &SnakeEngine {
        &self.snake
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Wall-clock period between ticks at the current speed
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.speed.max(1)
    }

    pub fn is_alive(&self) -> bool {
        self.snake.is_alive()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn is_running(&self) -> bool {
        !self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession<StdRng> {
        GameSession::with_seed(GameConfig::default(), 7).unwrap()
    }

    /// Food directly in front of the head
    fn feed(session: &mut GameSession<StdRng>) {
        let ahead = session
            .snake
            .head()
            .moved_in_direction(session.snake.direction());
        session.food.place(ahead);
    }

    #[test]
    fn test_new_session() {
        let session = session();
        let snapshot = session.snapshot();

        assert!(snapshot.alive);
        assert!(!snapshot.complete);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.speed, 10);
        assert_eq!(snapshot.snake_body.len(), 4);
        assert!(!snapshot.snake_body.contains(&snapshot.food));
        assert!(session.is_running());
    }

    #[test]
    fn test_unseeded_session_places_food() {
        let session = GameSession::new(GameConfig::default()).unwrap();
        let snapshot = session.snapshot();
        assert!(!snapshot.snake_body.contains(&snapshot.food));
        assert!(session.config().grid().contains(snapshot.food));
    }

    #[test]
    fn test_first_tick_moves_right() {
        let mut session = session();
        session.food.place(Position::new(0, 0));

        let outcome = session.tick(None).unwrap();

        assert_eq!(outcome.snapshot.snake_body[0], Position::new(3, 5));
        assert_eq!(outcome.snapshot.snake_body.len(), 4);
        assert!(outcome.snapshot.alive);
        assert_eq!(outcome.info, StepInfo::default());
        assert!(!outcome.completed);
    }

    #[test]
    fn test_input_applied_before_move() {
        let mut session = session();
        session.food.place(Position::new(0, 0));

        let outcome = session.tick(Some(Direction::Up)).unwrap();
        assert_eq!(outcome.snapshot.snake_body[0], Position::new(2, 4));

        // Reversal is ignored, the snake keeps going up
        let outcome = session.tick(Some(Direction::Down)).unwrap();
        assert_eq!(outcome.snapshot.snake_body[0], Position::new(2, 3));
    }

    #[test]
    fn test_food_consumption() {
        let mut session = session();
        feed(&mut session);
        let initial_length = session.snake.len();

        let outcome = session.tick(None).unwrap();

        assert!(outcome.info.ate_food);
        assert_eq!(outcome.snapshot.score, 1);
        assert_eq!(session.snake.pending_growth(), 1);
        assert_eq!(session.snake.len(), initial_length);
        assert!(!session.snake.body().contains(&outcome.snapshot.food));

        session.food.place(Position::new(0, 0));
        session.tick(Some(Direction::Up)).unwrap();
        assert_eq!(session.snake.len(), initial_length + 1);
    }

    #[test]
    fn test_wall_death_reported() {
        let mut session = session();
        session.food.place(Position::new(0, 0));
        session.tick(None).unwrap();
        session.tick(None).unwrap();

        let outcome = session.tick(None).unwrap();
        assert!(!outcome.snapshot.alive);
        assert_eq!(outcome.info.collision_type, Some(CollisionType::Wall));
        assert!(!outcome.completed);

        // Dead snakes ignore input and stay put
        let body = outcome.snapshot.snake_body.clone();
        let outcome = session.tick(Some(Direction::Up)).unwrap();
        assert_eq!(outcome.snapshot.snake_body, body);
        assert_eq!(outcome.info, StepInfo::default());
    }

    #[test]
    fn test_speed_monotonic_and_capped() {
        let config = GameConfig::default();
        let mut previous = config.speed_for_score(0);
        assert_eq!(previous, config.base_speed);

        for score in 1..200 {
            let speed = config.speed_for_score(score);
            assert!(speed >= previous);
            assert!(speed <= config.max_speed);
            previous = speed;
        }
        assert_eq!(config.speed_for_score(3), 11);
        assert_eq!(previous, config.max_speed);
    }

    #[test]
    fn test_speed_tracks_score() {
        let config = GameConfig {
            win_score: None,
            ..GameConfig::new(20, 20)
        };
        let mut session = GameSession::with_seed(config, 3).unwrap();

        for expected_score in 1..=6 {
            session.snake.set_direction(if expected_score % 2 == 0 {
                Direction::Down
            } else {
                Direction::Right
            });
            feed(&mut session);
            let outcome = session.tick(None).unwrap();
            assert!(outcome.info.ate_food);
            assert_eq!(outcome.snapshot.score, expected_score);
            assert_eq!(outcome.snapshot.speed, 10 + expected_score / 3);
        }
        assert_eq!(session.tick_interval(), Duration::from_secs(1) / 12);
    }

    #[test]
    fn test_win_on_fifth_food() {
        let mut session = session();
        session.score = 4;
        feed(&mut session);

        let outcome = session.tick(None).unwrap();

        assert!(outcome.completed);
        assert!(outcome.snapshot.complete);
        assert!(outcome.snapshot.alive);
        assert_eq!(outcome.snapshot.score, 5);
        assert!(!session.is_running());

        // Stopped: further ticks leave everything as is
        let after = session.tick(Some(Direction::Down)).unwrap();
        assert!(after.completed);
        assert_eq!(after.snapshot, outcome.snapshot);
    }

    #[test]
    fn test_no_win_threshold() {
        let config = GameConfig {
            win_score: None,
            ..GameConfig::default()
        };
        let mut session = GameSession::with_seed(config, 1).unwrap();
        session.score = 99;
        feed(&mut session);

        let outcome = session.tick(None).unwrap();
        assert_eq!(outcome.snapshot.score, 100);
        assert!(!outcome.completed);
    }

    #[test]
    fn test_restart() {
        let mut session = session();
        session.score = 4;
        feed(&mut session);
        session.tick(None).unwrap();
        assert!(session.is_complete());

        let snapshot = session.restart().unwrap();

        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.speed, 10);
        assert!(snapshot.alive);
        assert!(!snapshot.complete);
        assert_eq!(snapshot.snake_body[0], Position::new(2, 5));
        assert!(!snapshot.snake_body.contains(&snapshot.food));
        assert!(session.is_running());
    }

    #[test]
    fn test_restart_idempotent() {
        let mut once = session();
        let mut twice = session();
        for s in [&mut once, &mut twice] {
            s.snake.set_direction(Direction::Down);
            for _ in 0..6 {
                s.tick(None).unwrap();
            }
        }

        let a = once.restart().unwrap();
        twice.restart().unwrap();
        let b = twice.restart().unwrap();

        assert_eq!(a.snake_body, b.snake_body);
        assert_eq!(a.score, b.score);
        assert_eq!(a.speed, b.speed);
        assert_eq!(a.alive, b.alive);
        assert_eq!(a.complete, b.complete);
        assert_eq!(once.snake, twice.snake);
        assert!(!b.snake_body.contains(&b.food));
    }

    #[test]
    fn test_exhausted_grid_surfaces() {
        let config = GameConfig {
            initial_snake_length: 2,
            win_score: None,
            ..GameConfig::new(3, 1)
        };
        // Body: (1,0), (0,0); only (2,0) is free
        let mut session = GameSession::with_seed(config, 5).unwrap();
        assert_eq!(session.snapshot().food, Position::new(2, 0));

        assert_eq!(
            session.tick(None),
            Err(SpawnError::ExhaustedGrid {
                width: 3,
                height: 1
            })
        );
    }
}
