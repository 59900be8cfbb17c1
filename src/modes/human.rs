use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};

use crate::game::{Direction, GameConfig, GameSession, Snapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Host-side knobs that never reach the engine
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    /// Terminal cells per grid cell edge
    pub cell_size: u32,
    /// Fixed food seed; a random one is drawn and logged when absent
    pub seed: Option<u64>,
    /// Leave the game as soon as the win threshold is reached
    pub exit_on_win: bool,
}

pub struct HumanMode {
    session: GameSession<StdRng>,
    snapshot: Snapshot,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    exit_on_win: bool,
    should_quit: bool,
    paused: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig, options: HostOptions) -> Result<Self> {
        let seed = options.seed.unwrap_or_else(rand::random);
        info!("food seed {}", seed);

        let session = GameSession::with_seed(config, seed).context("Failed to start session")?;
        let snapshot = session.snapshot();

        Ok(Self {
            session,
            snapshot,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(options.cell_size),
            input_handler: InputHandler::new(),
            exit_on_win: options.exit_on_win,
            should_quit: false,
            paused: false,
            pending_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_period = self.session.tick_interval();
        let mut tick_timer = Self::tick_timer(tick_period);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                _ = tick_timer.tick() => {
                    if self.is_playing() {
                        self.update_game()?;
                    }
                }

                _ = render_timer.tick() => {
                    if self.is_playing() {
                        self.metrics.update();
                    }
                    let grid = self.session.config().grid();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.snapshot, grid, &self.metrics, self.paused);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Speed changes on eating and on restart
            let period = self.session.tick_interval();
            if period != tick_period {
                tick_period = period;
                tick_timer = Self::tick_timer(tick_period);
            }
        }

        Ok(())
    }

    fn tick_timer(period: Duration) -> Interval {
        interval_at(Instant::now() + period, period)
    }

    /// Alive, not won, not paused
    fn is_playing(&self) -> bool {
        self.snapshot.alive && !self.snapshot.complete && !self.paused
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Move(direction) => {
                    if self.snapshot.alive {
                        self.pending_direction = Some(direction);
                    }
                }
                KeyAction::Restart => {
                    if !self.snapshot.alive || self.snapshot.complete {
                        self.reset_game()?;
                    }
                }
                KeyAction::TogglePause => {
                    if self.snapshot.alive && !self.snapshot.complete {
                        self.paused = !self.paused;
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let input = self.pending_direction.take();

        match self.session.tick(input) {
            Ok(outcome) => {
                self.snapshot = outcome.snapshot;
            }
            Err(err) => {
                // A snake filling the whole board is as good as a win
                warn!("{}, ending session", err);
                self.snapshot = self.session.snapshot();
                self.snapshot.complete = true;
            }
        }

        if !self.snapshot.alive || self.snapshot.complete {
            let won = self.snapshot.complete;
            self.metrics.on_session_end(self.snapshot.score, won);
            if won && self.exit_on_win {
                self.should_quit = true;
            }
        }

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.snapshot = self
            .session
            .restart()
            .context("Failed to restart session")?;
        self.metrics.on_session_start();
        self.pending_direction = None;
        self.paused = false;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
