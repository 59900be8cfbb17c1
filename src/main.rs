use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, TailPolicy};
use grid_snake::modes::{HostOptions, HumanMode};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a small grid, in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Initial snake length
    #[arg(long)]
    initial_length: Option<usize>,

    /// Ticks per second at score 0
    #[arg(long)]
    base_speed: Option<u32>,

    /// Maximum ticks per second
    #[arg(long)]
    max_speed: Option<u32>,

    /// Score that wins the session
    #[arg(long, conflicts_with = "no_win")]
    win_score: Option<u32>,

    /// Play until the snake dies
    #[arg(long)]
    no_win: bool,

    /// Let the head move into the cell the tail is leaving
    #[arg(long)]
    vacating_tail: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Terminal cells per grid cell edge
    #[arg(long, default_value = "2")]
    cell_size: u32,

    /// Quit as soon as the session is won
    #[arg(long)]
    exit_on_win: bool,

    /// Log file (the terminal is owned by the game)
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

impl Cli {
    /// Defaults, then the config file, then individual flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(length) = self.initial_length {
            config.initial_snake_length = length;
        }
        if let Some(speed) = self.base_speed {
            config.base_speed = speed;
        }
        if let Some(speed) = self.max_speed {
            config.max_speed = speed;
        }
        if let Some(score) = self.win_score {
            config.win_score = Some(score);
        }
        if self.no_win {
            config.win_score = None;
        }
        if self.vacating_tail {
            config.tail_policy = TailPolicy::Vacate;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!("starting with {:?}", config);

    let options = HostOptions {
        cell_size: cli.cell_size,
        seed: cli.seed,
        exit_on_win: cli.exit_on_win,
    };

    let mut human_mode = HumanMode::new(config, options)?;
    human_mode.run().await?;

    info!("bye");
    Ok(())
}
