//! Command-line interface for the avour demo launcher.
//!
//! Parses flags that override the config file and selects which bundled
//! demo sketch to run.

use crate::demos::Demo;
use avour_config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// avour - a small creative-coding canvas on winit, wgpu and egui
#[derive(Debug, Parser)]
#[command(name = "avour")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Load configuration from this YAML file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Target draw calls per second (overrides config)
    #[arg(long, value_name = "N", global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub frame_rate: Option<u32>,

    /// Show the measured frame rate in the bottom-left corner
    #[arg(long, global = true)]
    pub show_fps: bool,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Procedural snake that follows the mouse
    Snake,

    /// Input tester: shows held keys, mouse buttons and pointer position
    Tester,

    /// Tour of every drawing primitive
    Shapes,
}

impl From<Commands> for Demo {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Snake => Demo::Snake,
            Commands::Tester => Demo::Tester,
            Commands::Shapes => Demo::Shapes,
        }
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    pub demo: Demo,
    /// Config file override
    pub config_path: Option<PathBuf>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
    pub frame_rate: Option<u32>,
    pub show_fps: bool,
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            demo: cli.command.into(),
            config_path: cli.config,
            log_level: cli.log_level.map(LogLevelArg::to_level_filter),
            frame_rate: cli.frame_rate,
            show_fps: cli.show_fps,
        }
    }
}

impl RuntimeOptions {
    /// Apply CLI overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(rate) = self.frame_rate {
            log::info!("CLI override: frame rate {}", rate);
            config.frame_rate = rate;
        }
        if self.show_fps {
            config.show_fps = true;
        }
    }

    /// Load the config from `--config` or the default location.
    pub fn load_config(&self) -> Result<Config, avour_config::ConfigError> {
        let mut config = match &self.config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load_or_default()?,
        };
        self.apply(&mut config);
        Ok(config)
    }
}

/// Parse CLI arguments
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}
