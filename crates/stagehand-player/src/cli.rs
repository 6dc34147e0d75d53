use std::time::Duration;

use clap::Parser;
use stagehand_engine::logging::LoggingConfig;
use stagehand_engine::window::RuntimeConfig;
use stagehand_scene::PlayerConfig;
use winit::dpi::LogicalSize;

#[derive(Debug, Parser)]
#[command(name = "stagehand")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Runs the stagehand demo scene", long_about = None)]
pub struct Cli {
    /// Window title
    #[arg(long, default_value = "stagehand")]
    pub title: String,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    /// Run without a window, with scripted input and a fixed time step
    #[arg(long)]
    pub headless: bool,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 120)]
    pub frames: u64,

    /// Fixed time step in seconds for headless mode
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f64,

    /// Collect garbage every N frames (0 disables collection)
    #[arg(long, default_value_t = 1)]
    pub gc_interval: u64,

    /// Log filter, e.g. "debug" or "stagehand_scene=trace"
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    pub fn logging(&self) -> LoggingConfig {
        match &self.log {
            Some(filter) => LoggingConfig::with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        }
    }

    pub fn player(&self) -> PlayerConfig {
        PlayerConfig { gc_interval: self.gc_interval }
    }

    /// Headless time step. Non-positive or non-finite values fall back to 60 Hz.
    pub fn step(&self) -> Duration {
        Duration::try_from_secs_f64(self.dt)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or(Duration::from_micros(16_667))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["stagehand"]);
        assert!(!cli.headless);
        assert_eq!(cli.frames, 120);
        assert_eq!(cli.player().gc_interval, 1);
        assert_eq!(cli.runtime().initial_size, LogicalSize::new(800.0, 600.0));
        assert!(cli.logging().env_filter.is_none());
    }

    #[test]
    fn headless_flags() {
        let cli = Cli::parse_from([
            "stagehand", "--headless", "--frames", "10", "--dt", "0.5", "--log", "debug",
        ]);
        assert!(cli.headless);
        assert_eq!(cli.step(), Duration::from_millis(500));
        assert_eq!(cli.logging().env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_step_falls_back() {
        let cli = Cli::parse_from(["stagehand", "--dt=-1"]);
        assert_eq!(cli.step(), Duration::from_micros(16_667));
    }
}
