use serde::Deserialize;

use crate::ticker::DEFAULT_SMOOTHING;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub publishing: PublishingConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Viewport width in columns.
    pub width: usize,
    /// Below this width the ticker uses a static scroll row instead of the marquee.
    pub narrow_width: usize,
    /// Cells per row in the reduced-motion grid.
    pub grid_columns: usize,
    /// Skip all animation and render targets directly.
    pub reduced_motion: bool,
    pub frame_interval_ms: u64,
    /// Marquee speed in columns per second.
    pub marquee_speed: f64,
    /// Fraction of the remaining distance covered per frame.
    pub smoothing: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 100,
            narrow_width: 60,
            grid_columns: 3,
            reduced_motion: false,
            frame_interval_ms: 50,
            marquee_speed: 8.0,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PublishingConfig {
    /// Max snapshots kept in the broadcast channel (slow frame loops may lag).
    pub broadcast_capacity: usize,
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// How often to log ticker stats (snapshots built, frames rendered) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            stats_log_interval_secs: 60,
        }
    }
}

impl AppConfig {
    /// Loads `CONFIG_FILE` (default `config.toml`). A missing default file
    /// means built-in defaults; a missing explicit file is an error.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(&path),
            Err(_) if std::path::Path::new("config.toml").exists() => {
                Self::load_from_path("config.toml")
            }
            Err(_) => {
                tracing::debug!("no config.toml found; using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.display.width > 0,
            "display.width must be > 0, got {}",
            self.display.width
        );
        anyhow::ensure!(
            self.display.grid_columns > 0,
            "display.grid_columns must be > 0, got {}",
            self.display.grid_columns
        );
        anyhow::ensure!(
            self.display.frame_interval_ms > 0,
            "display.frame_interval_ms must be > 0, got {}",
            self.display.frame_interval_ms
        );
        anyhow::ensure!(
            self.display.marquee_speed.is_finite() && self.display.marquee_speed > 0.0,
            "display.marquee_speed must be > 0, got {}",
            self.display.marquee_speed
        );
        anyhow::ensure!(
            self.display.smoothing > 0.0 && self.display.smoothing <= 1.0,
            "display.smoothing must be in (0, 1], got {}",
            self.display.smoothing
        );
        anyhow::ensure!(
            self.publishing.broadcast_capacity > 0,
            "publishing.broadcast_capacity must be > 0, got {}",
            self.publishing.broadcast_capacity
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
