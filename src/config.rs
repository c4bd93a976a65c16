use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::scenes::Variant;

pub const DEFAULT_DAMPING: f32 = 0.04;
pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 720;
/// Upper bound on shapes; keeps the instance buffer far below wgpu's default
/// `max_buffer_size` (256 MiB)
pub const MAX_SHAPES: usize = 65_536;

/// Box the shapes are scattered in, centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnBounds {
    /// Full extent along x, y, z
    pub extent: [f32; 3],
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for SpawnBounds {
    fn default() -> Self {
        Self {
            extent: [22.0, 12.0, 18.0],
            scale_min: 0.8,
            scale_max: 1.6,
        }
    }
}

impl SpawnBounds {
    pub fn half_extent(&self) -> [f32; 3] {
        self.extent.map(|e| e * 0.5)
    }

    /// True if `p` lies inside the box (inclusive)
    pub fn contains(&self, p: glam::Vec3) -> bool {
        let [hx, hy, hz] = self.half_extent();
        p.x.abs() <= hx && p.y.abs() <= hy && p.z.abs() <= hz
    }
}

/// Everything the animator and its window need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    pub variant: Variant,
    /// None means the variant's own count
    pub shape_count: Option<usize>,
    pub seed: Option<u64>,
    pub damping: f32,
    pub spawn: SpawnBounds,
    pub width: u32,
    pub height: u32,
    pub hud: bool,
    pub duration: Option<f32>,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Geometric,
            shape_count: None,
            seed: None,
            damping: DEFAULT_DAMPING,
            spawn: SpawnBounds::default(),
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            hud: false,
            duration: None,
        }
    }
}

impl AnimatorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid animator config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config file {}", path.display()))
    }

    /// Defaults, then the config file (if any), then explicit flags
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(variant) = cli.variant {
            self.variant = variant;
        }
        if cli.shape_count.is_some() {
            self.shape_count = cli.shape_count;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if cli.duration.is_some() {
            self.duration = cli.duration;
        }
        self.hud |= cli.hud;
    }

    /// Shape count after falling back to the variant default
    pub fn effective_shape_count(&self) -> usize {
        self.shape_count
            .unwrap_or_else(|| self.variant.factory().default_count())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(count) = self.shape_count {
            if count == 0 || count > MAX_SHAPES {
                bail!("shape_count must be in 1..={}, got {}", MAX_SHAPES, count);
            }
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            bail!("damping must be in (0, 1], got {}", self.damping);
        }
        if self.spawn.extent.iter().any(|e| !e.is_finite() || *e < 0.0) {
            bail!("spawn extent must be finite and non-negative, got {:?}", self.spawn.extent);
        }
        if !(self.spawn.scale_min > 0.0 && self.spawn.scale_min <= self.spawn.scale_max) {
            bail!(
                "spawn scale range must satisfy 0 < min <= max, got {}..{}",
                self.spawn.scale_min,
                self.spawn.scale_max
            );
        }
        if self.width == 0 || self.height == 0 {
            bail!("window size must be non-zero, got {}x{}", self.width, self.height);
        }
        if let Some(duration) = self.duration {
            if !(duration.is_finite() && duration > 0.0) {
                bail!("duration must be a positive number of seconds, got {}", duration);
            }
        }
        Ok(())
    }
}
