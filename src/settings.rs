//! Simulation settings
//!
//! Every tunable constant the core uses. Defaults reproduce the classic
//! 800x600 game; a JSON file can override any subset of fields.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::rescale::Bounds;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    // === Screen ===
    /// Window width in pixels
    pub screen_width: f32,
    /// Window height in pixels (also the floor line)
    pub screen_height: f32,

    // === Physics ===
    /// Fixed timestep per tick
    pub dt: f32,
    /// Weight acceleration
    pub gravity: f32,
    /// Parachute damping constant
    pub damping: f32,
    /// Thrust step per held tick
    pub thrust_increment: f32,
    /// Half the actor hitbox height
    pub actor_half_height: f32,
    /// Actor hitbox center at reset (display coordinates)
    pub actor_start: Vec2,

    // === Plot ===
    /// Plot width in pixels; one sample per column
    pub plot_width: f32,
    /// Plot height in pixels
    pub plot_height: f32,
    /// Natural velocity range mapped to the plot
    pub velocity_range: (f32, f32),
    /// Natural acceleration range mapped to the plot
    pub acceleration_range: (f32, f32),
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            dt: SIM_DT,
            gravity: GRAVITY,
            damping: DAMPING,
            thrust_increment: THRUST_INCREMENT,
            actor_half_height: ACTOR_HALF_HEIGHT,
            actor_start: Vec2::new(SCREEN_WIDTH / 4.0, SCREEN_HEIGHT / 2.0),

            plot_width: SCREEN_WIDTH / 2.0,
            plot_height: SCREEN_HEIGHT / 2.0,
            velocity_range: VELOCITY_RANGE,
            acceleration_range: ACCELERATION_RANGE,
        }
    }
}

impl SimSettings {
    /// Load settings from a JSON file, falling back to defaults for missing
    /// fields. The result is validated before it is returned.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON (for writing a starter settings file)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("dt", self.dt),
            ("gravity", self.gravity),
            ("damping", self.damping),
            ("thrust_increment", self.thrust_increment),
            ("actor_half_height", self.actor_half_height),
            ("actor_start.x", self.actor_start.x),
            ("actor_start.y", self.actor_start.y),
            ("plot_width", self.plot_width),
            ("plot_height", self.plot_height),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            bail!("{name} must be finite, got {value}");
        }

        if self.dt <= 0.0 {
            bail!("dt must be positive, got {}", self.dt);
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            bail!(
                "screen size must be positive, got {}x{}",
                self.screen_width,
                self.screen_height
            );
        }
        if !(self.plot_width >= 1.0 && self.plot_height > 0.0) {
            bail!(
                "plot must be at least one column wide and have height, got {}x{}",
                self.plot_width,
                self.plot_height
            );
        }
        if self.plot_width > self.screen_width || self.plot_height > self.screen_height {
            bail!(
                "plot {}x{} does not fit on a {}x{} screen",
                self.plot_width,
                self.plot_height,
                self.screen_width,
                self.screen_height
            );
        }
        if self.actor_half_height < 0.0 {
            bail!("actor_half_height must be non-negative, got {}", self.actor_half_height);
        }
        self.displacement_bounds().context("displacement range")?;
        self.velocity_bounds().context("velocity_range")?;
        self.acceleration_bounds().context("acceleration_range")?;
        self.plot_bounds().context("plot range")?;
        Ok(())
    }

    /// Telemetry window capacity (one sample per plot column)
    pub fn plot_capacity(&self) -> usize {
        self.plot_width as usize
    }

    /// Displacement spans floor to ceiling
    pub fn displacement_bounds(&self) -> Result<Bounds> {
        Bounds::new(0.0, self.screen_height)
    }

    pub fn velocity_bounds(&self) -> Result<Bounds> {
        Bounds::new(self.velocity_range.0, self.velocity_range.1)
    }

    pub fn acceleration_bounds(&self) -> Result<Bounds> {
        Bounds::new(self.acceleration_range.0, self.acceleration_range.1)
    }

    /// Plot rows, inverted so larger values are drawn higher
    pub fn plot_bounds(&self) -> Result<Bounds> {
        Bounds::new(self.plot_height, 0.0)
    }
}
