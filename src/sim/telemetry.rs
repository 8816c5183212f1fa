//! Rolling telemetry for the live plot
//!
//! Each tick records displacement, velocity and net acceleration, already
//! mapped into plot rows, into a fixed-capacity window. Once the window is
//! full the oldest column scrolls off the left edge.

use std::collections::VecDeque;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::actor::ActorState;
use super::rescale::{Bounds, transform};
use crate::settings::SimSettings;

/// The three plotted quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quantity {
    Displacement,
    Velocity,
    Acceleration,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [
        Quantity::Displacement,
        Quantity::Velocity,
        Quantity::Acceleration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Quantity::Displacement => "Displacement:",
            Quantity::Velocity => "Velocity:",
            Quantity::Acceleration => "Acceleration:",
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// One plot column, in plot-row coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub displacement: f32,
    pub velocity: f32,
    pub net_acceleration: f32,
}

impl TelemetrySample {
    pub fn get(&self, quantity: Quantity) -> f32 {
        match quantity {
            Quantity::Displacement => self.displacement,
            Quantity::Velocity => self.velocity,
            Quantity::Acceleration => self.net_acceleration,
        }
    }
}

/// Fixed-capacity rolling window of samples, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryBuffer {
    samples: VecDeque<TelemetrySample>,
    capacity: usize,
}

impl TelemetryBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append, evicting the oldest sample when full
    pub fn record(&mut self, sample: TelemetrySample) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Samples from oldest (leftmost column) to newest
    pub fn iter(&self) -> impl Iterator<Item = &TelemetrySample> {
        self.samples.iter()
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.samples.back()
    }

    /// One quantity's trace as (column, row) points, ready to plot
    pub fn trace(&self, quantity: Quantity) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(move |(col, s)| (col, s.get(quantity)))
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Maps actor state into plot rows and feeds the rolling buffer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryRecorder {
    screen_height: f32,
    displacement: Bounds,
    velocity: Bounds,
    acceleration: Bounds,
    plot: Bounds,
    buffer: TelemetryBuffer,
}

impl TelemetryRecorder {
    /// Fails on degenerate rescale ranges
    pub fn new(settings: &SimSettings) -> Result<Self> {
        Ok(Self {
            screen_height: settings.screen_height,
            displacement: settings.displacement_bounds()?,
            velocity: settings.velocity_bounds()?,
            acceleration: settings.acceleration_bounds()?,
            plot: settings.plot_bounds()?,
            buffer: TelemetryBuffer::new(settings.plot_capacity()),
        })
    }

    /// Rescaled sample for the actor's current state
    pub fn sample(&self, actor: &ActorState) -> TelemetrySample {
        TelemetrySample {
            displacement: transform(self.screen_height - actor.y(), self.displacement, self.plot),
            velocity: transform(actor.velocity, self.velocity, self.plot),
            net_acceleration: transform(actor.accelerations().net(), self.acceleration, self.plot),
        }
    }

    pub fn record(&mut self, actor: &ActorState) {
        let sample = self.sample(actor);
        self.buffer.record(sample);
    }

    pub fn buffer(&self) -> &TelemetryBuffer {
        &self.buffer
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
