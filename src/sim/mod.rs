//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod actor;
pub mod boundary;
pub mod quiz;
pub mod rescale;
pub mod session;
pub mod telemetry;
pub mod tick;
pub mod visual;

pub use actor::{Accelerations, ActorParams, ActorState};
pub use boundary::{BoundaryEvent, resolve_boundaries};
pub use quiz::{ChoiceMark, PlotColor, QuizMapping, QuizSelections, Verdict, grade};
pub use rescale::{Bounds, transform};
pub use session::{QuizPhase, RngState, Session};
pub use telemetry::{Quantity, TelemetryBuffer, TelemetryRecorder, TelemetrySample};
pub use tick::{TickInput, tick};
pub use visual::{VisualState, derive_visual, draw_position};
