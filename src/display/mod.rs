//! Rendering of counters and verification results
//!
//! Services talk to a [`RenderSurface`]; the terminal and the in-memory
//! surfaces are the two implementations.

pub mod controller;
pub mod counter;
pub mod surface;
pub mod terminal;

pub use controller::{PresentationController, Transition};
pub use counter::{run_transitions, AnimationTiming, CounterAnimation};
pub use surface::{MemorySurface, MetricDisplay, RenderSurface, VerificationDisplay};
pub use terminal::TerminalSurface;
