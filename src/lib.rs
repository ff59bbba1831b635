//! Animated Bohr-model atoms rendered as SVG, in the browser (wasm32) or headless.

pub mod app;
pub mod atom;
pub mod constants;
pub mod physics;
pub mod platform;
pub mod renderer;
pub mod simulation;

pub use app::{AtomError, AtomOptions, AtomResult, DurationRange};
pub use physics::elements::{Element, ElementSource, PeriodicTable};
pub use renderer::engine::{AnimationEngine, SmilEngine};
pub use renderer::renderer::{AtomRenderer, RenderedAtom};
