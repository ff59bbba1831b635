pub mod engine;
pub mod headless;
#[allow(clippy::module_inception)]
pub mod renderer;
pub mod surface;
