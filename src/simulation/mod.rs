pub mod atom;
pub mod planner;
pub mod timeline;
