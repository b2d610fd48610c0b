//! Morphbot Viewer - window, controls and configuration for the robot viewer

mod app;
pub mod config;
mod controls;

pub use app::ViewerApp;
pub use config::ViewerConfig;
pub use controls::{ControlOutcome, Controls};
