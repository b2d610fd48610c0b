//! Morphbot Core - Foundational types for the Morphbot viewer
//!
//! This crate provides the types that all other Morphbot crates depend on:
//! - `Vec3`, `Color` - Spatial and color types
//! - `Mat4` helpers - column-major matrices for the render matrix stack
//! - Error types and Result alias
//! - Logging initialization

mod error;
mod logging;
pub mod math;
mod types;

pub use error::{MorphError, Result};
pub use logging::init_logging;
pub use math::Mat4;
pub use types::{Color, Vec3};
