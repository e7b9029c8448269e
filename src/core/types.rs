//! Core type aliases and re-exports

pub use glam::Vec3;

/// Linear RGBA color, each channel nominally in `[0.0, 1.0]`.
pub type Color = [f32; 4];

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
