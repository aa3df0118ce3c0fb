//! Direction vectors and animation curves

/// Compass directions, cluster edges and direction locking
pub mod direction;
/// Interpolation curves for preview animations
pub mod interpolation;
