/// Typed curve conventions
pub mod conventions;

/// Built curves and their points
pub mod curve;

pub use conventions::*;
pub use curve::*;
