//! Numerical core: rate helpers, interpolated zero curves and the bootstrapper
//! that fits one to the other.

/// Iterative bootstrapping
pub mod bootstrap;
/// Rate helpers for deposits, FRAs, futures and swaps
pub mod helpers;
/// Interpolation schemes
pub mod interpolation;
/// Root finding
pub mod solver;
/// Yield term structures
pub mod term_structure;

pub use bootstrap::{BootstrapConfig, Bootstrapper};
pub use helpers::{InstrumentKind, RateHelper};
pub use interpolation::Interpolation;
pub use solver::BrentSolver;
pub use term_structure::{YieldCurve, YieldTermStructure};
