/// Curve building service
pub mod curve_service;

pub use curve_service::*;
