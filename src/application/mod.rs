/// Application configuration module
pub mod config;
/// Interfaces implemented by market data stores
pub mod interfaces;
/// Conventions and curve models
pub mod models;
/// Curve building services
pub mod services;
