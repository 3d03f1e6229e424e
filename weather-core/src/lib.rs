//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The lookup error taxonomy
//! - Abstraction over the weather provider (OpenWeather)
//! - The report model and its fixed text rendering
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;

pub use config::{Config, HttpConfig, OpenWeatherConfig};
pub use error::WeatherError;
pub use model::{WeatherReport, WeatherRequest};
pub use provider::{WeatherProvider, provider_from_config};
