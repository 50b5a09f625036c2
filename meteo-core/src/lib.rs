//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - An in-memory location registry and variable store
//! - Clients for the forecast and history weather endpoints
//! - CSV/JSON export of variable mappings
//! - Configuration handling and the shared error type
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod location;
pub mod model;
pub mod variable;

pub use client::{ForecastClient, HistoryClient, HttpTransport};
pub use config::{Config, EndpointConfig, HttpConfig};
pub use error::{EntryKind, MeteoError, RequestFailure, Result};
pub use export::{export_csv, export_json};
pub use location::LocationRegistry;
pub use model::{Coordinates, Location, WeatherKind, WeatherResponse};
pub use variable::VariableStore;
