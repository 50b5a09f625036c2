//! Human-readable rendering of registry, store and weather data.

use meteo_core::{Location, LocationRegistry, VariableStore, WeatherKind, WeatherResponse};

pub const NO_LOCATIONS: &str = "No locations defined.";
pub const NO_VARIABLES: &str = "No weather variables defined.";

pub fn location(loc: &Location) -> String {
    format!("Name: {}, Latitude: {}, Longitude: {}", loc.name(), loc.latitude(), loc.longitude())
}

pub fn locations(registry: &LocationRegistry) -> String {
    match registry.list() {
        Some(listed) => listed.iter().map(location).collect::<Vec<_>>().join("\n"),
        None => NO_LOCATIONS.to_string(),
    }
}

pub fn variables(store: &VariableStore) -> String {
    match store.list() {
        Some(pairs) => pairs
            .into_iter()
            .map(|(name, value)| format!("Variable: {name}, Value: {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        None => NO_VARIABLES.to_string(),
    }
}

pub fn weather(response: &WeatherResponse) -> String {
    let label = match response.kind {
        WeatherKind::Forecast => "Weather Data",
        WeatherKind::History => "Historical Data",
    };
    format!("{label}: {response}")
}
