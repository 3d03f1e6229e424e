use serde_json::Number;

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub location: String,
}

impl WeatherRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Current conditions for one location, as returned by the provider.
///
/// Lives for a single lookup; nothing is stored between invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: String,
    pub temperature_kelvin: f64,
    pub description: String,
    pub humidity: u64,
    /// Provider default unit (m/s), kept as written in the response.
    pub wind_speed: Number,
}

impl WeatherReport {
    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_kelvin - KELVIN_OFFSET
    }
}
