use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::model::WeatherReport;

pub const SEPARATOR: &str = "-------------------------------------------------------------";

/// e.g. `14 Oct 2026 | 03:04:05 PM`
pub const TIMESTAMP_FORMAT: &str = "%d %b %Y | %I:%M:%S %p";

pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Render the fixed multi-line report. Every line ends with a newline.
pub fn render(report: &WeatherReport, generated_at: &str) -> String {
    format!(
        "{SEPARATOR}\n\
         Weather Stats for - {location}  || {generated_at}\n\
         {SEPARATOR}\n\
         Current temperature is: {celsius:.2} deg C\n\
         Current weather desc  : {description}\n\
         Current Humidity      : {humidity} %\n\
         Current wind speed    : {wind_speed} kmph\n",
        location = report.location.to_uppercase(),
        celsius = report.temperature_celsius(),
        description = report.description,
        humidity = report.humidity,
        wind_speed = report.wind_speed,
    )
}

impl WeatherReport {
    /// Render with the local wall-clock time of this call.
    pub fn render_now(&self) -> String {
        render(self, &format_timestamp(&Local::now()))
    }
}
