use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Number, Value};
use std::{fmt, time::Duration};
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{WeatherReport, WeatherRequest},
};

use super::WeatherProvider;

#[derive(Clone)]
pub struct OpenWeatherSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retries: u32,
}

impl fmt::Debug for OpenWeatherSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    settings: OpenWeatherSettings,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(settings: OpenWeatherSettings) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(WeatherError::Client)?;

        Ok(Self { settings, http })
    }

    async fn fetch_current(&self, location: &str) -> Result<(StatusCode, String), WeatherError> {
        // No `units` parameter: the provider answers in Kelvin and m/s.
        let res = self
            .http
            .get(&self.settings.base_url)
            .query(&[("q", location), ("appid", self.settings.api_key.as_str())])
            .send()
            .await
            .map_err(WeatherError::from_send)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::from_send)?;

        Ok((status, body))
    }

    async fn fetch_with_retry(&self, location: &str) -> Result<(StatusCode, String), WeatherError> {
        let mut attempt = 0;
        loop {
            match self.fetch_current(location).await {
                Err(err) if err.is_transient() && attempt < self.settings.retries => {
                    attempt += 1;
                    warn!(error = %err, attempt, "transient OpenWeather failure, retrying");
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherReport, WeatherError> {
        let location = request.location.as_str();
        if location.trim().is_empty() {
            return Err(WeatherError::EmptyLocation);
        }

        debug!(location, "requesting current weather");
        let (status, body) = self.fetch_with_retry(location).await?;
        debug!(%status, bytes = body.len(), "received OpenWeather response");

        if !status.is_success() {
            return Err(WeatherError::HttpStatus {
                status,
                body: truncate_body(&body),
            });
        }

        parse_current(location, &body)
    }
}

/// Extract the report fields from a "current weather" JSON body.
pub fn parse_current(location: &str, body: &str) -> Result<WeatherReport, WeatherError> {
    let json: Value = serde_json::from_str(body).map_err(WeatherError::MalformedJson)?;

    let temperature_kelvin = number_at(&json, "main.temp")?
        .as_f64()
        .ok_or(WeatherError::InvalidField {
            field: "main.temp",
            expected: "a finite number",
        })?;
    let description = first_description(&json)?;
    let humidity = lookup(&json, "main.humidity")?
        .as_u64()
        .ok_or(WeatherError::InvalidField {
            field: "main.humidity",
            expected: "an unsigned integer",
        })?;
    let wind_speed = number_at(&json, "wind.speed")?.clone();

    Ok(WeatherReport {
        location: location.to_owned(),
        temperature_kelvin,
        description,
        humidity,
        wind_speed,
    })
}

fn lookup<'a>(json: &'a Value, path: &'static str) -> Result<&'a Value, WeatherError> {
    path.split('.')
        .try_fold(json, |node, key| node.get(key))
        .ok_or(WeatherError::MissingField(path))
}

fn number_at<'a>(json: &'a Value, path: &'static str) -> Result<&'a Number, WeatherError> {
    lookup(json, path)?
        .as_number()
        .ok_or(WeatherError::InvalidField {
            field: path,
            expected: "a number",
        })
}

fn first_description(json: &Value) -> Result<String, WeatherError> {
    let list = lookup(json, "weather")?
        .as_array()
        .ok_or(WeatherError::InvalidField {
            field: "weather",
            expected: "a list",
        })?;

    let first = list.first().ok_or(WeatherError::EmptyWeatherList)?;

    first
        .get("description")
        .ok_or(WeatherError::MissingField("weather[0].description"))?
        .as_str()
        .map(str::to_owned)
        .ok_or(WeatherError::InvalidField {
            field: "weather[0].description",
            expected: "a string",
        })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
