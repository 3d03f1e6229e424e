use crate::{
    Config, WeatherError, WeatherReport, WeatherRequest,
    provider::openweather::{OpenWeatherProvider, OpenWeatherSettings},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherReport, WeatherError>;
}

/// Construct the provider from config, failing fast when no API key is set.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;

    let settings = OpenWeatherSettings {
        api_key: api_key.to_owned(),
        base_url: config.base_url().to_owned(),
        timeout: config.http.timeout(),
        retries: config.http.effective_retries(),
    };

    Ok(Box::new(OpenWeatherProvider::new(settings)?))
}
