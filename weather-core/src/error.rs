use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location must not be empty")]
    EmptyLocation,

    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to OpenWeather")]
    Network(#[source] reqwest::Error),

    #[error("OpenWeather request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("OpenWeather request failed with status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("Failed to parse OpenWeather JSON")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Missing {0} field in OpenWeather response")]
    MissingField(&'static str),

    #[error("Field {field} in OpenWeather response is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("OpenWeather response contained an empty weather list")]
    EmptyWeatherList,
}

impl WeatherError {
    /// Connect failures and timeouts may succeed on a second attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, WeatherError::Timeout(_))
            || matches!(self, WeatherError::Network(e) if e.is_connect())
    }

    /// The request URL carries `appid`, so it is stripped before the error is kept.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            WeatherError::Timeout(err)
        } else {
            WeatherError::Network(err)
        }
    }
}
