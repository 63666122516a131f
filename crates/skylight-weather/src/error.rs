//! Weather-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather unavailable after {attempts} attempts")]
    Unavailable { attempts: u32 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Parse(String),
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } | Self::Network(_) => {
                "Connection interrupted. Check your network and try again."
            }
            Self::Parse(_) => "The weather service returned unexpected data.",
        }
    }
}
