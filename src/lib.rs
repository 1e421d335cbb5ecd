pub mod assistant;
pub mod config;
pub mod engine;
pub mod permission;
pub mod transcript;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SibylError {
    #[error("Engine error: {0}")]
    EngineError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("UI error: {0}")]
    UiError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for SibylError {
    fn from(e: std::io::Error) -> Self {
        SibylError::IOError(e.to_string())
    }
}

impl SibylError {
    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            SibylError::EngineError(_) => {
                "The voice engine reported an error. Please try again.".to_string()
            }
            SibylError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            SibylError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            SibylError::UiError(_) => "Display error occurred.".to_string(),
            SibylError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SibylError>;
