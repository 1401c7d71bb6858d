use thiserror::Error;

#[derive(Error, Debug)]
pub enum LapsecamError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Selection index {index} out of range for list of {len}")]
    Selection { index: usize, len: usize },

    #[error("Camera error: {message}")]
    Camera { message: String },

    #[error("Display error: {message}")]
    Display { message: String },

    #[error("GPIO error: {message}")]
    Gpio { message: String },

    #[error("System error: {message}")]
    System { message: String },
}

impl LapsecamError {
    pub fn camera<S: Into<String>>(message: S) -> Self {
        Self::Camera {
            message: message.into(),
        }
    }

    pub fn display<S: Into<String>>(message: S) -> Self {
        Self::Display {
            message: message.into(),
        }
    }

    pub fn gpio<S: Into<String>>(message: S) -> Self {
        Self::Gpio {
            message: message.into(),
        }
    }

    pub fn system<S: Into<String>>(message: S) -> Self {
        Self::System {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LapsecamError>;
