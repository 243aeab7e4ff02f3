use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompassError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("history error: {0}")]
    History(String),

    #[error("advice provider error: {0}")]
    Advice(String),

    #[error("no advice provider configured; set [advice] command in compass.toml or use --dry-run")]
    NoAdviceProvider,

    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompassError {
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::PathNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CompassError>;
