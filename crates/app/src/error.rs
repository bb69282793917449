use client::ClientError;
use engine::{EngineError, SubmitError, ValidationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Submit(#[from] SubmitError<ClientError>),
    #[error("invalid leg \"{0}\": expected ACCOUNT=AMOUNT")]
    InvalidLeg(String),
    #[error("no API token configured (set `token` or SACCO_TELLER_TOKEN)")]
    MissingToken,
}
