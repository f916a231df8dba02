use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("External subsystem unavailable: {0}")]
    Unavailable(String),

    #[error("Request rejected by external subsystem: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
