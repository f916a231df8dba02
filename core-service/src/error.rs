use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// The status notification channel refused the subscription.
    ///
    /// Unlike catalog and offline-store failures this is not swallowed:
    /// without the subscription the core would silently stop observing
    /// download progress.
    #[error("Status notification subscription failed: {0}")]
    Subscription(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
