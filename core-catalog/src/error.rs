use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The remote catalog could not be reached or refused the request.
    #[error("Catalog unavailable: {0}")]
    Unavailable(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
