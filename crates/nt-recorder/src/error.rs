use nt_core::{AddressError, LinkLayerAddr};
use nt_output::OutputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("recorder configuration error: {0}")]
    Config(String),

    #[error("address error: {0}")]
    Address(#[from] AddressError),

    #[error("no node registered for link-layer address {0}")]
    UnknownAddress(LinkLayerAddr),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

pub type RecorderResult<T> = Result<T, RecorderError>;
