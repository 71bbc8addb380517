//! Error types for classward

use thiserror::Error;

use crate::class::InstantiationError;
use crate::meta::ContractError;
use crate::value::ValueError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),

    #[error("Instantiation error: {0}")]
    Instantiation(#[from] InstantiationError),

    #[error("Value error: {0}")]
    Value(#[from] ValueError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
