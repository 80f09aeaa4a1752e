pub mod contact;
pub mod experiment;
pub mod newsletter;
pub mod preferences;
pub mod repository;
pub mod stock;
pub mod validation;

pub use validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Upstream source unavailable: {0}")]
    Unavailable(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
