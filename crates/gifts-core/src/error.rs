use thiserror::Error;

#[derive(Debug, Error)]
pub enum GiftsError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("rating {0} out of range: must be {min}..={max}", min = crate::catalog::RATING_MIN, max = crate::catalog::RATING_MAX)]
    RatingOutOfRange(u8),

    #[error("unknown plan field: {0}")]
    UnknownPlanField(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, GiftsError>;
