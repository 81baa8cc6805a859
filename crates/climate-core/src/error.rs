use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClimateError {
    #[error("database query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("dataset is missing required table '{0}'")]
    MissingTable(String),
}

pub type Result<T> = std::result::Result<T, ClimateError>;
