use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversion { expected: &'static str, actual: String },

    #[error("Unexpected null value for non-nullable column")]
    UnexpectedNull,
}
