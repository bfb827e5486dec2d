//! Error type shared by the shell, the commands and the store.
use thiserror::Error;

/// Everything a quiz command can fail with.
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("User ('{0}') doesn't exist!")]
    UserNotFound(String),

    #[error("Response can't be empty!")]
    EmptyResponse,

    #[error("Quiz '{0}' is not in DB")]
    QuizNotFound(String),

    #[error("{0} not in DB")]
    NotDeleted(String),

    #[error("Input closed")]
    InputClosed,

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;
