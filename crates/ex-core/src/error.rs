use thiserror::Error;

pub type ExResult<T> = Result<T, ExError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
