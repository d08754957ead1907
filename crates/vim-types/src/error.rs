use thiserror::Error;

pub type VimTypeResult<T> = Result<T, VimTypeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VimTypeError {
    #[error("unknown managed object kind: {0}")]
    UnknownKind(String),
    #[error("unknown device config operation: {0}")]
    UnknownOperation(String),
}
