use std::error;
use std::fmt;
use std::result;

/// Errors returned by tree operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The value cannot be ordered by the tree's comparator.
    InvalidInput,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidInput => write!(f, "value cannot be ordered by the tree's comparator"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
