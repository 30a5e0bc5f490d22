use crate::error::StorageError;

pub mod config;
pub mod token;

type Result<T> = std::result::Result<T, StorageError>;
