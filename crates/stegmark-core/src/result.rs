use crate::error::StegmarkError;

pub type Result<T> = std::result::Result<T, StegmarkError>;
