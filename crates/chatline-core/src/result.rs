//! Convenience result type alias for Chatline.

use crate::error::AppError;

/// A specialized `Result` type for Chatline operations.
pub type AppResult<T> = Result<T, AppError>;
