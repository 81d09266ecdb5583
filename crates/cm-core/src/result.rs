//! Result type alias for engine operations

use crate::error::CmError;

/// Standard Result type for ConstructManager operations
pub type CmResult<T> = Result<T, CmError>;
