//! Result alias used across the workspace.

use crate::error::EnfoldError;

/// Convenience alias for results carrying [`EnfoldError`].
pub type EnfoldResult<T> = Result<T, EnfoldError>;
