//! # enfold-core
//!
//! Core crate for Enfold. Contains the operation-name type, the dynamic
//! value/argument/callback types shared by every dispatch surface, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Enfold crates.

pub mod error;
pub mod result;
pub mod types;

pub use error::{EnfoldError, ErrorKind};
pub use result::EnfoldResult;
pub use types::{Args, Callback, OpName, Value};
