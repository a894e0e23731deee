//! Shared value types: operation names, dynamic arguments, and callbacks.

pub mod name;
pub mod value;

pub use name::OpName;
pub use value::{Args, Callback, Value};
