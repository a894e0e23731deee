//! Dynamic values, argument lists, and trailing callbacks.
//!
//! Operations are dispatched by name, so their arguments and return values
//! share a single dynamic currency: [`serde_json::Value`]. A call may also
//! carry one optional trailing [`Callback`], which the wrapped operation (or
//! the wrapper, via the interception context) can invoke any number of times.

use std::fmt;
use std::sync::Arc;

/// Dynamic value passed to and returned from operations.
pub type Value = serde_json::Value;

/// Ordered positional arguments of one call.
pub type Args = Vec<Value>;

/// A trailing callback supplied by the caller of an operation.
///
/// Cloning is cheap; all clones share the same underlying closure.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn(Args) -> Value + Send + Sync>);

impl Callback {
    /// Wrap a closure as a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Args) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the callback with the given arguments.
    pub fn invoke(&self, args: Args) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_the_closure() {
        let cb = Callback::new(|args| json!(args.len()));
        let clone = cb.clone();
        assert_eq!(cb.invoke(vec![json!(1), json!(2)]), json!(2));
        assert_eq!(clone.invoke(vec![]), json!(0));
    }
}
