//! Around interception — context, registrar, and trampoline installation.

pub mod call;
pub mod registrar;

use std::sync::Arc;

use enfold_core::{EnfoldResult, Value};

pub use call::AroundCall;
pub use registrar::{AroundOptions, AroundRegistrar};

/// A wrapper operation: receives the interception context for one call and
/// returns the value the original caller will see.
pub type WrapperFn<T> =
    Arc<dyn for<'a, 'b> Fn(&'a mut AroundCall<'b, T>) -> EnfoldResult<Value> + Send + Sync>;
