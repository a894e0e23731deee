//! Common imports for working with Enfold.

pub use crate::alias::create_alias;
pub use crate::around::{AroundCall, AroundOptions, AroundRegistrar, WrapperFn};
pub use crate::table::{DeclaratorFn, DecorationHook, InstalledWrapper, MethodFn, MethodTable};
pub use crate::{args, around_options};

pub use enfold_core::{Args, Callback, EnfoldError, EnfoldResult, ErrorKind, OpName, Value};
