//! # enfold
//!
//! Around interception for named operations. Provides:
//!
//! - Per-type method tables with dispatch-by-name (`MethodTable`)
//! - One-shot pending decorations that fire on the next operation definition
//! - Alias preservation of original implementations (`create_alias`)
//! - Declarative around wrapping with an interception context
//!   (`AroundRegistrar`, `AroundCall`)
//!
//! A type declares, once, that a named decorator should wrap whatever
//! operation it defines next. Callers keep calling the operation under its
//! original name; the installed trampoline builds an [`AroundCall`] and hands
//! control to the wrapper, which decides if and when the preserved original
//! runs.
//!
//! ```
//! use enfold::prelude::*;
//! use serde_json::json;
//!
//! struct Document;
//!
//! let table: MethodTable<Document> = MethodTable::new();
//! table.define_wrapper("audit_wrap", |call| {
//!     call.transfer()?;
//!     let doubled = call.result().and_then(Value::as_i64).unwrap_or_default();
//!     Ok(json!(doubled + 1))
//! });
//! table
//!     .declare_around_wrapper("logged", around_options!(call: "audit_wrap"))
//!     .unwrap();
//! table.activate("logged").unwrap();
//! table
//!     .define("save", |_doc: &Document, args, _cb| {
//!         let x = args[0].as_i64().unwrap_or_default();
//!         Ok(json!(x * 2))
//!     })
//!     .unwrap();
//!
//! let value = table.call(&Document, "save", vec![json!(5)], None).unwrap();
//! assert_eq!(value, json!(11));
//! ```

pub mod alias;
pub mod around;
pub mod macros;
pub mod prelude;
pub mod table;

pub use alias::create_alias;
pub use around::{AroundCall, AroundOptions, AroundRegistrar, WrapperFn};
pub use table::{DeclaratorFn, DecorationHook, InstalledWrapper, MethodFn, MethodTable};

pub use enfold_core::{Args, Callback, EnfoldError, EnfoldResult, ErrorKind, OpName, Value};
