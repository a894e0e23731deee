//! Alias preservation of original implementations.
//!
//! Before a trampoline takes over an operation's name, the current
//! implementation is copied under a generated alias so it stays callable
//! unchanged. The alias is derived from the operation and the decorator
//! scope, which makes it unique per (operation, decorator) pair and never
//! equal to the operation name itself.

use tracing::debug;

use enfold_core::{EnfoldResult, OpName};

use crate::table::MethodTable;

/// Preserves the current implementation of `operation` under a generated
/// alias scoped to `scope`, and returns the alias.
///
/// The generated name is `{operation}_without_{scope}`. Fails with
/// `UnknownOperation` if the operation is not defined, and with
/// `AliasCollision` if the alias is already in use (aliasing is safe to do
/// once per (operation, scope) pair).
pub fn create_alias<T: 'static>(
    table: &MethodTable<T>,
    operation: &OpName,
    scope: &OpName,
) -> EnfoldResult<OpName> {
    let alias = OpName::from(format!("{operation}_without_{scope}"));
    table.alias_method(operation.as_str(), alias.clone())?;
    debug!(operation = %operation, alias = %alias, "original implementation aliased");
    Ok(alias)
}
