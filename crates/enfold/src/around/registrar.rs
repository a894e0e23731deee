//! Declaration-time registration of around wrappers.
//!
//! A type declares, once, a named decorator bound to one of its wrapper
//! operations. Activating the decorator arms a one-shot pending decoration;
//! the next operation the type defines gets its implementation preserved
//! under an alias and replaced by a trampoline that builds an [`AroundCall`]
//! and dispatches to the wrapper.

use std::sync::Arc;

use tracing::info;

use enfold_core::{EnfoldError, EnfoldResult, OpName, Value};

use super::call::AroundCall;
use crate::alias::create_alias;
use crate::table::{DeclaratorFn, InstalledWrapper, MethodFn, MethodTable};

/// Options accepted by [`AroundRegistrar::declare_around_wrapper`].
///
/// Exactly one key is recognized: `call`, naming the wrapper operation.
pub type AroundOptions = serde_json::Map<String, Value>;

/// Declaration-time capability for around wrapping, implemented for every
/// [`MethodTable`].
pub trait AroundRegistrar<T: 'static> {
    /// Installs a zero-argument declarator named `decorator` on the table.
    ///
    /// Activating the declarator registers a one-shot pending decoration:
    /// the next operation the table defines is around-wrapped through the
    /// wrapper named by the `call` option. The declarator may be activated
    /// any number of times, each producing an independent alias/trampoline
    /// pair.
    ///
    /// Validation is fail-fast: a missing or non-identifier `call` option,
    /// or any unrecognized option key, fails here with a configuration
    /// error, before anything is installed.
    fn declare_around_wrapper(
        &self,
        decorator: impl Into<OpName>,
        options: AroundOptions,
    ) -> EnfoldResult<()>;
}

impl<T: 'static> AroundRegistrar<T> for MethodTable<T> {
    fn declare_around_wrapper(
        &self,
        decorator: impl Into<OpName>,
        options: AroundOptions,
    ) -> EnfoldResult<()> {
        let decorator = decorator.into();
        let wrapper_name = validate_options(&options)?;

        info!(declarator = %decorator, wrapper = %wrapper_name, "around declarator installed");

        let hook_decorator = decorator.clone();
        let declarator: DeclaratorFn<T> = Arc::new(move |table| {
            let decorator = hook_decorator.clone();
            let wrapper_name = wrapper_name.clone();
            table.register_pending(Box::new(move |table, operation| {
                install_trampoline(table, operation, &decorator, &wrapper_name)
            }));
            Ok(())
        });
        self.install_declarator(decorator, declarator);
        Ok(())
    }
}

/// Extracts the wrapper name from the options map.
fn validate_options(options: &AroundOptions) -> EnfoldResult<OpName> {
    let mut wrapper = None;
    for (key, value) in options {
        match key.as_str() {
            "call" => {
                let name = value
                    .as_str()
                    .map(OpName::from)
                    .filter(OpName::is_identifier)
                    .ok_or_else(|| {
                        EnfoldError::configuration(
                            "`call` option with identifier argument required",
                        )
                    })?;
                wrapper = Some(name);
            }
            other => {
                return Err(EnfoldError::configuration(format!(
                    "unknown option `{other}`"
                )));
            }
        }
    }
    wrapper.ok_or_else(|| {
        EnfoldError::configuration("`call` option with identifier argument required")
    })
}

/// Fired by the pending decoration once the target operation exists.
fn install_trampoline<T: 'static>(
    table: &MethodTable<T>,
    operation: &OpName,
    decorator: &OpName,
    wrapper_name: &OpName,
) -> EnfoldResult<()> {
    // Resolve everything up front so unknown names fail at installation
    // time, not on the first call.
    let wrapper = table.wrapper(wrapper_name.as_str())?;
    let original_name = create_alias(table, operation, decorator)?;
    let original = table.method(original_name.as_str())?;

    let message = operation.clone();
    let wrapped = original_name.clone();
    let trampoline: MethodFn<T> = Arc::new(move |receiver, args, callback| {
        let mut call = AroundCall::new(
            receiver,
            message.clone(),
            wrapped.clone(),
            original.clone(),
            args,
            callback,
        );
        wrapper(&mut call)
    });
    table.replace(operation.clone(), trampoline);
    table.record_installation(InstalledWrapper::new(
        operation,
        &original_name,
        decorator,
        wrapper_name,
    ));

    info!(
        operation = %operation,
        original = %original_name,
        wrapper = %wrapper_name,
        "around trampoline installed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::around_options;
    use enfold_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn missing_call_option_is_rejected() {
        let table: MethodTable<()> = MethodTable::new();
        let err = table
            .declare_around_wrapper("logged", AroundOptions::new())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert_eq!(
            err.message,
            "`call` option with identifier argument required"
        );
    }

    #[test]
    fn non_identifier_call_option_is_rejected() {
        let table: MethodTable<()> = MethodTable::new();
        for bad in [json!(42), json!("not an ident!"), json!(null), json!("")] {
            let mut options = AroundOptions::new();
            options.insert("call".to_string(), bad);
            let err = table
                .declare_around_wrapper("logged", options)
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Configuration);
        }
    }

    #[test]
    fn unknown_option_is_rejected_by_name() {
        let table: MethodTable<()> = MethodTable::new();
        let err = table
            .declare_around_wrapper(
                "logged",
                around_options!(call: "audit_wrap", retries: 3),
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        // The message names the offending key, not the whole key set.
        assert_eq!(err.message, "unknown option `retries`");
    }

    #[test]
    fn failed_declaration_installs_nothing() {
        let table: MethodTable<()> = MethodTable::new();
        table
            .declare_around_wrapper("logged", around_options!(wrap: "audit_wrap"))
            .unwrap_err();

        assert!(table.activate("logged").is_err());
        assert_eq!(table.pending_count(), 0);
    }

    #[test]
    fn activation_arms_a_pending_decoration() {
        let table: MethodTable<()> = MethodTable::new();
        table
            .declare_around_wrapper("logged", around_options!(call: "audit_wrap"))
            .unwrap();
        assert_eq!(table.pending_count(), 0);

        table.activate("logged").unwrap();
        assert_eq!(table.pending_count(), 1);
    }

    #[test]
    fn unknown_wrapper_fails_at_installation_time() {
        let table: MethodTable<()> = MethodTable::new();
        table
            .declare_around_wrapper("logged", around_options!(call: "no_such_wrapper"))
            .unwrap();
        table.activate("logged").unwrap();

        let err = table
            .define("save", |_recv, _args, _cb| Ok(json!(0)))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownOperation);
        assert!(table.installations().is_empty());
    }
}
