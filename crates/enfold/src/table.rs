//! Per-type method table — dispatch-by-name with pending decorations.
//!
//! A [`MethodTable`] is the explicit registry of everything callable on one
//! receiver type `T`, split into three namespaces:
//!
//! - **methods**: ordinary operations, invoked with a receiver, positional
//!   arguments, and an optional trailing callback.
//! - **wrappers**: operations that receive an [`AroundCall`] interception
//!   context instead of plain arguments.
//! - **declarators**: zero-argument declaration-time operations installed by
//!   the around registrar and run via [`MethodTable::activate`].
//!
//! The table also owns the pending-decoration registry: one-shot hooks that
//! fire, in registration order, the next time *any* method is defined, and
//! are discarded before they run. Trampoline installation goes through
//! [`MethodTable::replace`], which never fires pending hooks.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use enfold_core::{Args, Callback, EnfoldError, EnfoldResult, OpName, Value};

use crate::around::{AroundCall, WrapperFn};

/// An ordinary operation implementation.
pub type MethodFn<T> =
    Arc<dyn Fn(&T, Args, Option<Callback>) -> EnfoldResult<Value> + Send + Sync>;

/// A zero-argument declaration-time operation.
pub type DeclaratorFn<T> = Arc<dyn Fn(&MethodTable<T>) -> EnfoldResult<()> + Send + Sync>;

/// A one-shot pending decoration. Fired with the table and the name of the
/// next method defined on it, then discarded.
pub type DecorationHook<T> = Box<dyn FnOnce(&MethodTable<T>, &OpName) -> EnfoldResult<()> + Send>;

/// Record of one installed around trampoline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledWrapper {
    /// Unique identifier of this installation.
    pub id: Uuid,
    /// The logical operation callers invoke.
    pub operation: OpName,
    /// The alias under which the original implementation is preserved.
    pub original: OpName,
    /// The declarator that produced this installation.
    pub decorator: OpName,
    /// The wrapper operation the trampoline dispatches to.
    pub wrapper: OpName,
    /// When the trampoline was installed.
    pub installed_at: DateTime<Utc>,
}

impl InstalledWrapper {
    /// Create a new installation record stamped with the current time.
    pub fn new(operation: &OpName, original: &OpName, decorator: &OpName, wrapper: &OpName) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation: operation.clone(),
            original: original.clone(),
            decorator: decorator.clone(),
            wrapper: wrapper.clone(),
            installed_at: Utc::now(),
        }
    }
}

/// Registry of operations, wrappers, and declarators for one receiver type.
pub struct MethodTable<T: 'static> {
    /// Operation name → implementation.
    methods: DashMap<OpName, MethodFn<T>>,
    /// Wrapper name → wrapper implementation.
    wrappers: DashMap<OpName, WrapperFn<T>>,
    /// Declarator name → declaration-time operation.
    declarators: DashMap<OpName, DeclaratorFn<T>>,
    /// One-shot hooks awaiting the next method definition.
    pending: Mutex<Vec<DecorationHook<T>>>,
    /// Bookkeeping for installed trampolines.
    installed: Mutex<Vec<InstalledWrapper>>,
    /// Serializes definition and trampoline installation so no caller can
    /// observe a half-installed trampoline.
    install_lock: Mutex<()>,
}

fn lock<X>(mutex: &Mutex<X>) -> MutexGuard<'_, X> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: 'static> MethodTable<T> {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self {
            methods: DashMap::new(),
            wrappers: DashMap::new(),
            declarators: DashMap::new(),
            pending: Mutex::new(Vec::new()),
            installed: Mutex::new(Vec::new()),
            install_lock: Mutex::new(()),
        }
    }

    /// Defines (or redefines) an operation, then fires all pending
    /// decorations with its name.
    ///
    /// Hooks run in registration order and are discarded before they run;
    /// a failing hook aborts the drain and the error propagates, but the
    /// consumed hooks stay consumed. Hooks must not call `define` themselves
    /// (they install through [`MethodTable::replace`]).
    pub fn define<F>(&self, name: impl Into<OpName>, body: F) -> EnfoldResult<()>
    where
        F: Fn(&T, Args, Option<Callback>) -> EnfoldResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let _guard = lock(&self.install_lock);

        self.methods.insert(name.clone(), Arc::new(body));
        debug!(operation = %name, "operation defined");

        let hooks: Vec<DecorationHook<T>> = std::mem::take(&mut *lock(&self.pending));
        for hook in hooks {
            hook(self, &name)?;
        }
        Ok(())
    }

    /// Replaces an operation's implementation without firing pending
    /// decorations. Used for aliasing and trampoline installation.
    pub fn replace(&self, name: OpName, body: MethodFn<T>) {
        debug!(operation = %name, "operation replaced");
        self.methods.insert(name, body);
    }

    /// Dispatches an operation by name.
    pub fn call(
        &self,
        receiver: &T,
        name: &str,
        args: Args,
        callback: Option<Callback>,
    ) -> EnfoldResult<Value> {
        let method = self.method(name)?;
        debug!(operation = %name, argc = args.len(), "dispatching operation");
        method(receiver, args, callback)
    }

    /// Looks up an operation implementation by name.
    pub fn method(&self, name: &str) -> EnfoldResult<MethodFn<T>> {
        self.methods
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                EnfoldError::unknown_operation(format!("operation `{name}` is not defined"))
            })
    }

    /// Copies an existing operation under a second name.
    ///
    /// Fails with `UnknownOperation` if `operation` is not defined and with
    /// `AliasCollision` if `alias` is already in use. The original stays
    /// callable, unchanged, under both names until one of them is replaced.
    pub fn alias_method(&self, operation: &str, alias: OpName) -> EnfoldResult<()> {
        let original = self.method(operation)?;
        match self.methods.entry(alias.clone()) {
            Entry::Occupied(_) => Err(EnfoldError::alias_collision(format!(
                "alias `{alias}` is already defined"
            ))),
            Entry::Vacant(entry) => {
                entry.insert(original);
                Ok(())
            }
        }
    }

    /// Defines (or redefines) a wrapper operation.
    ///
    /// Wrapper definitions do not count as method definitions: they never
    /// fire pending decorations, so a wrapper can be defined at any point
    /// relative to the declaration it serves.
    pub fn define_wrapper<F>(&self, name: impl Into<OpName>, body: F)
    where
        F: for<'a, 'b> Fn(&'a mut AroundCall<'b, T>) -> EnfoldResult<Value>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        debug!(wrapper = %name, "wrapper defined");
        self.wrappers.insert(name, Arc::new(body));
    }

    /// Looks up a wrapper operation by name.
    pub fn wrapper(&self, name: &str) -> EnfoldResult<WrapperFn<T>> {
        self.wrappers
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                EnfoldError::unknown_operation(format!("wrapper `{name}` is not defined"))
            })
    }

    /// Installs (or reinstalls) a declarator.
    pub fn install_declarator(&self, name: OpName, declarator: DeclaratorFn<T>) {
        debug!(declarator = %name, "declarator installed");
        self.declarators.insert(name, declarator);
    }

    /// Runs the named declarator.
    pub fn activate(&self, name: &str) -> EnfoldResult<()> {
        let declarator = self
            .declarators
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                EnfoldError::unknown_operation(format!("declarator `{name}` is not defined"))
            })?;
        debug!(declarator = %name, "declarator activated");
        declarator(self)
    }

    /// Registers a one-shot decoration hook for the next method definition.
    pub fn register_pending(&self, hook: DecorationHook<T>) {
        lock(&self.pending).push(hook);
    }

    /// Number of decoration hooks waiting for the next definition.
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Whether an operation with this name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Names of all defined operations (aliases included), unordered.
    pub fn operation_names(&self) -> Vec<OpName> {
        self.methods.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Records a trampoline installation.
    pub fn record_installation(&self, record: InstalledWrapper) {
        lock(&self.installed).push(record);
    }

    /// All trampoline installations, in installation order.
    pub fn installations(&self) -> Vec<InstalledWrapper> {
        lock(&self.installed).clone()
    }
}

impl<T: 'static> Default for MethodTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for MethodTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("methods", &self.methods.len())
            .field("wrappers", &self.wrappers.len())
            .field("declarators", &self.declarators.len())
            .field("pending", &self.pending_count())
            .finish()
    }
}
