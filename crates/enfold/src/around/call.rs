//! The interception context handed to wrapper operations.

use std::fmt;

use enfold_core::{Args, Callback, EnfoldResult, OpName, Value};

use crate::table::MethodFn;

/// One in-flight intercepted call.
///
/// Built by the trampoline on every invocation of a wrapped operation and
/// passed to the wrapper, which reads the captured call data and decides if,
/// when, and with what arguments the preserved original runs. Everything is
/// read-only to the wrapper except [`result`](AroundCall::result), which is
/// written by [`transfer`](AroundCall::transfer).
pub struct AroundCall<'a, T: 'static> {
    /// Receiving object.
    receiver: &'a T,
    /// The logical operation that was invoked.
    message: OpName,
    /// The alias under which the original implementation is preserved.
    wrapped_message: OpName,
    /// The original implementation, resolved at trampoline-construction time.
    original: MethodFn<T>,
    /// Original argument list.
    args: Args,
    /// Original trailing callback.
    callback: Option<Callback>,
    /// Result of the latest transfer to the original, if any.
    result: Option<Value>,
}

impl<'a, T: 'static> AroundCall<'a, T> {
    /// Builds the context for one call.
    pub fn new(
        receiver: &'a T,
        message: OpName,
        wrapped_message: OpName,
        original: MethodFn<T>,
        args: Args,
        callback: Option<Callback>,
    ) -> Self {
        debug_assert_ne!(message, wrapped_message);
        Self {
            receiver,
            message,
            wrapped_message,
            original,
            args,
            callback,
            result: None,
        }
    }

    /// The object the operation was invoked on.
    pub fn receiver(&self) -> &T {
        self.receiver
    }

    /// The logical (externally visible) operation name.
    pub fn message(&self) -> &OpName {
        &self.message
    }

    /// The name the original implementation is preserved under.
    pub fn wrapped_message(&self) -> &OpName {
        &self.wrapped_message
    }

    /// The positional arguments the caller supplied.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// The trailing callback the caller supplied, if any.
    pub fn callback(&self) -> Option<&Callback> {
        self.callback.as_ref()
    }

    /// The value of the latest transfer, or `None` if the original has not
    /// run yet.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Calls the original implementation with the captured arguments and
    /// callback. The return value is stored in `result` and also returned.
    pub fn transfer(&mut self) -> EnfoldResult<Value> {
        let args = self.args.clone();
        let callback = self.callback.clone();
        self.transfer_with(args, callback)
    }

    /// Calls the original implementation with substituted arguments. A
    /// `None` callback falls back to the one the caller supplied.
    ///
    /// Each successful transfer overwrites `result` with the latest value.
    /// Errors from the original propagate verbatim and leave `result`
    /// untouched.
    pub fn transfer_with(
        &mut self,
        args: Args,
        callback: Option<Callback>,
    ) -> EnfoldResult<Value> {
        let callback = callback.or_else(|| self.callback.clone());
        let value = (self.original)(self.receiver, args, callback)?;
        self.result = Some(value.clone());
        Ok(value)
    }
}

impl<T: 'static> fmt::Debug for AroundCall<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AroundCall")
            .field("message", &self.message)
            .field("wrapped_message", &self.wrapped_message)
            .field("args", &self.args)
            .field("callback", &self.callback.is_some())
            .field("result", &self.result)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use enfold_core::EnfoldError;
    use serde_json::json;

    fn doubling_original() -> MethodFn<i64> {
        Arc::new(|factor, args, _cb| Ok(json!(args[0].as_i64().unwrap_or_default() * factor)))
    }

    fn call_for<'a>(receiver: &'a i64, args: Args) -> AroundCall<'a, i64> {
        AroundCall::new(
            receiver,
            OpName::from("scale"),
            OpName::from("scale_without_logged"),
            doubling_original(),
            args,
            None,
        )
    }

    #[test]
    fn result_is_absent_before_transfer() {
        let receiver = 2;
        let call = call_for(&receiver, vec![json!(5)]);
        assert!(call.result().is_none());
    }

    #[test]
    fn transfer_uses_captured_args_and_stores_result() {
        let receiver = 2;
        let mut call = call_for(&receiver, vec![json!(5)]);
        let value = call.transfer().unwrap();
        assert_eq!(value, json!(10));
        assert_eq!(call.result(), Some(&json!(10)));
    }

    #[test]
    fn transfer_with_substitutes_args_and_overwrites_result() {
        let receiver = 2;
        let mut call = call_for(&receiver, vec![json!(5)]);
        call.transfer().unwrap();

        let value = call.transfer_with(vec![json!(100)], None).unwrap();
        assert_eq!(value, json!(200));
        assert_eq!(call.result(), Some(&json!(200)));
    }

    #[test]
    fn transfer_with_falls_back_to_captured_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_original = hits.clone();
        let original: MethodFn<()> = Arc::new(move |_recv, args, cb| {
            let cb = cb.ok_or_else(|| EnfoldError::operation("callback required"))?;
            hits_in_original.fetch_add(1, Ordering::SeqCst);
            Ok(cb.invoke(args))
        });

        let receiver = ();
        let mut call = AroundCall::new(
            &receiver,
            OpName::from("relay"),
            OpName::from("relay_without_logged"),
            original,
            vec![json!(1)],
            Some(Callback::new(|args| json!(args.len()))),
        );

        // No explicit callback: the captured one reaches the original.
        let value = call.transfer_with(vec![json!(1), json!(2)], None).unwrap();
        assert_eq!(value, json!(2));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_transfer_leaves_result_untouched() {
        let original: MethodFn<()> =
            Arc::new(|_recv, _args, _cb| Err(EnfoldError::operation("disk full")));
        let receiver = ();
        let mut call = AroundCall::new(
            &receiver,
            OpName::from("save"),
            OpName::from("save_without_logged"),
            original,
            vec![],
            None,
        );

        let err = call.transfer().unwrap_err();
        assert_eq!(err.kind, enfold_core::ErrorKind::Operation);
        assert!(call.result().is_none());
    }
}
