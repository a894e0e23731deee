//! Convenience macros for declarations and argument lists.

/// Builds an [`AroundOptions`](crate::AroundOptions) map.
///
/// # Example
/// ```rust,ignore
/// table.declare_around_wrapper("logged", around_options!(call: "audit_wrap"))?;
/// ```
#[macro_export]
macro_rules! around_options {
    ($($key:ident : $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut options = $crate::AroundOptions::new();
        $(
            options.insert(stringify!($key).to_string(), ::serde_json::json!($value));
        )*
        options
    }};
}

/// Builds an argument list of dynamic values.
///
/// # Example
/// ```rust,ignore
/// let value = table.call(&doc, "save", args![5, "draft"], None)?;
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$(::serde_json::json!($value)),+]
    };
}
