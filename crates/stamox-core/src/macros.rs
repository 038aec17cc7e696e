//! Argument-building macros

/// Build [`Args`](crate::Args): positional values, then keywords after `;`
///
/// ```rust
/// use stamox_core::args;
///
/// let a = args![1.0, 2.0; rate = 2.5, lower_tail = false];
/// assert_eq!(a.positional.len(), 2);
/// assert_eq!(a.keywords.len(), 2);
///
/// let keywords_only = args![; rate = 2.5];
/// assert!(keywords_only.positional.is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($pos:expr),* ; $($key:ident = $val:expr),* $(,)?) => {
        $crate::Args::new()
            $(.arg($pos))*
            $(.kwarg(stringify!($key), $val))*
    };
    ($($pos:expr),+ $(,)?) => {
        $crate::Args::new()$(.arg($pos))+
    };
}

/// Build [`Keywords`](crate::Keywords) for partial binding
///
/// ```rust
/// use stamox_core::kwargs;
///
/// let k = kwargs! { rate = 2.5, lower_tail = false };
/// assert_eq!(k.len(), 2);
/// ```
#[macro_export]
macro_rules! kwargs {
    ($($key:ident = $val:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut keywords = $crate::Keywords::new();
        $(keywords.insert(stringify!($key).to_string(), $crate::Value::from($val));)*
        keywords
    }};
}
