//! The [`value!`] literal-construction macro.

/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys are string literals (or parenthesized `&str` expressions);
/// scalar positions accept any expression with a `Value: From` impl.
///
/// ```
/// use varia_value::value;
///
/// let config = value!({
///     "name": "hub",
///     "retries": 3,
///     "backoff": [0.5, 1.0, 2.0],
///     "verbose": null,
/// });
/// assert_eq!(config["retries"].to_i64(), Ok(3));
/// ```
#[macro_export]
macro_rules! value {
    ($($tt:tt)+) => {
        $crate::value_internal!($($tt)+)
    };
}

// Produces no expansion, so a call with a token makes the error point at
// that token.
#[doc(hidden)]
#[macro_export]
macro_rules! value_unexpected {
    () => {};
}

#[doc(hidden)]
#[macro_export]
macro_rules! value_internal {
    //////////////////////////////////////////////////////////////////////
    // Array munching: accumulate elements as exprs inside [].
    //////////////////////////////////////////////////////////////////////

    (@array [$($elems:expr,)*]) => {
        [$($elems,)*]
    };

    (@array [$($elems:expr),*]) => {
        [$($elems),*]
    };

    (@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!(null)] $($rest)*)
    };

    (@array [$($elems:expr,)*] true $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!(true)] $($rest)*)
    };

    (@array [$($elems:expr,)*] false $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!(false)] $($rest)*)
    };

    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!([$($array)*])] $($rest)*)
    };

    (@array [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!({$($map)*})] $($rest)*)
    };

    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!($next),] $($rest)*)
    };

    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!($last)])
    };

    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)*] $($rest)*)
    };

    (@array [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        $crate::value_unexpected!($unexpected)
    };

    //////////////////////////////////////////////////////////////////////
    // Object munching: gather key tokens up to the `:`, then the value.
    //////////////////////////////////////////////////////////////////////

    (@object $object:ident () () ()) => {};

    (@object $object:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        $object[$($key)+] = $value;
        $crate::value_internal!(@object $object () ($($rest)*) ($($rest)*));
    };

    (@object $object:ident [$($key:tt)+] ($value:expr) $unexpected:tt $($rest:tt)*) => {
        $crate::value_unexpected!($unexpected);
    };

    (@object $object:ident [$($key:tt)+] ($value:expr)) => {
        $object[$($key)+] = $value;
    };

    (@object $object:ident ($($key:tt)+) (: null $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $object [$($key)+] ($crate::value_internal!(null)) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: true $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $object [$($key)+] ($crate::value_internal!(true)) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: false $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $object [$($key)+] ($crate::value_internal!(false)) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $object [$($key)+] ($crate::value_internal!([$($array)*])) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: {$($map:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $object [$($key)+] ($crate::value_internal!({$($map)*})) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $object [$($key)+] ($crate::value_internal!($value)) , $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        $crate::value_internal!(@object $object [$($key)+] ($crate::value_internal!($value)));
    };

    // A `:` with nothing after it.
    (@object $object:ident ($($key:tt)+) (:) $copy:tt) => {
        $crate::value_internal!();
    };

    // A key with no `:` at all.
    (@object $object:ident ($($key:tt)+) () $copy:tt) => {
        $crate::value_internal!();
    };

    // A `:` before any key tokens.
    (@object $object:ident () (: $($rest:tt)*) ($colon:tt $($copy:tt)*)) => {
        $crate::value_unexpected!($colon);
    };

    // A `,` in key position.
    (@object $object:ident ($($key:tt)*) (, $($rest:tt)*) ($comma:tt $($copy:tt)*)) => {
        $crate::value_unexpected!($comma);
    };

    // Parenthesized key expression.
    (@object $object:ident () (($key:expr) : $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $object ($key) (: $($rest)*) (: $($rest)*));
    };

    // Take one key token and keep munching.
    (@object $object:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $object ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    //////////////////////////////////////////////////////////////////////
    // Entry points.
    //////////////////////////////////////////////////////////////////////

    (null) => {
        $crate::Value::NULL
    };

    (true) => {
        $crate::Value::from(true)
    };

    (false) => {
        $crate::Value::from(false)
    };

    ([]) => {
        $crate::Value::new($crate::ValueType::Array)
    };

    ([ $($tt:tt)+ ]) => {{
        let mut array = $crate::Value::new($crate::ValueType::Array);
        for element in $crate::value_internal!(@array [] $($tt)+) {
            array.append(element);
        }
        array
    }};

    ({}) => {
        $crate::Value::new($crate::ValueType::Object)
    };

    ({ $($tt:tt)+ }) => {{
        let mut object = $crate::Value::new($crate::ValueType::Object);
        $crate::value_internal!(@object object () ($($tt)+) ($($tt)+));
        object
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
