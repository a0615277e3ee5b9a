/// Asserts that an expression matches a pattern, with an optional guard.
///
/// The expression is matched by reference, so it can be used afterwards and
/// bindings in the guard are references.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {
        match &$expr {
            #[allow(unused_variables, reason = "bindings may only be used by the guard")]
            $pat $(if $guard)? => {}
            value => ::core::panic!(
                "assertion failed: `{value:?}` does not match `{}`",
                ::core::stringify!($pat $(if $guard)?)
            ),
        }
    };
}
