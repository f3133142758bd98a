//! Call-site capturing front ends for the comparators.
//!
//! Each macro fills in the [`LocationTag`](crate::LocationTag) from `file!()` and
//! `line!()` and evaluates to an [`AssertResult`](crate::AssertResult), so a test body
//! chains them with `?`.

/// Location tag for the invocation site.
#[macro_export]
macro_rules! location {
    () => {
        $crate::LocationTag::new(::core::file!(), ::core::primitive::i64::from(::core::line!()))
    };
}

#[macro_export]
macro_rules! assert_equal {
    ($a:expr, $b:expr $(,)?) => {
        $crate::scalar::assert_equal(&$a, &$b, &$crate::location!())
    };
}

#[macro_export]
macro_rules! assert_equal_quiet {
    ($a:expr, $b:expr $(,)?) => {
        $crate::scalar::assert_equal_quiet(&$a, &$b, &$crate::location!())
    };
}

#[macro_export]
macro_rules! assert_lequal {
    ($a:expr, $b:expr $(,)?) => {
        $crate::scalar::assert_lequal(&$a, &$b, &$crate::location!())
    };
}

#[macro_export]
macro_rules! assert_gequal {
    ($a:expr, $b:expr $(,)?) => {
        $crate::scalar::assert_gequal(&$a, &$b, &$crate::location!())
    };
}

/// `assert_almost_equal!(a, b)` or `assert_almost_equal!(a, b, tolerance)`.
#[macro_export]
macro_rules! assert_almost_equal {
    ($a:expr, $b:expr $(,)?) => {
        $crate::scalar::assert_almost_equal($a, $b, &$crate::location!())
    };
    ($a:expr, $b:expr, $tol:expr $(,)?) => {
        $crate::scalar::assert_almost_equal_tol($a, $b, &$crate::location!(), &$tol)
    };
}

/// `assert_equal_ranges!(a, b)` or `assert_equal_ranges!(a, b, predicate)`.
#[macro_export]
macro_rules! assert_equal_ranges {
    ($a:expr, $b:expr $(,)?) => {
        $crate::sequence::assert_equal_ranges(&$a[..], &$b[..], &$crate::location!())
    };
    ($a:expr, $b:expr, $pred:expr $(,)?) => {
        $crate::sequence::assert_equal_ranges_by(&$a[..], &$b[..], &$pred, &$crate::location!())
    };
}

/// `assert_almost_equal_ranges!(a, b)` or `assert_almost_equal_ranges!(a, b, tolerance)`.
#[macro_export]
macro_rules! assert_almost_equal_ranges {
    ($a:expr, $b:expr $(,)?) => {
        $crate::sequence::assert_almost_equal_ranges(&$a[..], &$b[..], &$crate::location!())
    };
    ($a:expr, $b:expr, $tol:expr $(,)?) => {
        $crate::sequence::assert_almost_equal_ranges_tol(
            &$a[..],
            &$b[..],
            &$crate::location!(),
            &$tol,
        )
    };
}

#[macro_export]
macro_rules! assert_equal_containers {
    ($a:expr, $b:expr $(,)?) => {
        $crate::container::assert_equal_containers(&$a, &$b, &$crate::location!())
    };
}

/// `assert_almost_equal_containers!(a, b)` or with an explicit tolerance.
#[macro_export]
macro_rules! assert_almost_equal_containers {
    ($a:expr, $b:expr $(,)?) => {
        $crate::container::assert_almost_equal_containers(&$a, &$b, &$crate::location!())
    };
    ($a:expr, $b:expr, $tol:expr $(,)?) => {
        $crate::container::assert_almost_equal_containers_tol(
            &$a,
            &$b,
            &$crate::location!(),
            &$tol,
        )
    };
}

/// `assert_throws!(fallible_expr, ErrorPattern)`.
#[macro_export]
macro_rules! assert_throws {
    ($op:expr, $pat:pat $(,)?) => {
        $crate::control::assert_throws(
            || $op,
            |err| ::core::matches!(err, $pat),
            ::core::stringify!($pat),
            &$crate::location!(),
        )
    };
}

/// `assert_panics!(expr)` or `assert_panics!(expr, "message fragment")`.
#[macro_export]
macro_rules! assert_panics {
    ($op:expr $(,)?) => {
        $crate::control::assert_panics(|| $op, |_| true, "a panic", &$crate::location!())
    };
    ($op:expr, $fragment:expr $(,)?) => {
        $crate::control::assert_panics(
            || $op,
            |msg| msg.contains($fragment),
            $fragment,
            &$crate::location!(),
        )
    };
}

/// Return a known-failure outcome from the enclosing test body.
#[macro_export]
macro_rules! known_failure {
    () => {
        return ::core::result::Result::Err(
            $crate::control::known_failure(&$crate::location!()).into(),
        )
    };
}
