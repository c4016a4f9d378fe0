#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(e) => e,
            actual => {
                use std::fmt::Write;
                let mut msg = format!("expected `Err`; actual={:?}", actual);

                $(
                    write!(msg, ", ").unwrap();
                    write!(msg, $($t)*).unwrap();
                )?

                panic!("{}", msg);
            }
        }
    };
}

/// Asserts that the expression is an `Err` whose `code()` equals the given
/// code, and evaluates to the error.
#[macro_export]
macro_rules! assert_err_code {
    ($e:expr, $code:expr) => {{
        let err = $crate::assert_err!($e);
        assert_eq!(err.code(), $code, "unexpected error code; err={}", err);
        err
    }};
}

#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            actual => panic!("expected `Ok`; actual={:?}", actual),
        }
    };
}
