pub use exec_log::{ExecLog, Op};

pub use fixture::Fixture;

mod recording_builder;
pub use recording_builder::{FieldRef, Pred, RecordingBuilder};

pub mod prelude;

pub use std_util::*;

use std::sync::Once;

/// Installs a `tracing` subscriber honoring `RUST_LOG`, once per test
/// binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Builds request parameters from `(path, values)` pairs.
#[macro_export]
macro_rules! params {
    (
        $( $path:literal => [ $( $value:expr ),* ] ),* $(,)?
    ) => {{
        let params: Vec<(&str, Vec<&str>)> = vec![
            $( ($path, vec![ $( $value ),* ]) ),*
        ];
        params
    }};
}
