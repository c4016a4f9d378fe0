pub mod option;
pub mod result;

pub mod prelude {
    pub use crate::{assert_err, assert_err_code, assert_none, assert_ok, assert_some};
}
