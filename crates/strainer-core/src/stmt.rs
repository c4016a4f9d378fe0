mod field_value;
pub use field_value::FieldValue;

mod keyword;
pub use keyword::Keyword;

mod op;
pub use op::{LogicalOperator, Operator};

mod ty;
pub use ty::Type;

mod ty_enum;
pub use ty_enum::TypeEnum;

mod value;
pub use value::Value;
