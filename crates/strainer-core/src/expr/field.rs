use crate::join::QueryJoins;
use crate::path::FieldPathInfo;
use crate::spec::{QueryBuilder, Specification};
use crate::stmt::{FieldValue, Operator};
use crate::{Error, Result};

use std::fmt;
use std::rc::Rc;

/// A comparison between a field and one or more values.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpression {
    pub field: FieldPathInfo,
    pub operator: Operator,
    pub values: Vec<FieldValue>,
    pub negated: bool,
}

impl FieldExpression {
    pub fn new(field: FieldPathInfo, operator: Operator, values: Vec<FieldValue>) -> Self {
        Self {
            field,
            operator,
            values,
            negated: false,
        }
    }

    /// Returns a copy whose negation is flipped when `negated` is set.
    pub fn with_negation(&self, negated: bool) -> Self {
        Self {
            negated: self.negated != negated,
            ..self.clone()
        }
    }

    pub fn to_specification<B: QueryBuilder>(&self, joins: &Rc<QueryJoins<B>>) -> Specification<B> {
        let expr = self.clone();
        let joins = joins.clone();

        Specification::new(move |builder| {
            let path = joins.path(builder, &expr.field)?;
            let predicate = expr
                .predicate(builder, &path)
                .map_err(|err| err.for_field(&expr.field.original_path))?;

            Ok(Some(if expr.negated {
                builder.not(predicate)
            } else {
                predicate
            }))
        })
    }

    fn predicate<B: QueryBuilder>(&self, builder: &mut B, path: &B::Path) -> Result<B::Predicate> {
        match self.operator {
            Operator::In => self.in_list(builder, path),
            operator => {
                let value = self.single_value()?;

                match operator {
                    Operator::Equals if value.is_null() => builder.is_null(path),
                    Operator::Equals => builder.equal(path, value),
                    Operator::Matches => builder.like(path, self.pattern(value)?),
                    Operator::IMatches => builder.ilike(path, self.pattern(value)?),
                    operator if operator.is_ordering() && value.is_null() => {
                        Err(Error::type_conversion(
                            "null",
                            self.field.terminal_type.to_string(),
                            format!("{operator} does not accept null"),
                        ))
                    }
                    Operator::LessThan => builder.less_than(path, value),
                    Operator::LessThanOrEquals => builder.less_than_or_equals(path, value),
                    Operator::GreaterThan => builder.greater_than(path, value),
                    Operator::GreaterThanOrEquals => builder.greater_than_or_equals(path, value),
                    Operator::In => unreachable!(),
                }
            }
        }
    }

    fn in_list<B: QueryBuilder>(&self, builder: &mut B, path: &B::Path) -> Result<B::Predicate> {
        let (nulls, values): (Vec<_>, Vec<_>) =
            self.values.iter().cloned().partition(FieldValue::is_null);

        match (nulls.is_empty(), values.is_empty()) {
            (true, _) => builder.in_list(path, &values),
            (false, true) => builder.is_null(path),
            (false, false) => {
                let is_null = builder.is_null(path)?;
                let in_list = builder.in_list(path, &values)?;
                Ok(builder.or(is_null, in_list))
            }
        }
    }

    fn single_value(&self) -> Result<&FieldValue> {
        match &self.values[..] {
            [value] => Ok(value),
            values => Err(crate::err!(
                "{} expects exactly one value, got {}",
                self.operator,
                values.len()
            )),
        }
    }

    fn pattern<'a>(&self, value: &'a FieldValue) -> Result<&'a str> {
        value.as_str().ok_or_else(|| {
            Error::type_conversion(
                value.to_string(),
                "String",
                format!("{} requires a string pattern", self.operator),
            )
        })
    }
}

impl fmt::Display for FieldExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("NOT (")?;
        }

        write!(f, "{} {} ", self.field.resolved_path, self.operator)?;

        match &self.values[..] {
            [value] if !self.operator.is_in() => write!(f, "{value}")?,
            values => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")?;
            }
        }

        if self.negated {
            f.write_str(")")?;
        }

        Ok(())
    }
}
