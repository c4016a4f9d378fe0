use crate::{ExecLog, Op};

use strainer::join::JoinNode;
use strainer::path::PathSegment;
use strainer::stmt::FieldValue;
use strainer::{QueryBuilder, Result};

use std::fmt;

/// A query builder that records its structural calls and builds predicates
/// as plain data, so tests can assert on both.
#[derive(Debug, Default)]
pub struct RecordingBuilder {
    /// Log of root, distinct and join calls made during evaluation
    pub log: ExecLog,
}

/// Field addressed by a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRef {
    pub path: String,

    /// Set when the field holds several values
    pub plural: bool,
}

/// Predicate produced by a [`RecordingBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub enum Pred {
    Eq(String, FieldValue),
    MemberOf(String, FieldValue),
    IsNull(String),
    IsEmpty(String),
    In(String, Vec<FieldValue>),
    Like(String, String),
    ILike(String, String),
    Lt(String, FieldValue),
    Le(String, FieldValue),
    Gt(String, FieldValue),
    Ge(String, FieldValue),
    And(Box<Pred>, Box<Pred>),
    Or(Box<Pred>, Box<Pred>),
    Not(Box<Pred>),
}

impl RecordingBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueryBuilder for RecordingBuilder {
    type Predicate = Pred;
    type Path = FieldRef;
    type Join = String;

    fn name(&self) -> &str {
        "recording builder"
    }

    fn root(&mut self) -> String {
        self.log.push(Op::Root);
        String::new()
    }

    fn distinct(&mut self) {
        self.log.push(Op::Distinct);
    }

    fn join(&mut self, parent: &String, node: &JoinNode) -> Result<String> {
        let expected = node
            .parent
            .as_ref()
            .map(|parent| parent.path.clone())
            .unwrap_or_default();
        assert_eq!(*parent, expected, "join `{}` started from the wrong parent", node.path);

        self.log.push(Op::Join {
            path: node.path.clone(),
            kind: node.kind,
            fetched: node.fetched,
        });

        Ok(node.path.clone())
    }

    fn path(&mut self, from: &String, segment: &PathSegment) -> Result<FieldRef> {
        let path = if from.is_empty() {
            segment.name.clone()
        } else {
            format!("{from}.{}", segment.name)
        };

        let plural = segment
            .step
            .as_field()
            .map(|property| property.element_kind.is_plural())
            .unwrap_or(false);

        Ok(FieldRef { path, plural })
    }

    fn joined(&mut self, join: &String, node: &JoinNode) -> Result<FieldRef> {
        assert_eq!(*join, node.path, "read through the wrong join");

        // One row per joined value
        Ok(FieldRef {
            path: join.clone(),
            plural: false,
        })
    }

        fn and(&mut self, lhs: Pred, rhs: Pred) -> Pred {
        Pred::And(Box::new(lhs), Box::new(rhs))
    }

    fn or(&mut self, lhs: Pred, rhs: Pred) -> Pred {
        Pred::Or(Box::new(lhs), Box::new(rhs))
    }

    fn not(&mut self, predicate: Pred) -> Pred {
        Pred::Not(Box::new(predicate))
    }

    fn equal(&mut self, path: &FieldRef, value: &FieldValue) -> Result<Pred> {
        Ok(if path.plural {
            Pred::MemberOf(path.path.clone(), value.clone())
        } else {
            Pred::Eq(path.path.clone(), value.clone())
        })
    }

    fn is_null(&mut self, path: &FieldRef) -> Result<Pred> {
        Ok(if path.plural {
            Pred::IsEmpty(path.path.clone())
        } else {
            Pred::IsNull(path.path.clone())
        })
    }

    fn in_list(&mut self, path: &FieldRef, values: &[FieldValue]) -> Result<Pred> {
        assert!(values.iter().all(|value| !value.is_null()));
        Ok(Pred::In(path.path.clone(), values.to_vec()))
    }

    fn like(&mut self, path: &FieldRef, pattern: &str) -> Result<Pred> {
        Ok(Pred::Like(path.path.clone(), pattern.replace('*', "%")))
    }

    fn ilike(&mut self, path: &FieldRef, pattern: &str) -> Result<Pred> {
        Ok(Pred::ILike(
            path.path.clone(),
            pattern.replace('*', "%").to_lowercase(),
        ))
    }

    fn less_than(&mut self, path: &FieldRef, value: &FieldValue) -> Result<Pred> {
        Ok(Pred::Lt(path.path.clone(), value.clone()))
    }

    fn less_than_or_equals(&mut self, path: &FieldRef, value: &FieldValue) -> Result<Pred> {
        Ok(Pred::Le(path.path.clone(), value.clone()))
    }

    fn greater_than(&mut self, path: &FieldRef, value: &FieldValue) -> Result<Pred> {
        Ok(Pred::Gt(path.path.clone(), value.clone()))
    }

    fn greater_than_or_equals(&mut self, path: &FieldRef, value: &FieldValue) -> Result<Pred> {
        Ok(Pred::Ge(path.path.clone(), value.clone()))
    }
}

impl fmt::Display for Pred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pred::Eq(path, value) => write!(f, "{path} = {value}"),
            Pred::MemberOf(path, value) => write!(f, "{value} MEMBER OF {path}"),
            Pred::IsNull(path) => write!(f, "{path} IS NULL"),
            Pred::IsEmpty(path) => write!(f, "{path} IS EMPTY"),
            Pred::In(path, values) => {
                write!(f, "{path} IN (")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
            Pred::Like(path, pattern) => write!(f, "{path} LIKE '{pattern}'"),
            Pred::ILike(path, pattern) => write!(f, "LOWER({path}) LIKE '{pattern}'"),
            Pred::Lt(path, value) => write!(f, "{path} < {value}"),
            Pred::Le(path, value) => write!(f, "{path} <= {value}"),
            Pred::Gt(path, value) => write!(f, "{path} > {value}"),
            Pred::Ge(path, value) => write!(f, "{path} >= {value}"),
            Pred::And(lhs, rhs) => write!(f, "({lhs} AND {rhs})"),
            Pred::Or(lhs, rhs) => write!(f, "({lhs} OR {rhs})"),
            Pred::Not(pred) => write!(f, "NOT ({pred})"),
        }
    }
}
