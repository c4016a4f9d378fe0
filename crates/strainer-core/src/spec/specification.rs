use super::QueryBuilder;
use crate::Result;

use std::fmt;
use std::rc::Rc;

type SpecFn<B> = dyn Fn(&mut B) -> Result<Option<<B as QueryBuilder>::Predicate>>;

/// A deferred predicate.
///
/// Evaluating a specification against a [`QueryBuilder`] yields either a
/// backend predicate or nothing. "Nothing" is the no-predicate value: it is
/// the identity of [`and`](Specification::and) and
/// [`or`](Specification::or), and negating it yields it again.
pub struct Specification<B: QueryBuilder> {
    f: Rc<SpecFn<B>>,
}

impl<B: QueryBuilder> Specification<B> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut B) -> Result<Option<B::Predicate>> + 'static,
    {
        Self { f: Rc::new(f) }
    }

    /// The specification that never produces a predicate.
    pub fn no_predicate() -> Self {
        Self::new(|_| Ok(None))
    }

    /// Returns `spec`, or the no-predicate specification when it is `None`.
    pub fn where_(spec: Option<Self>) -> Self {
        spec.unwrap_or_else(Self::no_predicate)
    }

    /// Evaluates the specification. `None` is the no-predicate value.
    pub fn to_predicate(&self, builder: &mut B) -> Result<Option<B::Predicate>> {
        (self.f)(builder)
    }

    /// Negates the predicate. Negating the no-predicate value yields the
    /// no-predicate value.
    pub fn not(self) -> Self {
        Self::new(move |builder| {
            Ok(self
                .to_predicate(builder)?
                .map(|predicate| builder.not(predicate)))
        })
    }

    pub fn and(self, other: Self) -> Self {
        Self::composed(self, other, |builder, lhs, rhs| builder.and(lhs, rhs))
    }

    pub fn or(self, other: Self) -> Self {
        Self::composed(self, other, |builder, lhs, rhs| builder.or(lhs, rhs))
    }

    /// Combines two specifications.
    ///
    /// Both sides are evaluated against the same builder, `lhs` first. When
    /// either side produces no predicate, the other side's predicate is
    /// returned as is and `combiner` is not called.
    pub fn composed<C>(lhs: Self, rhs: Self, combiner: C) -> Self
    where
        C: Fn(&mut B, B::Predicate, B::Predicate) -> B::Predicate + 'static,
    {
        Self::new(move |builder| {
            let lhs = lhs.to_predicate(builder)?;
            let rhs = rhs.to_predicate(builder)?;

            Ok(match (lhs, rhs) {
                (None, rhs) => rhs,
                (lhs, None) => lhs,
                (Some(lhs), Some(rhs)) => Some(combiner(builder, lhs, rhs)),
            })
        })
    }
}

impl<B: QueryBuilder> Clone for Specification<B> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<B: QueryBuilder> Default for Specification<B> {
    fn default() -> Self {
        Self::no_predicate()
    }
}

impl<B: QueryBuilder> fmt::Debug for Specification<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification").finish_non_exhaustive()
    }
}
