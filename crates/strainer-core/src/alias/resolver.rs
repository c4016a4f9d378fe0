use crate::schema::{EntityType, Field};

use std::fmt;
use std::sync::Arc;

/// Proposes alternate names for the fields of an entity type.
pub trait AliasResolver: Send + Sync {
    /// Returns `true` if this resolver has aliases for the field.
    fn supports(&self, owner: &EntityType, field: &Field) -> bool;

    /// Returns the aliases of the field. Only called when
    /// [`supports`](AliasResolver::supports) returned `true`.
    fn resolve(&self, owner: &EntityType, field: &Field) -> Vec<String>;
}

/// An [`AliasResolver`] backed by a closure.
///
/// The resolver supports every field; returning no aliases registers nothing.
///
/// ```
/// use strainer_core::alias::FnAliasResolver;
///
/// let resolver = FnAliasResolver::new(|owner, field| {
///     if owner.name == "Person" && field.name == "email" {
///         vec!["mail".to_string()]
///     } else {
///         vec![]
///     }
/// });
/// # let _ = resolver;
/// ```
pub struct FnAliasResolver<F> {
    f: F,
}

impl<F> FnAliasResolver<F>
where
    F: Fn(&EntityType, &Field) -> Vec<String> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> AliasResolver for FnAliasResolver<F>
where
    F: Fn(&EntityType, &Field) -> Vec<String> + Send + Sync,
{
    fn supports(&self, _owner: &EntityType, _field: &Field) -> bool {
        true
    }

    fn resolve(&self, owner: &EntityType, field: &Field) -> Vec<String> {
        (self.f)(owner, field)
    }
}

impl<F> fmt::Debug for FnAliasResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAliasResolver").finish_non_exhaustive()
    }
}

impl<T: AliasResolver + ?Sized> AliasResolver for Box<T> {
    fn supports(&self, owner: &EntityType, field: &Field) -> bool {
        (**self).supports(owner, field)
    }

    fn resolve(&self, owner: &EntityType, field: &Field) -> Vec<String> {
        (**self).resolve(owner, field)
    }
}

impl<T: AliasResolver + ?Sized> AliasResolver for Arc<T> {
    fn supports(&self, owner: &EntityType, field: &Field) -> bool {
        (**self).supports(owner, field)
    }

    fn resolve(&self, owner: &EntityType, field: &Field) -> Vec<String> {
        (**self).resolve(owner, field)
    }
}
