use crate::schema::PropertyInfo;

use std::fmt;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner => "INNER".fmt(f),
            Self::Left => "LEFT".fmt(f),
        }
    }
}

/// How a join is created.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JoinDecision {
    pub kind: JoinKind,

    /// Whether the association data is loaded in the same round-trip
    pub fetched: bool,
}

impl JoinDecision {
    /// Inner join used only for filtering.
    pub const DEFAULT: JoinDecision = JoinDecision {
        kind: JoinKind::Inner,
        fetched: false,
    };

    /// Left join that also loads the association.
    pub const FETCH: JoinDecision = JoinDecision {
        kind: JoinKind::Left,
        fetched: true,
    };
}

impl Default for JoinDecision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Decides how a join-annotated property is joined.
///
/// Handlers are consulted in order; the first one that supports a property
/// decides for it.
pub trait EntityJoinHandler: Send + Sync {
    fn supports(&self, property: &PropertyInfo) -> bool;

    fn handle(&self, property: &PropertyInfo) -> JoinDecision;
}

/// Supports every property with an inner, filtering-only join. Always
/// consulted last.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultJoinHandler;

impl EntityJoinHandler for DefaultJoinHandler {
    fn supports(&self, _property: &PropertyInfo) -> bool {
        true
    }

    fn handle(&self, _property: &PropertyInfo) -> JoinDecision {
        JoinDecision::DEFAULT
    }
}

/// Fetches every association.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchingAllJoinHandler;

impl EntityJoinHandler for FetchingAllJoinHandler {
    fn supports(&self, _property: &PropertyInfo) -> bool {
        true
    }

    fn handle(&self, _property: &PropertyInfo) -> JoinDecision {
        JoinDecision::FETCH
    }
}

/// Fetches associations whose join annotation asks for eager loading.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchingEagerJoinHandler;

impl EntityJoinHandler for FetchingEagerJoinHandler {
    fn supports(&self, property: &PropertyInfo) -> bool {
        property
            .join_annotation
            .as_ref()
            .map(|annotation| annotation.is_eager())
            .unwrap_or(false)
    }

    fn handle(&self, _property: &PropertyInfo) -> JoinDecision {
        JoinDecision::FETCH
    }
}
