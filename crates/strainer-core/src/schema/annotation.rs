/// When the data of an association is loaded.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FetchType {
    #[default]
    Lazy,
    Eager,
}

/// Metadata marker attached to a field declaration.
///
/// The association markers drive join planning. `Named` markers carry no
/// meaning of their own and are available to custom alias resolvers and join
/// handlers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Annotation {
    OneToOne(FetchType),
    OneToMany(FetchType),
    ManyToOne(FetchType),
    ManyToMany(FetchType),
    ElementCollection(FetchType),
    Named(String),
}

/// The kind of an [`Annotation`], without its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnotationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
    ElementCollection,
    Named(String),
}

impl Annotation {
    // Single-valued associations load eagerly unless told otherwise,
    // collection-valued ones lazily.

    pub fn one_to_one() -> Self {
        Self::OneToOne(FetchType::Eager)
    }

    pub fn one_to_many() -> Self {
        Self::OneToMany(FetchType::Lazy)
    }

    pub fn many_to_one() -> Self {
        Self::ManyToOne(FetchType::Eager)
    }

    pub fn many_to_many() -> Self {
        Self::ManyToMany(FetchType::Lazy)
    }

    pub fn element_collection() -> Self {
        Self::ElementCollection(FetchType::Lazy)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Overrides the fetch type of an association marker. `Named` markers
    /// are returned unchanged.
    pub fn fetch(self, fetch: FetchType) -> Self {
        match self {
            Self::OneToOne(_) => Self::OneToOne(fetch),
            Self::OneToMany(_) => Self::OneToMany(fetch),
            Self::ManyToOne(_) => Self::ManyToOne(fetch),
            Self::ManyToMany(_) => Self::ManyToMany(fetch),
            Self::ElementCollection(_) => Self::ElementCollection(fetch),
            named @ Self::Named(_) => named,
        }
    }

    pub fn eager(self) -> Self {
        self.fetch(FetchType::Eager)
    }

    pub fn lazy(self) -> Self {
        self.fetch(FetchType::Lazy)
    }

    pub fn fetch_type(&self) -> Option<FetchType> {
        match *self {
            Self::OneToOne(fetch)
            | Self::OneToMany(fetch)
            | Self::ManyToOne(fetch)
            | Self::ManyToMany(fetch)
            | Self::ElementCollection(fetch) => Some(fetch),
            Self::Named(_) => None,
        }
    }

    pub fn is_eager(&self) -> bool {
        self.fetch_type() == Some(FetchType::Eager)
    }

    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::OneToOne(_) => AnnotationKind::OneToOne,
            Self::OneToMany(_) => AnnotationKind::OneToMany,
            Self::ManyToOne(_) => AnnotationKind::ManyToOne,
            Self::ManyToMany(_) => AnnotationKind::ManyToMany,
            Self::ElementCollection(_) => AnnotationKind::ElementCollection,
            Self::Named(name) => AnnotationKind::Named(name.clone()),
        }
    }
}

impl AnnotationKind {
    /// Every association marker. The default set of join annotations.
    pub fn associations() -> Vec<AnnotationKind> {
        vec![
            Self::OneToOne,
            Self::OneToMany,
            Self::ManyToOne,
            Self::ManyToMany,
            Self::ElementCollection,
        ]
    }
}
