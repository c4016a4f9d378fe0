use std::fmt;

/// Comparison operator of a field expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    Equals,
    /// Case-sensitive pattern match. `*` matches any run of characters.
    Matches,
    /// Case-insensitive pattern match.
    IMatches,
    LessThan,
    LessThanOrEquals,
    GreaterThan,
    GreaterThanOrEquals,
    In,
}

impl Operator {
    pub fn is_in(self) -> bool {
        matches!(self, Self::In)
    }

    /// Returns `true` for the ordering comparisons.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanOrEquals | Self::GreaterThan | Self::GreaterThanOrEquals
        )
    }

    pub fn as_str(self) -> &'static str {
        use Operator::*;

        match self {
            Equals => "EQUALS",
            Matches => "MATCHES",
            IMatches => "IMATCHES",
            LessThan => "LESS_THAN",
            LessThanOrEquals => "LESS_THAN_OR_EQUALS",
            GreaterThan => "GREATER_THAN",
            GreaterThanOrEquals => "GREATER_THAN_OR_EQUALS",
            In => "IN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean connective joining several expressions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalOperator {
    And,
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => "AND".fmt(f),
            Self::Or => "OR".fmt(f),
        }
    }
}
