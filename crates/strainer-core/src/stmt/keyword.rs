use std::fmt;

/// Reserved value tokens evaluated by the backend at query time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
    CurrentDate,
    CurrentTime,
    CurrentDateTime,
}

impl Keyword {
    pub const ALL: [Keyword; 3] = [
        Keyword::CurrentDate,
        Keyword::CurrentTime,
        Keyword::CurrentDateTime,
    ];

    /// Matches a raw request value against the keyword tokens, ignoring case.
    pub fn from_token(token: &str) -> Option<Keyword> {
        Self::ALL
            .into_iter()
            .find(|keyword| keyword.as_str().eq_ignore_ascii_case(token))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTime => "CURRENT_TIME",
            Self::CurrentDateTime => "CURRENT_DATE_TIME",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
