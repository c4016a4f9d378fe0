use strainer_core::convert::NULL_TOKEN;
use strainer_core::{bail, Result};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Settings applied by [`SearchContext::builder`](crate::SearchContext::builder).
///
/// Every field is optional when deserializing; missing fields take their
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Raw value requesting an explicit null filter. Compared ignoring case.
    pub null_token: String,

    /// Field name suffixes stripped to form aliases. Empty disables suffix
    /// aliases.
    pub alias_field_suffixes: Vec<String>,

    /// Also accept the `snake_case` spelling of camelCase field names.
    pub snake_case_aliases: bool,

    /// Recognize the `CURRENT_DATE`, `CURRENT_TIME` and `CURRENT_DATE_TIME`
    /// tokens.
    pub keywords: bool,
}

impl SearchConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json).context("invalid search configuration")?;
        Ok(config)
    }

    pub(crate) fn verify(&self) -> Result<()> {
        if self.null_token.is_empty() {
            bail!("invalid search configuration: the null token must not be empty");
        }

        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            null_token: NULL_TOKEN.to_string(),
            alias_field_suffixes: vec!["Entity".to_string(), "Entities".to_string()],
            snake_case_aliases: false,
            keywords: true,
        }
    }
}
