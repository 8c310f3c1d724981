//! Free-text yes/no classification.
//!
//! Legacy spreadsheet cells hold answers such as `Y`, `yes`, `No` or
//! arbitrary prose. Only the four canonical spellings are recognised; all
//! other text is [`Tristate::Unknown`].

use serde::{Deserialize, Serialize};

/// Result of classifying a yes/no cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tristate {
    Yes,
    No,
    Unknown,
}

impl Tristate {
    /// Classify a cell value, ignoring case.
    ///
    /// Surrounding whitespace is significant: `" y"` is `Unknown`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.to_lowercase().as_str() {
            "y" | "yes" => Self::Yes,
            "n" | "no" => Self::No,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }

    /// The explicit boolean, if the text was recognised.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Yes => Some(true),
            Self::No => Some(false),
            Self::Unknown => None,
        }
    }
}

/// True when at least one value reads as yes.
///
/// `Unknown` counts as no, so a column set of only unrecognised text
/// aggregates to `false`.
pub fn any_yes<'a, I>(values: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .any(|value| Tristate::parse(value).is_yes())
}
