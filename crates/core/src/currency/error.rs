//! Amount parsing errors.

use serde::Serialize;
use thiserror::Error;

/// Which string format an amount was expected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountFormat {
    /// `R$ 1.234,56`: optional marker, `.` thousands, `,` decimals.
    Balance,
    /// `1234,56`: `,` decimals only.
    Expense,
}

impl std::fmt::Display for AmountFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balance => write!(f, "balance"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// An amount string that does not denote a finite decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparsable {format} amount: {raw:?}")]
pub struct UnparsableAmount {
    /// The offending input, untouched.
    pub raw: String,
    /// Format the input was parsed as.
    pub format: AmountFormat,
}

impl UnparsableAmount {
    /// Creates a new error for `raw`.
    #[must_use]
    pub fn new(raw: &str, format: AmountFormat) -> Self {
        Self {
            raw: raw.to_string(),
            format,
        }
    }
}
