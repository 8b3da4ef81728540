//! Text decoders for contact lines and whole logs.

use thiserror::Error;

use crate::model::{contact::ContactError, log::LogError, log::LogOptions};

/// Positional contact-line decoder.
pub mod contact;
/// Line-oriented whole-log decoder.
pub mod log;

/// Errors raised while decoding log text.
///
/// Contact and log validation errors pass through unchanged.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Line is not shaped `KEYWORD: value`.
    #[error("line {line_number} is not of the form KEYWORD: value: {line:?}")]
    MalformedLine {
        /// 1-based line number.
        line_number: usize,
        /// The offending line, verbatim.
        line: String,
    },
    /// Keyword outside the registry and not an extension.
    #[error("unknown keyword {keyword} on line {line_number}")]
    UnknownKeyword {
        /// 1-based line number.
        line_number: usize,
        /// The offending keyword.
        keyword: String,
    },
    /// Claimed score is not a plain integer.
    #[error("claimed score {value:?} is not a plain integer, write it like 12345678")]
    InvalidClaimedScore {
        /// The offending value.
        value: String,
    },
    /// Off-time is not two `YYYY-MM-DD HHMM` timestamps.
    #[error("off-time {value:?} is not two YYYY-MM-DD HHMM timestamps")]
    InvalidOffTime {
        /// The offending value.
        value: String,
    },
    /// Contact line failed to decode.
    #[error(transparent)]
    Contact(#[from] ContactError),
    /// Decoded fields failed log validation.
    #[error(transparent)]
    Log(#[from] LogError),
    /// Reading the input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Switches for [`log::parse_log_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop lines with unknown keywords instead of failing.
    pub ignore_unknown_keyword: bool,
    /// Validate category fields against the registry tables.
    pub check_categories: bool,
    /// Accept contacts out of time order; the resulting log cannot be encoded.
    pub allow_unordered: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ignore_unknown_keyword: false,
            check_categories: true,
            allow_unordered: false,
        }
    }
}

impl ParseOptions {
    /// Construction options passed on to [`crate::model::log::Log::new`].
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            check_categories: self.check_categories,
            allow_unordered: self.allow_unordered,
        }
    }
}
