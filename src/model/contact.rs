//! Contact record, draft, match options and the contact line encoder.

use std::fmt;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    registry::{QSO_KEYWORD, X_QSO_KEYWORD},
    types::{bands_compatible, Mode, TransmitterId},
};

/// Timestamp layout used on contact and off-time lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H%M";

/// Sentinel for [`MatchOptions::max_time_delta_minutes`] that disables the time check.
pub const NO_TIME_LIMIT: i64 = -1;

/// Errors raised while building or decoding a single contact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// Mode token is neither a wire code nor a known long-form name.
    #[error("{mode} is not a valid mode")]
    InvalidMode {
        /// Offending mode token.
        mode: String,
    },
    /// Contact line has fewer tokens than frequency, mode, date, time and two calls with exchange.
    #[error("contact has too few components: expected at least 8, got {count}")]
    TooFewComponents {
        /// Number of tokens found.
        count: usize,
    },
    /// Odd number of exchanged tokens without a valid trailing transmitter id.
    #[error("{count} exchange components presented, which is uneven")]
    UnevenExchange {
        /// Exchanged token count, callsigns included.
        count: usize,
    },
    /// Date and time tokens are not `YYYY-MM-DD HHMM`.
    #[error("cannot parse timestamp {text:?}, expected YYYY-MM-DD HHMM")]
    InvalidTimestamp {
        /// Date and time tokens joined by a space.
        text: String,
    },
    /// Frequency, callsign or exchange token that is empty or holds whitespace.
    #[error("{field} token {value:?} must be non-empty and free of whitespace")]
    InvalidToken {
        /// Which part of the contact the token belongs to.
        field: &'static str,
        /// Offending token.
        value: String,
    },
    /// Negative time tolerance other than [`NO_TIME_LIMIT`].
    #[error("max time delta must be non-negative or -1, got {minutes}")]
    InvalidTimeDelta {
        /// Rejected tolerance.
        minutes: i64,
    },
}

/// Insert payload used to create a new [`Contact`].
///
/// The line format has no separators between calls and exchanges, so a
/// contact only decodes back unchanged when both exchanges have the same
/// length and at least one token each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    /// Frequency in kHz or a band designator such as `LIGHT`.
    pub frequency: String,
    /// Mode code; must be one of [`Mode::ALL`].
    pub mode: String,
    /// UTC time of the contact.
    pub timestamp: DateTime<Utc>,
    /// Callsign sent by the logging station.
    pub sent_call: String,
    /// Callsign received from the other station.
    pub received_call: String,
    /// Sent exchange tokens.
    pub sent_exchange: Vec<String>,
    /// Received exchange tokens.
    pub received_exchange: Vec<String>,
    /// Transmitter id for two-transmitter categories.
    pub transmitter_id: Option<TransmitterId>,
    /// False for excluded (`X-QSO`) contacts.
    pub valid: bool,
}

/// One logged contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Frequency in kHz or a band designator, kept as written.
    pub frequency: String,
    /// Mode code.
    pub mode: Mode,
    /// UTC time of the contact, minute precision.
    pub timestamp: DateTime<Utc>,
    /// Callsign sent by the logging station.
    pub sent_call: String,
    /// Callsign received from the other station.
    pub received_call: String,
    /// Sent exchange tokens, in order.
    pub sent_exchange: Vec<String>,
    /// Received exchange tokens, in order.
    pub received_exchange: Vec<String>,
    /// Transmitter id for two-transmitter categories.
    pub transmitter_id: Option<TransmitterId>,
    /// False for excluded (`X-QSO`) contacts.
    pub valid: bool,
}

/// Tuning for [`Contact::match_against`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOptions {
    /// Largest accepted time difference in minutes; [`NO_TIME_LIMIT`] disables the check.
    pub max_time_delta_minutes: i64,
    /// Compare sent and received exchanges crosswise.
    pub check_exchange: bool,
    /// Require compatible bands.
    pub check_band: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_time_delta_minutes: 30,
            check_exchange: true,
            check_band: true,
        }
    }
}

impl Contact {
    /// Validates `draft` and builds a contact.
    ///
    /// The mode must be an exact wire code. Frequency, calls and exchange
    /// tokens must be single non-empty tokens. Seconds and sub-second parts of
    /// the timestamp are dropped since the wire format carries minutes only.
    pub fn new(draft: ContactDraft) -> Result<Self, ContactError> {
        let mode = Mode::from_code(&draft.mode)
            .ok_or(ContactError::InvalidMode { mode: draft.mode })?;
        check_token("frequency", &draft.frequency)?;
        check_token("sent call", &draft.sent_call)?;
        check_token("received call", &draft.received_call)?;
        for token in &draft.sent_exchange {
            check_token("sent exchange", token)?;
        }
        for token in &draft.received_exchange {
            check_token("received exchange", token)?;
        }

        Ok(Self {
            frequency: draft.frequency,
            mode,
            timestamp: truncate_to_minute(draft.timestamp),
            sent_call: draft.sent_call,
            received_call: draft.received_call,
            sent_exchange: draft.sent_exchange,
            received_exchange: draft.received_exchange,
            transmitter_id: draft.transmitter_id,
            valid: draft.valid,
        })
    }

    /// Keyword introducing this contact: `QSO` or `X-QSO`.
    pub fn keyword(&self) -> &'static str {
        if self.valid {
            QSO_KEYWORD
        } else {
            X_QSO_KEYWORD
        }
    }

    /// Contact line without its keyword.
    ///
    /// Decoding splits the exchanged tokens evenly between the two calls and
    /// reads an odd trailing `0` or `1` as the transmitter id. Exchanges of
    /// unequal length, or an empty exchange, therefore decode into a different
    /// contact.
    pub fn body(&self) -> String {
        let stamp = self.timestamp.format(TIMESTAMP_FORMAT).to_string();
        let mut tokens: Vec<&str> = Vec::with_capacity(
            8 + self.sent_exchange.len() + self.received_exchange.len(),
        );
        tokens.push(&self.frequency);
        tokens.push(self.mode.code());
        tokens.push(&stamp);
        tokens.push(&self.sent_call);
        tokens.extend(self.sent_exchange.iter().map(String::as_str));
        tokens.push(&self.received_call);
        tokens.extend(self.received_exchange.iter().map(String::as_str));
        if let Some(t) = self.transmitter_id {
            tokens.push(t.token());
        }
        tokens.join(" ")
    }

    /// Full contact line, keyword included.
    pub fn to_line(&self) -> String {
        self.to_string()
    }

    /// True when `other` is the other station's record of the same contact.
    ///
    /// Calls must mirror each other and modes must agree. Time, crosswise
    /// exchanges and band are checked as configured in `options`.
    pub fn match_against(&self, other: &Contact, options: &MatchOptions) -> Result<bool, ContactError> {
        let max_delta = options.max_time_delta_minutes;
        if max_delta < 0 && max_delta != NO_TIME_LIMIT {
            return Err(ContactError::InvalidTimeDelta { minutes: max_delta });
        }

        if self.sent_call != other.received_call || self.received_call != other.sent_call {
            return Ok(false);
        }
        if self.mode != other.mode {
            return Ok(false);
        }
        if max_delta != NO_TIME_LIMIT {
            let delta = (self.timestamp - other.timestamp).num_minutes().abs();
            if delta > max_delta {
                return Ok(false);
            }
        }
        if options.check_exchange
            && (self.sent_exchange != other.received_exchange
                || self.received_exchange != other.sent_exchange)
        {
            return Ok(false);
        }
        if options.check_band && !bands_compatible(&self.frequency, &other.frequency) {
            return Ok(false);
        }
        Ok(true)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.keyword(), self.body())
    }
}

fn check_token(field: &'static str, value: &str) -> Result<(), ContactError> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(ContactError::InvalidToken {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn truncate_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}
