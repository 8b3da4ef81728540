use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::{
    model::contact::{Contact, ContactDraft, ContactError, TIMESTAMP_FORMAT},
    types::{Mode, TransmitterId},
};

/// Frequency, mode, date, time, then each call with at least one exchange token.
pub const MIN_CONTACT_TOKENS: usize = 8;

/// Leading fixed-position tokens: frequency, mode, date and time.
const PREFIX_TOKENS: usize = 4;

/// Decodes the value part of a `QSO:` or `X-QSO:` line.
///
/// Layout is `freq mode date time sent_call [sent_exch..] recv_call [recv_exch..] [t]`.
/// Tokens are split on whitespace runs, so column-padded logs decode the same.
/// An odd number of tokens after the time means the last one is a transmitter id,
/// which must be `0` or `1`. The mode token may be a long-form name such as `SSB`.
pub fn parse_contact(text: &str, valid: bool) -> Result<Contact, ContactError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < MIN_CONTACT_TOKENS {
        return Err(ContactError::TooFewComponents {
            count: tokens.len(),
        });
    }

    let mut exchanged = tokens.len() - PREFIX_TOKENS;
    let mut transmitter_id = None;
    if exchanged % 2 == 1 {
        let last = tokens[tokens.len() - 1];
        transmitter_id = Some(
            TransmitterId::from_token(last)
                .ok_or(ContactError::UnevenExchange { count: exchanged })?,
        );
        exchanged -= 1;
    }

    // at least MIN_CONTACT_TOKENS, so each half holds a call and one exchange token
    let half = exchanged / 2;
    let sent = &tokens[PREFIX_TOKENS..PREFIX_TOKENS + half];
    let received = &tokens[PREFIX_TOKENS + half..PREFIX_TOKENS + exchanged];
    let (sent_call, sent_exchange) = (sent[0], &sent[1..]);
    let (received_call, received_exchange) = (received[0], &received[1..]);

    let timestamp = parse_timestamp(tokens[2], tokens[3]).ok_or_else(|| {
        ContactError::InvalidTimestamp {
            text: format!("{} {}", tokens[2], tokens[3]),
        }
    })?;
    let mode = Mode::normalize(tokens[1]).ok_or_else(|| ContactError::InvalidMode {
        mode: tokens[1].to_string(),
    })?;

    Contact::new(ContactDraft {
        frequency: tokens[0].to_string(),
        mode: mode.code().to_string(),
        timestamp,
        sent_call: sent_call.to_string(),
        received_call: received_call.to_string(),
        sent_exchange: to_owned_tokens(sent_exchange),
        received_exchange: to_owned_tokens(received_exchange),
        transmitter_id,
        valid,
    })
}

/// Reads a `YYYY-MM-DD` date and `HHMM` time as UTC.
pub(crate) fn parse_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn to_owned_tokens(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| (*t).to_string()).collect()
}
