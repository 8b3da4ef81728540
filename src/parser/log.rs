use std::path::Path;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::{
    model::log::{Log, LogDraft, LogHeader, OffTime},
    parser::{contact::parse_contact, contact::parse_timestamp, ParseError, ParseOptions},
    registry::{Field, END_OF_LOG, EXTENSION_PREFIX, QSO_KEYWORD, X_QSO_KEYWORD},
};

/// Decodes a whole log document.
///
/// Blank lines are skipped and everything after `END-OF-LOG:` is ignored.
/// `QSO` and `X-QSO` lines go into one sequence in file order, so the ordering
/// check in [`Log::new`] runs across both keywords.
pub fn parse_log_text(text: &str, options: &ParseOptions) -> Result<Log, ParseError> {
    let keywords = keyword_index();
    let mut draft = LogDraft::default();

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = split_line(line).ok_or_else(|| ParseError::MalformedLine {
            line_number,
            line: line.to_string(),
        })?;

        match key {
            END_OF_LOG => {
                trace!(line_number, "end of log marker reached");
                break;
            }
            QSO_KEYWORD | X_QSO_KEYWORD => {
                let contact = parse_contact(value, key == QSO_KEYWORD)?;
                draft.contacts.push(contact);
            }
            _ => {
                if let Some(field) = keywords.get(key) {
                    apply_field(&mut draft.header, *field, value)?;
                } else if key.starts_with(EXTENSION_PREFIX) {
                    if !value.is_empty() {
                        draft.extensions.insert(key.to_string(), value.to_string());
                    }
                } else if options.ignore_unknown_keyword {
                    debug!(line_number, keyword = key, "dropping unknown keyword");
                } else {
                    return Err(ParseError::UnknownKeyword {
                        line_number,
                        keyword: key.to_string(),
                    });
                }
            }
        }
    }

    let log = Log::new(draft, options.log_options())?;
    debug!(
        contacts = log.contacts().len(),
        extensions = log.extensions().len(),
        "decoded log"
    );
    Ok(log)
}

/// Reads `path` in one go and decodes it with [`parse_log_text`].
///
/// Bytes that are not UTF-8 are replaced rather than rejected, since contest
/// software still writes Latin-1 names and addresses.
pub fn parse_log_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Log, ParseError> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    parse_log_text(&text, options)
}

/// Keyword to field lookup, derived from the registry.
fn keyword_index() -> HashMap<&'static str, Field> {
    Field::ALL.iter().map(|f| (f.keyword(), *f)).collect()
}

/// Splits `KEY: value` at the first colon, trimming both sides.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

fn apply_field(header: &mut LogHeader, field: Field, value: &str) -> Result<(), ParseError> {
    match field {
        Field::Operators => header.operators.extend(
            value
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        ),
        Field::Address => header.address.push(value.to_string()),
        Field::Soapbox => header.soapbox.push(value.to_string()),
        // empty means absent; never overwrite an earlier value
        _ if value.is_empty() => {}
        Field::Version => header.version = value.to_string(),
        Field::ClaimedScore => {
            let score = value
                .parse::<i64>()
                .map_err(|_| ParseError::InvalidClaimedScore {
                    value: value.to_string(),
                })?;
            header.claimed_score = Some(score);
        }
        Field::Certificate => header.certificate = Some(value.eq_ignore_ascii_case("YES")),
        Field::OffTime => header.offtime = Some(parse_offtime(value)?),
        _ => {
            if let Some(slot) = header.text_mut(field) {
                *slot = Some(value.to_string());
            }
        }
    }
    Ok(())
}

fn parse_offtime(value: &str) -> Result<OffTime, ParseError> {
    let invalid = || ParseError::InvalidOffTime {
        value: value.to_string(),
    };
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let [start_date, start_time, end_date, end_time] = tokens.as_slice() else {
        return Err(invalid());
    };
    let start = parse_timestamp(start_date, start_time).ok_or_else(invalid)?;
    let end = parse_timestamp(end_date, end_time).ok_or_else(invalid)?;
    Ok(OffTime { start, end })
}
