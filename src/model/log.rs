//! Whole-log record: header fields, contacts, extensions and the text encoder.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    model::contact::{Contact, TIMESTAMP_FORMAT},
    registry::{
        Category, Field, DEFAULT_CREATED_BY, END_OF_LOG, EXTENSION_PREFIX, SUPPORTED_VERSION,
        X_QSO_KEYWORD,
    },
};

/// Errors raised while building, extending or encoding a [`Log`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// Version other than `3.0`.
    #[error("only Cabrillo v3 supported, got {version}")]
    UnsupportedVersion {
        /// Rejected version string.
        version: String,
    },
    /// Category field holds a value outside its table.
    #[error("got {value} for {field} but expecting one of {allowed:?}")]
    InvalidCategory {
        /// Attribute name of the field.
        field: &'static str,
        /// Rejected value.
        value: String,
        /// Accepted values.
        allowed: &'static [&'static str],
    },
    /// Contact is earlier than the one appended before it.
    #[error("contacts need to be ordered time-wise: {next} is earlier than {previous}")]
    OutOfOrder {
        /// Timestamp of the last appended contact.
        previous: DateTime<Utc>,
        /// Timestamp of the rejected contact.
        next: DateTime<Utc>,
    },
    /// Encoding was requested for a log accepted in unordered mode.
    #[error("refusing to write a log accepted in unordered mode, contacts must be ordered time-wise")]
    UnorderedOutput,
    /// Value that would not decode back unchanged: it spans lines, carries
    /// surrounding whitespace, or is an operator callsign that would split.
    #[error("value {value:?} for {field} cannot be written as a single trimmed line")]
    UnencodableValue {
        /// Attribute name or extension keyword.
        field: String,
        /// Rejected value.
        value: String,
    },
    /// Extension key lacks the `X-` prefix, collides with `X-QSO`, or contains a
    /// colon or whitespace.
    #[error("extension keyword {key:?} must start with X-, must not be X-QSO and must not contain ':' or whitespace")]
    InvalidExtensionKey {
        /// Rejected key.
        key: String,
    },
    /// Destination writer failed.
    #[error("failed to write log text")]
    Format(#[from] fmt::Error),
}

/// Off-time period: exactly a start and an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffTime {
    /// Start of the break.
    pub start: DateTime<Utc>,
    /// End of the break.
    pub end: DateTime<Utc>,
}

/// Header fields of a log.
///
/// Optional text fields treat the empty string as absent: [`Log::new`] turns
/// `Some("")` into `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogHeader {
    /// Format version; only `3.0` is accepted.
    pub version: String,
    /// Station callsign.
    pub callsign: Option<String>,
    /// Contest identifier.
    pub contest: Option<String>,
    /// `CATEGORY-ASSISTED`.
    pub category_assisted: Option<String>,
    /// `CATEGORY-BAND`.
    pub category_band: Option<String>,
    /// `CATEGORY-MODE`.
    pub category_mode: Option<String>,
    /// `CATEGORY-OPERATOR`.
    pub category_operator: Option<String>,
    /// `CATEGORY-POWER`.
    pub category_power: Option<String>,
    /// `CATEGORY-STATION`.
    pub category_station: Option<String>,
    /// `CATEGORY-TIME`.
    pub category_time: Option<String>,
    /// `CATEGORY-TRANSMITTER`.
    pub category_transmitter: Option<String>,
    /// `CATEGORY-OVERLAY`.
    pub category_overlay: Option<String>,
    /// Certificate requested by post.
    pub certificate: Option<bool>,
    /// Claimed score.
    pub claimed_score: Option<i64>,
    /// Club represented.
    pub club: Option<String>,
    /// Software that produced the log.
    pub created_by: Option<String>,
    /// Submitter email.
    pub email: Option<String>,
    /// State, section or other contest-specific location.
    pub location: Option<String>,
    /// Submitter name.
    pub name: Option<String>,
    /// Mailing address, one entry per line.
    pub address: Vec<String>,
    /// `ADDRESS-CITY`.
    pub address_city: Option<String>,
    /// `ADDRESS-STATE-PROVINCE`.
    pub address_state_province: Option<String>,
    /// `ADDRESS-POSTALCODE`.
    pub address_postalcode: Option<String>,
    /// `ADDRESS-COUNTRY`.
    pub address_country: Option<String>,
    /// Operator callsigns.
    pub operators: Vec<String>,
    /// Off-time period.
    pub offtime: Option<OffTime>,
    /// Soapbox text, one entry per line.
    pub soapbox: Vec<String>,
}

impl Default for LogHeader {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION.to_string(),
            callsign: None,
            contest: None,
            category_assisted: None,
            category_band: None,
            category_mode: None,
            category_operator: None,
            category_power: None,
            category_station: None,
            category_time: None,
            category_transmitter: None,
            category_overlay: None,
            certificate: None,
            claimed_score: None,
            club: None,
            created_by: None,
            email: None,
            location: None,
            name: None,
            address: Vec::new(),
            address_city: None,
            address_state_province: None,
            address_postalcode: None,
            address_country: None,
            operators: Vec::new(),
            offtime: None,
            soapbox: Vec::new(),
        }
    }
}

impl LogHeader {
    /// Value of a single-valued text field. `None` for absent values and for
    /// fields that are not plain text.
    pub fn text(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Callsign => &self.callsign,
            Field::Contest => &self.contest,
            Field::CategoryAssisted => &self.category_assisted,
            Field::CategoryBand => &self.category_band,
            Field::CategoryMode => &self.category_mode,
            Field::CategoryOperator => &self.category_operator,
            Field::CategoryPower => &self.category_power,
            Field::CategoryStation => &self.category_station,
            Field::CategoryTime => &self.category_time,
            Field::CategoryTransmitter => &self.category_transmitter,
            Field::CategoryOverlay => &self.category_overlay,
            Field::Club => &self.club,
            Field::CreatedBy => &self.created_by,
            Field::Email => &self.email,
            Field::Location => &self.location,
            Field::Name => &self.name,
            Field::AddressCity => &self.address_city,
            Field::AddressStateProvince => &self.address_state_province,
            Field::AddressPostalcode => &self.address_postalcode,
            Field::AddressCountry => &self.address_country,
            _ => return None,
        };
        slot.as_deref()
    }

    /// Mutable slot of a single-valued text field, `None` for other fields.
    pub fn text_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        let slot = match field {
            Field::Callsign => &mut self.callsign,
            Field::Contest => &mut self.contest,
            Field::CategoryAssisted => &mut self.category_assisted,
            Field::CategoryBand => &mut self.category_band,
            Field::CategoryMode => &mut self.category_mode,
            Field::CategoryOperator => &mut self.category_operator,
            Field::CategoryPower => &mut self.category_power,
            Field::CategoryStation => &mut self.category_station,
            Field::CategoryTime => &mut self.category_time,
            Field::CategoryTransmitter => &mut self.category_transmitter,
            Field::CategoryOverlay => &mut self.category_overlay,
            Field::Club => &mut self.club,
            Field::CreatedBy => &mut self.created_by,
            Field::Email => &mut self.email,
            Field::Location => &mut self.location,
            Field::Name => &mut self.name,
            Field::AddressCity => &mut self.address_city,
            Field::AddressStateProvince => &mut self.address_state_province,
            Field::AddressPostalcode => &mut self.address_postalcode,
            Field::AddressCountry => &mut self.address_country,
            _ => return None,
        };
        Some(slot)
    }

    /// Value of a category field.
    pub fn category(&self, category: Category) -> Option<&str> {
        self.text(category.field())
    }

    /// Checks every present category field against its table.
    pub fn check_categories(&self) -> Result<(), LogError> {
        for category in Category::ALL {
            if let Some(value) = self.category(category) {
                if !category.accepts(value) {
                    return Err(LogError::InvalidCategory {
                        field: category.field().name(),
                        value: value.to_string(),
                        allowed: category.allowed(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that every value survives a write and re-read unchanged.
    ///
    /// Values must not contain line breaks or surrounding whitespace. Operator
    /// callsigns must also be free of commas and inner whitespace.
    pub fn check_encodable(&self) -> Result<(), LogError> {
        for field in Field::ALL {
            if let Some(value) = self.text(field) {
                check_line(field.name(), value)?;
            }
        }
        for line in &self.address {
            check_line(Field::Address.name(), line)?;
        }
        for line in &self.soapbox {
            check_line(Field::Soapbox.name(), line)?;
        }
        for op in &self.operators {
            if op.is_empty() || op.contains(|c: char| c == ',' || c.is_whitespace()) {
                return Err(LogError::UnencodableValue {
                    field: Field::Operators.name().to_string(),
                    value: op.clone(),
                });
            }
        }
        Ok(())
    }

    fn clear_empty_text(&mut self) {
        for field in Field::ALL {
            if let Some(slot) = self.text_mut(field) {
                if slot.as_deref().is_some_and(str::is_empty) {
                    *slot = None;
                }
            }
        }
    }
}

/// Construction-time switches for [`Log::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    /// Validate category fields against the registry tables.
    pub check_categories: bool,
    /// Accept contacts out of time order; such a log can never be encoded.
    pub allow_unordered: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            check_categories: true,
            allow_unordered: false,
        }
    }
}

/// Insert payload used to create a new [`Log`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogDraft {
    /// Header fields.
    pub header: LogHeader,
    /// Contacts in file order, scored and excluded mixed.
    pub contacts: Vec<Contact>,
    /// Extension fields keyed by their `X-` keyword.
    pub extensions: IndexMap<String, String>,
}

/// One log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    /// Header fields.
    pub header: LogHeader,
    contacts: Vec<Contact>,
    extensions: IndexMap<String, String>,
    allow_unordered: bool,
}

impl Log {
    /// Validates `draft` and builds a log.
    ///
    /// Fills in the default created-by tag, rejects versions other than `3.0`,
    /// checks categories when enabled, then appends contacts one by one through
    /// [`Log::push_contact`].
    pub fn new(draft: LogDraft, options: LogOptions) -> Result<Self, LogError> {
        let LogDraft {
            mut header,
            contacts,
            extensions,
        } = draft;

        header.clear_empty_text();
        if header.created_by.is_none() {
            header.created_by = Some(DEFAULT_CREATED_BY.to_string());
        }
        if header.version != SUPPORTED_VERSION {
            return Err(LogError::UnsupportedVersion {
                version: header.version,
            });
        }
        if options.check_categories {
            header.check_categories()?;
        }
        header.check_encodable()?;

        let mut log = Self {
            header,
            contacts: Vec::with_capacity(contacts.len()),
            extensions: IndexMap::with_capacity(extensions.len()),
            allow_unordered: options.allow_unordered,
        };
        for (key, value) in extensions {
            log.insert_extension(key, value)?;
        }
        for contact in contacts {
            log.push_contact(contact)?;
        }
        Ok(log)
    }

    /// Appends a contact, enforcing non-decreasing timestamps unless the log was
    /// built with [`LogOptions::allow_unordered`].
    pub fn push_contact(&mut self, contact: Contact) -> Result<(), LogError> {
        if let Some(last) = self.contacts.last() {
            if contact.timestamp < last.timestamp {
                if !self.allow_unordered {
                    return Err(LogError::OutOfOrder {
                        previous: last.timestamp,
                        next: contact.timestamp,
                    });
                }
                debug!(
                    previous = %last.timestamp,
                    next = %contact.timestamp,
                    "accepting out-of-order contact"
                );
            }
        }
        self.contacts.push(contact);
        Ok(())
    }

    /// All contacts in file order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Scored contacts (`QSO`).
    pub fn valid_contacts(&self) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.valid).collect()
    }

    /// Excluded contacts (`X-QSO`).
    pub fn excluded_contacts(&self) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| !c.valid).collect()
    }

    /// Extension fields in first-seen order.
    pub fn extensions(&self) -> &IndexMap<String, String> {
        &self.extensions
    }

    /// Sets an extension field, returning the previous value.
    ///
    /// A new key goes to the end; an existing key keeps its position. An empty
    /// value means absent and removes the key.
    pub fn insert_extension(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, LogError> {
        let key = key.into();
        let value = value.into();
        if !key.starts_with(EXTENSION_PREFIX)
            || key == X_QSO_KEYWORD
            || key.contains(|c: char| c == ':' || c.is_whitespace())
        {
            return Err(LogError::InvalidExtensionKey { key });
        }
        if value.is_empty() {
            return Ok(self.extensions.shift_remove(&key));
        }
        check_line(&key, &value)?;
        Ok(self.extensions.insert(key, value))
    }

    /// True if this log was accepted in unordered mode.
    pub fn allow_unordered(&self) -> bool {
        self.allow_unordered
    }

    /// Renders the whole document.
    pub fn encode(&self) -> Result<String, LogError> {
        let mut out = String::with_capacity(256 + self.contacts.len() * 64);
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Writes the whole document to `out`.
    ///
    /// Fails if the log was accepted in unordered mode, or if the public header
    /// was edited after construction into something [`Log::new`] would reject:
    /// a version other than `3.0` or a value that does not fit on one line.
    pub fn write_to<W: fmt::Write>(&self, out: &mut W) -> Result<(), LogError> {
        if self.header.version != SUPPORTED_VERSION {
            return Err(LogError::UnsupportedVersion {
                version: self.header.version.clone(),
            });
        }
        if self.allow_unordered {
            return Err(LogError::UnorderedOutput);
        }
        self.header.check_encodable()?;

        for field in Field::ALL {
            self.write_field(out, field)?;
        }
        for (key, value) in &self.extensions {
            write_line(out, key, value)?;
        }
        for contact in &self.contacts {
            writeln!(out, "{contact}")?;
        }
        writeln!(out, "{END_OF_LOG}:")?;
        Ok(())
    }

    fn write_field<W: fmt::Write>(&self, out: &mut W, field: Field) -> fmt::Result {
        let header = &self.header;
        let keyword = field.keyword();
        match field {
            Field::Version => write_line(out, keyword, &header.version),
            Field::Operators => {
                if header.operators.is_empty() {
                    return Ok(());
                }
                write_line(out, keyword, &header.operators.join(" "))
            }
            Field::ClaimedScore => match header.claimed_score {
                Some(score) => write_line(out, keyword, &score.to_string()),
                None => Ok(()),
            },
            Field::Certificate => match header.certificate {
                Some(flag) => write_line(out, keyword, if flag { "YES" } else { "NO" }),
                None => Ok(()),
            },
            Field::OffTime => match &header.offtime {
                Some(off) => write_line(
                    out,
                    keyword,
                    &format!(
                        "{} {}",
                        off.start.format(TIMESTAMP_FORMAT),
                        off.end.format(TIMESTAMP_FORMAT)
                    ),
                ),
                None => Ok(()),
            },
            Field::Address | Field::Soapbox => {
                let lines = if field == Field::Address {
                    &header.address
                } else {
                    &header.soapbox
                };
                for line in lines {
                    write_line(out, keyword, line)?;
                }
                Ok(())
            }
            _ => match header.text(field) {
                Some(value) if !value.is_empty() => write_line(out, keyword, value),
                _ => Ok(()),
            },
        }
    }
}

/// `KEYWORD: value`, without a trailing blank when the value is empty.
fn check_line(field: &str, value: &str) -> Result<(), LogError> {
    if value.contains(['\n', '\r']) || value.trim() != value {
        return Err(LogError::UnencodableValue {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn write_line<W: fmt::Write>(out: &mut W, keyword: &str, value: &str) -> fmt::Result {
    if value.is_empty() {
        writeln!(out, "{keyword}:")
    } else {
        writeln!(out, "{keyword}: {value}")
    }
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Log for {}>", self.header.callsign.as_deref().unwrap_or(""))
    }
}
