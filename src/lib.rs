//! Cabrillo contest log parsing, validation and serialization.
//!
//! # Examples
//!
//! Decoding and re-encoding a log with [`parser::log::parse_log_text`]:
//! ```
//! use cabrillo::{
//!     parser::{log::parse_log_text, ParseOptions},
//!     types::Mode,
//! };
//!
//! let text = "START-OF-LOG: 3.0\n\
//!             CALLSIGN: AA1ZZZ\n\
//!             QSO: 7005 CW 2009-05-30 0002 AA1ZZZ 599 1 S50A 599 4\n\
//!             END-OF-LOG:\n";
//! let log = parse_log_text(text, &ParseOptions::default()).expect("parse");
//! assert_eq!(log.header.callsign.as_deref(), Some("AA1ZZZ"));
//! assert_eq!(log.contacts()[0].mode, Mode::CW);
//! assert!(log.encode().expect("encode").contains("QSO: 7005 CW 2009-05-30 0002"));
//! ```
//!
//! Building a log directly with [`model::log::Log::new`]:
//! ```
//! use chrono::{TimeZone, Utc};
//! use cabrillo::model::{
//!     contact::{Contact, ContactDraft},
//!     log::{Log, LogDraft, LogHeader, LogOptions},
//! };
//!
//! let contact = Contact::new(ContactDraft {
//!     frequency: "14025".to_string(),
//!     mode: "CW".to_string(),
//!     timestamp: Utc.with_ymd_and_hms(2024, 11, 23, 0, 1, 0).unwrap(),
//!     sent_call: "K1ABC".to_string(),
//!     received_call: "W9XYZ".to_string(),
//!     sent_exchange: vec!["599".to_string(), "5".to_string()],
//!     received_exchange: vec!["599".to_string(), "4".to_string()],
//!     transmitter_id: None,
//!     valid: true,
//! }).expect("contact");
//! let log = Log::new(
//!     LogDraft {
//!         header: LogHeader {
//!             callsign: Some("K1ABC".to_string()),
//!             category_power: Some("LOW".to_string()),
//!             ..LogHeader::default()
//!         },
//!         contacts: vec![contact],
//!         ..LogDraft::default()
//!     },
//!     LogOptions::default(),
//! ).expect("log");
//! assert_eq!(log.to_string(), "<Log for K1ABC>");
//! ```
#![deny(missing_docs)]

/// Pairwise consistency checks between two logs.
pub mod crosscheck;
/// Contact and log records with their encoders.
pub mod model;
/// Contact-line and whole-log decoders.
pub mod parser;
/// Static header keyword, category and mode tables.
pub mod registry;
/// Shared primitive types and enums.
pub mod types;
