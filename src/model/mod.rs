//! Contact and log records.

/// Single contact record, its draft and the match predicate.
pub mod contact;
/// Whole-log record, header fields and the text encoder.
pub mod log;
