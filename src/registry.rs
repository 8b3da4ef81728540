//! Static field registry: header keywords, output order and category tables.
//!
//! Both the decoder and the encoder read from here. The decoder derives its
//! keyword lookup from [`Field::ALL`] rather than keeping a second table.

use crate::types::Mode;

/// Keyword opening a log; its value is the format version.
pub const START_OF_LOG: &str = "START-OF-LOG";
/// Keyword closing a log.
pub const END_OF_LOG: &str = "END-OF-LOG";
/// Keyword introducing a scored contact.
pub const QSO_KEYWORD: &str = "QSO";
/// Keyword introducing an excluded contact.
pub const X_QSO_KEYWORD: &str = "X-QSO";
/// Prefix marking an extension keyword that is passed through uninterpreted.
pub const EXTENSION_PREFIX: &str = "X-";
/// The only supported format version.
pub const SUPPORTED_VERSION: &str = "3.0";
/// Created-by tag written when a log does not carry one.
pub const DEFAULT_CREATED_BY: &str = "cabrillo (Rust)";

/// Valid `CATEGORY-ASSISTED` values.
pub const CATEGORY_ASSISTED: &[&str] = &["ASSISTED", "NON-ASSISTED"];
/// Valid `CATEGORY-BAND` values.
pub const CATEGORY_BAND: &[&str] = &[
    "ALL",
    "160M",
    "80M",
    "40M",
    "20M",
    "15M",
    "10M",
    "6M",
    "4M",
    "2M",
    "222",
    "432",
    "902",
    "1.2G",
    "2.3G",
    "3.4G",
    "5.7G",
    "10G",
    "24G",
    "47G",
    "75G",
    "123G",
    "134G",
    "241G",
    "LIGHT",
    "VHF-3-BAND",
    "VHF-FM-ONLY",
];
/// Valid `CATEGORY-MODE` values.
pub const CATEGORY_MODE: &[&str] = &["SSB", "CW", "RTTY", "FM", "MIXED"];
/// Valid `CATEGORY-OPERATOR` values.
pub const CATEGORY_OPERATOR: &[&str] = &["SINGLE-OP", "MULTI-OP", "CHECKLOG"];
/// Valid `CATEGORY-POWER` values.
pub const CATEGORY_POWER: &[&str] = &["HIGH", "LOW", "QRP"];
/// Valid `CATEGORY-STATION` values.
pub const CATEGORY_STATION: &[&str] = &[
    "FIXED",
    "MOBILE",
    "PORTABLE",
    "ROVER",
    "ROVER-LIMITED",
    "ROVER-UNLIMITED",
    "EXPEDITION",
    "HQ",
    "SCHOOL",
];
/// Valid `CATEGORY-TIME` values.
pub const CATEGORY_TIME: &[&str] = &["6-HOURS", "12-HOURS", "24-HOURS"];
/// Valid `CATEGORY-TRANSMITTER` values.
pub const CATEGORY_TRANSMITTER: &[&str] = &["ONE", "TWO", "LIMITED", "UNLIMITED", "SWL"];
/// Valid `CATEGORY-OVERLAY` values.
pub const CATEGORY_OVERLAY: &[&str] = &["CLASSIC", "ROOKIE", "TB-WIRES", "NOVICE-TECH", "OVER-50"];

/// Valid contact mode codes.
pub const MODES: [Mode; 5] = Mode::ALL;

/// Recognized header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `START-OF-LOG`.
    Version,
    /// `CALLSIGN`.
    Callsign,
    /// `OPERATORS`.
    Operators,
    /// `CONTEST`.
    Contest,
    /// `CLAIMED-SCORE`.
    ClaimedScore,
    /// `CERTIFICATE`.
    Certificate,
    /// `CATEGORY-OPERATOR`.
    CategoryOperator,
    /// `CATEGORY-ASSISTED`.
    CategoryAssisted,
    /// `CATEGORY-BAND`.
    CategoryBand,
    /// `CATEGORY-POWER`.
    CategoryPower,
    /// `CATEGORY-MODE`.
    CategoryMode,
    /// `CATEGORY-STATION`.
    CategoryStation,
    /// `CATEGORY-TIME`.
    CategoryTime,
    /// `CATEGORY-TRANSMITTER`.
    CategoryTransmitter,
    /// `CATEGORY-OVERLAY`.
    CategoryOverlay,
    /// `OFFTIME`.
    OffTime,
    /// `CLUB`.
    Club,
    /// `NAME`.
    Name,
    /// `EMAIL`.
    Email,
    /// `LOCATION`.
    Location,
    /// `ADDRESS`, one line per occurrence.
    Address,
    /// `ADDRESS-CITY`.
    AddressCity,
    /// `ADDRESS-STATE-PROVINCE`.
    AddressStateProvince,
    /// `ADDRESS-POSTALCODE`.
    AddressPostalcode,
    /// `ADDRESS-COUNTRY`.
    AddressCountry,
    /// `CREATED-BY`.
    CreatedBy,
    /// `SOAPBOX`, one line per occurrence.
    Soapbox,
}

impl Field {
    /// Every header field in output order.
    pub const ALL: [Field; 27] = [
        Field::Version,
        Field::Callsign,
        Field::Operators,
        Field::Contest,
        Field::ClaimedScore,
        Field::Certificate,
        Field::CategoryOperator,
        Field::CategoryAssisted,
        Field::CategoryBand,
        Field::CategoryPower,
        Field::CategoryMode,
        Field::CategoryStation,
        Field::CategoryTime,
        Field::CategoryTransmitter,
        Field::CategoryOverlay,
        Field::OffTime,
        Field::Club,
        Field::Name,
        Field::Email,
        Field::Location,
        Field::Address,
        Field::AddressCity,
        Field::AddressStateProvince,
        Field::AddressPostalcode,
        Field::AddressCountry,
        Field::CreatedBy,
        Field::Soapbox,
    ];

    /// Wire keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            Field::Version => START_OF_LOG,
            Field::Callsign => "CALLSIGN",
            Field::Operators => "OPERATORS",
            Field::Contest => "CONTEST",
            Field::ClaimedScore => "CLAIMED-SCORE",
            Field::Certificate => "CERTIFICATE",
            Field::CategoryOperator => "CATEGORY-OPERATOR",
            Field::CategoryAssisted => "CATEGORY-ASSISTED",
            Field::CategoryBand => "CATEGORY-BAND",
            Field::CategoryPower => "CATEGORY-POWER",
            Field::CategoryMode => "CATEGORY-MODE",
            Field::CategoryStation => "CATEGORY-STATION",
            Field::CategoryTime => "CATEGORY-TIME",
            Field::CategoryTransmitter => "CATEGORY-TRANSMITTER",
            Field::CategoryOverlay => "CATEGORY-OVERLAY",
            Field::OffTime => "OFFTIME",
            Field::Club => "CLUB",
            Field::Name => "NAME",
            Field::Email => "EMAIL",
            Field::Location => "LOCATION",
            Field::Address => "ADDRESS",
            Field::AddressCity => "ADDRESS-CITY",
            Field::AddressStateProvince => "ADDRESS-STATE-PROVINCE",
            Field::AddressPostalcode => "ADDRESS-POSTALCODE",
            Field::AddressCountry => "ADDRESS-COUNTRY",
            Field::CreatedBy => "CREATED-BY",
            Field::Soapbox => "SOAPBOX",
        }
    }

    /// In-memory attribute name, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::Callsign => "callsign",
            Field::Operators => "operators",
            Field::Contest => "contest",
            Field::ClaimedScore => "claimed_score",
            Field::Certificate => "certificate",
            Field::CategoryOperator => "category_operator",
            Field::CategoryAssisted => "category_assisted",
            Field::CategoryBand => "category_band",
            Field::CategoryPower => "category_power",
            Field::CategoryMode => "category_mode",
            Field::CategoryStation => "category_station",
            Field::CategoryTime => "category_time",
            Field::CategoryTransmitter => "category_transmitter",
            Field::CategoryOverlay => "category_overlay",
            Field::OffTime => "offtime",
            Field::Club => "club",
            Field::Name => "name",
            Field::Email => "email",
            Field::Location => "location",
            Field::Address => "address",
            Field::AddressCity => "address_city",
            Field::AddressStateProvince => "address_state_province",
            Field::AddressPostalcode => "address_postalcode",
            Field::AddressCountry => "address_country",
            Field::CreatedBy => "created_by",
            Field::Soapbox => "soapbox",
        }
    }

    /// True for fields that repeat, one line per entry.
    pub const fn is_multi_line(self) -> bool {
        matches!(self, Field::Address | Field::Soapbox)
    }

    /// The category this field carries, if it is one of the nine category fields.
    pub const fn category(self) -> Option<Category> {
        match self {
            Field::CategoryAssisted => Some(Category::Assisted),
            Field::CategoryBand => Some(Category::Band),
            Field::CategoryMode => Some(Category::Mode),
            Field::CategoryOperator => Some(Category::Operator),
            Field::CategoryPower => Some(Category::Power),
            Field::CategoryStation => Some(Category::Station),
            Field::CategoryTime => Some(Category::Time),
            Field::CategoryTransmitter => Some(Category::Transmitter),
            Field::CategoryOverlay => Some(Category::Overlay),
            _ => None,
        }
    }
}

/// One of the nine enumerated category fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Assisted status.
    Assisted,
    /// Band.
    Band,
    /// Mode.
    Mode,
    /// Operator count.
    Operator,
    /// Power level.
    Power,
    /// Station type.
    Station,
    /// Operating time.
    Time,
    /// Transmitter count.
    Transmitter,
    /// Overlay.
    Overlay,
}

impl Category {
    /// Every category, in validation order.
    pub const ALL: [Category; 9] = [
        Category::Assisted,
        Category::Band,
        Category::Mode,
        Category::Operator,
        Category::Power,
        Category::Station,
        Category::Time,
        Category::Transmitter,
        Category::Overlay,
    ];

    /// Header field carrying this category.
    pub const fn field(self) -> Field {
        match self {
            Category::Assisted => Field::CategoryAssisted,
            Category::Band => Field::CategoryBand,
            Category::Mode => Field::CategoryMode,
            Category::Operator => Field::CategoryOperator,
            Category::Power => Field::CategoryPower,
            Category::Station => Field::CategoryStation,
            Category::Time => Field::CategoryTime,
            Category::Transmitter => Field::CategoryTransmitter,
            Category::Overlay => Field::CategoryOverlay,
        }
    }

    /// Values allowed for this category.
    pub const fn allowed(self) -> &'static [&'static str] {
        match self {
            Category::Assisted => CATEGORY_ASSISTED,
            Category::Band => CATEGORY_BAND,
            Category::Mode => CATEGORY_MODE,
            Category::Operator => CATEGORY_OPERATOR,
            Category::Power => CATEGORY_POWER,
            Category::Station => CATEGORY_STATION,
            Category::Time => CATEGORY_TIME,
            Category::Transmitter => CATEGORY_TRANSMITTER,
            Category::Overlay => CATEGORY_OVERLAY,
        }
    }

    /// True if `value` is one of [`Category::allowed`].
    pub fn accepts(self, value: &str) -> bool {
        self.allowed().contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_unique_and_not_extensions() {
        let mut seen = hashbrown::HashSet::new();
        for field in Field::ALL {
            assert!(seen.insert(field.keyword()), "duplicate {}", field.keyword());
            assert!(!field.keyword().starts_with(EXTENSION_PREFIX));
        }
    }

    #[test]
    fn categories_round_trip_through_fields() {
        for category in Category::ALL {
            assert_eq!(category.field().category(), Some(category));
        }
        assert_eq!(Field::Club.category(), None);
    }
}
