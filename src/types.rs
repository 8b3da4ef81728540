//! Shared primitive enums: emission modes, amateur bands and transmitter ids.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Two-letter emission mode code carried on every contact line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Continuous Wave.
    CW,
    /// Phone (SSB, AM and other voice modes).
    PH,
    /// Frequency modulated phone.
    FM,
    /// Radioteletype.
    RY,
    /// Any other digital mode.
    DG,
}

/// Long-form mode names accepted on input and the code they collapse to.
const LONG_FORM_MODES: &[(&str, Mode)] = &[
    ("SSB", Mode::PH),
    ("USB", Mode::PH),
    ("LSB", Mode::PH),
    ("AM", Mode::PH),
    ("PHONE", Mode::PH),
    ("RTTY", Mode::RY),
    ("FSK", Mode::RY),
    ("FT8", Mode::DG),
    ("FT4", Mode::DG),
    ("PSK", Mode::DG),
    ("PSK31", Mode::DG),
    ("PSK63", Mode::DG),
    ("JT65", Mode::DG),
    ("JT9", Mode::DG),
    ("MFSK", Mode::DG),
    ("OLIVIA", Mode::DG),
    ("DIGI", Mode::DG),
    ("DATA", Mode::DG),
];

impl Mode {
    /// Every valid mode code, in wire order.
    pub const ALL: [Mode; 5] = [Mode::CW, Mode::PH, Mode::FM, Mode::RY, Mode::DG];

    /// Wire code for this mode.
    pub const fn code(self) -> &'static str {
        match self {
            Mode::CW => "CW",
            Mode::PH => "PH",
            Mode::FM => "FM",
            Mode::RY => "RY",
            Mode::DG => "DG",
        }
    }

    /// Exact lookup of a two-letter wire code.
    pub fn from_code(code: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.code() == code)
    }

    /// Resolves a wire code or a common long-form mode name such as `SSB` or `FT8`.
    ///
    /// Matching is case-insensitive. Returns `None` for tokens with no mapping
    /// (for example `MCW`).
    pub fn normalize(token: &str) -> Option<Mode> {
        let upper = token.trim().to_ascii_uppercase();
        Mode::from_code(&upper).or_else(|| {
            LONG_FORM_MODES
                .iter()
                .find(|(name, _)| *name == upper)
                .map(|(_, mode)| *mode)
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Transmitter discriminator used by two-transmitter categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransmitterId {
    /// Transmitter `0`.
    Zero,
    /// Transmitter `1`.
    One,
}

impl TransmitterId {
    /// Parses the trailing contact-line token; only `0` and `1` are accepted.
    pub fn from_token(token: &str) -> Option<TransmitterId> {
        match token {
            "0" => Some(TransmitterId::Zero),
            "1" => Some(TransmitterId::One),
            _ => None,
        }
    }

    /// Wire token for this transmitter.
    pub const fn token(self) -> &'static str {
        match self {
            TransmitterId::Zero => "0",
            TransmitterId::One => "1",
        }
    }
}

/// Amateur band bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// 160 meters.
    B160m,
    /// 80 meters.
    B80m,
    /// 60 meters.
    B60m,
    /// 40 meters.
    B40m,
    /// 30 meters.
    B30m,
    /// 20 meters.
    B20m,
    /// 17 meters.
    B17m,
    /// 15 meters.
    B15m,
    /// 12 meters.
    B12m,
    /// 10 meters.
    B10m,
    /// 6 meters (`50`).
    B6m,
    /// 4 meters (`70`).
    B4m,
    /// 2 meters (`144`).
    B2m,
    /// 1.25 meters (`222`).
    B222,
    /// 70 centimeters (`432`).
    B432,
    /// 33 centimeters (`902`).
    B902,
    /// 23 centimeters (`1.2G`).
    B1_2G,
    /// 13 centimeters (`2.3G`).
    B2_3G,
    /// 9 centimeters (`3.4G`).
    B3_4G,
    /// 6 centimeters (`5.7G`).
    B5_7G,
    /// 3 centimeters (`10G`).
    B10G,
    /// 1.2 centimeters (`24G`).
    B24G,
    /// 6 millimeters (`47G`).
    B47G,
    /// 4 millimeters (`75G`).
    B75G,
    /// 2.5 millimeters (`123G`).
    B123G,
    /// 2 millimeters (`134G`).
    B134G,
    /// 1 millimeter (`241G`).
    B241G,
    /// Light (laser and optical contacts).
    Light,
}

/// Inclusive kHz edges of each band.
const BAND_RANGES_KHZ: &[(f64, f64, Band)] = &[
    (1_800.0, 2_000.0, Band::B160m),
    (3_500.0, 4_000.0, Band::B80m),
    (5_330.0, 5_410.0, Band::B60m),
    (7_000.0, 7_300.0, Band::B40m),
    (10_100.0, 10_150.0, Band::B30m),
    (14_000.0, 14_350.0, Band::B20m),
    (18_068.0, 18_168.0, Band::B17m),
    (21_000.0, 21_450.0, Band::B15m),
    (24_890.0, 24_990.0, Band::B12m),
    (28_000.0, 29_700.0, Band::B10m),
    (50_000.0, 54_000.0, Band::B6m),
    (70_000.0, 71_000.0, Band::B4m),
    (144_000.0, 148_000.0, Band::B2m),
    (222_000.0, 225_000.0, Band::B222),
    (420_000.0, 450_000.0, Band::B432),
    (902_000.0, 928_000.0, Band::B902),
    (1_240_000.0, 1_300_000.0, Band::B1_2G),
    (2_300_000.0, 2_450_000.0, Band::B2_3G),
    (3_300_000.0, 3_500_000.0, Band::B3_4G),
    (5_650_000.0, 5_925_000.0, Band::B5_7G),
    (10_000_000.0, 10_500_000.0, Band::B10G),
    (24_000_000.0, 24_250_000.0, Band::B24G),
    (47_000_000.0, 47_200_000.0, Band::B47G),
    (75_500_000.0, 81_000_000.0, Band::B75G),
    (122_250_000.0, 123_000_000.0, Band::B123G),
    (134_000_000.0, 141_000_000.0, Band::B134G),
    (241_000_000.0, 250_000_000.0, Band::B241G),
];

/// Band designators written in place of a kHz frequency above 30 MHz.
const BAND_DESIGNATORS: &[(&str, Band)] = &[
    ("50", Band::B6m),
    ("70", Band::B4m),
    ("144", Band::B2m),
    ("222", Band::B222),
    ("432", Band::B432),
    ("902", Band::B902),
    ("1.2G", Band::B1_2G),
    ("2.3G", Band::B2_3G),
    ("3.4G", Band::B3_4G),
    ("5.7G", Band::B5_7G),
    ("10G", Band::B10G),
    ("24G", Band::B24G),
    ("47G", Band::B47G),
    ("75G", Band::B75G),
    ("123G", Band::B123G),
    ("134G", Band::B134G),
    ("241G", Band::B241G),
    ("LIGHT", Band::Light),
];

impl Band {
    /// Resolves a contact frequency field to a band.
    ///
    /// Designators (`144`, `1.2G`, `LIGHT`, ...) win over numeric lookup, so `50`
    /// is six meters rather than 50 kHz. Numeric values are read as kHz.
    pub fn from_frequency(frequency: &str) -> Option<Band> {
        let freq = frequency.trim();
        if let Some((_, band)) = BAND_DESIGNATORS
            .iter()
            .find(|(designator, _)| designator.eq_ignore_ascii_case(freq))
        {
            return Some(*band);
        }
        let khz = parse_khz(freq)?;
        BAND_RANGES_KHZ
            .iter()
            .find(|(lo, hi, _)| (*lo..=*hi).contains(&khz))
            .map(|(_, _, band)| *band)
    }

    /// Short label used in category tables (`20M`, `2M`, `1.2G`, `LIGHT`).
    pub const fn label(self) -> &'static str {
        match self {
            Band::B160m => "160M",
            Band::B80m => "80M",
            Band::B60m => "60M",
            Band::B40m => "40M",
            Band::B30m => "30M",
            Band::B20m => "20M",
            Band::B17m => "17M",
            Band::B15m => "15M",
            Band::B12m => "12M",
            Band::B10m => "10M",
            Band::B6m => "6M",
            Band::B4m => "4M",
            Band::B2m => "2M",
            Band::B222 => "222",
            Band::B432 => "432",
            Band::B902 => "902",
            Band::B1_2G => "1.2G",
            Band::B2_3G => "2.3G",
            Band::B3_4G => "3.4G",
            Band::B5_7G => "5.7G",
            Band::B10G => "10G",
            Band::B24G => "24G",
            Band::B47G => "47G",
            Band::B75G => "75G",
            Band::B123G => "123G",
            Band::B134G => "134G",
            Band::B241G => "241G",
            Band::Light => "LIGHT",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tolerance for frequencies that fall outside every known band.
pub const OUT_OF_BAND_TOLERANCE_KHZ: f64 = 500.0;

/// Reads a frequency field as kHz, rejecting NaN and infinities.
pub(crate) fn parse_khz(frequency: &str) -> Option<f64> {
    frequency
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|khz| khz.is_finite())
}

/// True when two frequency fields plausibly describe the same band.
///
/// Both fields resolving to a band must agree. Otherwise two numeric fields match
/// within [`OUT_OF_BAND_TOLERANCE_KHZ`], and anything else must be textually equal.
pub fn bands_compatible(a: &str, b: &str) -> bool {
    match (Band::from_frequency(a), Band::from_frequency(b)) {
        (Some(x), Some(y)) => x == y,
        _ => match (parse_khz(a), parse_khz(b)) {
            (Some(x), Some(y)) => (x - y).abs() <= OUT_OF_BAND_TOLERANCE_KHZ,
            _ => a.trim().eq_ignore_ascii_case(b.trim()),
        },
    }
}
