use chrono::{TimeZone, Utc};

use cabrillo::{
    model::contact::ContactError,
    parser::contact::parse_contact,
    types::{Mode, TransmitterId},
};

#[test]
fn cqwpx_single_transmitter() {
    let qso = parse_contact("7005 CW 2009-05-30 0002 AA1ZZZ 599 1 S50A 599 4", true).unwrap();

    assert_eq!(qso.frequency, "7005");
    assert_eq!(qso.mode, Mode::CW);
    assert_eq!(qso.timestamp, Utc.with_ymd_and_hms(2009, 5, 30, 0, 2, 0).unwrap());
    assert_eq!(qso.sent_call, "AA1ZZZ");
    assert_eq!(qso.sent_exchange, vec!["599", "1"]);
    assert_eq!(qso.received_call, "S50A");
    assert_eq!(qso.received_exchange, vec!["599", "4"]);
    assert_eq!(qso.transmitter_id, None);
    assert!(qso.valid);
}

#[test]
fn cqwpx_two_transmitters_with_padding() {
    let line = "3799 PH 1999-03-06 0711 HC8N          59  001    W1AW 59  001    0";
    let qso = parse_contact(line, false).unwrap();

    assert_eq!(qso.frequency, "3799");
    assert_eq!(qso.mode, Mode::PH);
    assert_eq!(qso.timestamp, Utc.with_ymd_and_hms(1999, 3, 6, 7, 11, 0).unwrap());
    assert_eq!(qso.sent_call, "HC8N");
    assert_eq!(qso.sent_exchange, vec!["59", "001"]);
    assert_eq!(qso.received_call, "W1AW");
    assert_eq!(qso.received_exchange, vec!["59", "001"]);
    assert_eq!(qso.transmitter_id, Some(TransmitterId::Zero));
    assert!(!qso.valid);
}

#[test]
fn uneven_exchange_is_rejected() {
    assert_eq!(
        parse_contact("7005 CW 2009-05-30 0002 AA1ZZZ 599 CT 001 S50A 599 004", true),
        Err(ContactError::UnevenExchange { count: 7 })
    );
    // odd count whose last token is not a transmitter id
    assert_eq!(
        parse_contact("7005 CW 2009-05-30 0002 AA1ZZZ 599 CT 001 S50A 599 3", false),
        Err(ContactError::UnevenExchange { count: 7 })
    );
}

#[test]
fn single_token_exchange() {
    let qso = parse_contact("7005 CW 2009-05-30 0002 AA1ZZZ 599 S50A 599", true).unwrap();
    assert_eq!(qso.sent_exchange, vec!["599"]);
    assert_eq!(qso.received_exchange, vec!["599"]);

    let qso = parse_contact("7005 CW 2009-05-30 0002 AA1ZZZ 599 S50A 599 1", false).unwrap();
    assert_eq!(qso.transmitter_id, Some(TransmitterId::One));
    assert_eq!(qso.received_call, "S50A");
}

#[test]
fn too_few_components_reports_count() {
    assert_eq!(
        parse_contact("7005 CW 2009-05-30 1230 S50A", true),
        Err(ContactError::TooFewComponents { count: 5 })
    );
    assert_eq!(
        parse_contact("", true),
        Err(ContactError::TooFewComponents { count: 0 })
    );
}

#[test]
fn yarc_multi_field_exchange() {
    let line = "14000 PH 2018-12-01 1640 W4Y  16 VA     W2Y        19 NY";
    let qso = parse_contact(line, true).unwrap();

    assert_eq!(qso.frequency, "14000");
    assert_eq!(qso.timestamp, Utc.with_ymd_and_hms(2018, 12, 1, 16, 40, 0).unwrap());
    assert_eq!(qso.sent_call, "W4Y");
    assert_eq!(qso.sent_exchange, vec!["16", "VA"]);
    assert_eq!(qso.received_call, "W2Y");
    assert_eq!(qso.received_exchange, vec!["19", "NY"]);
    assert_eq!(qso.transmitter_id, None);
}

#[test]
fn long_form_modes_are_normalized() {
    let qso = parse_contact("14250 SSB 2018-12-01 1640 W4Y 59 VA W2Y 59 NY", true).unwrap();
    assert_eq!(qso.mode, Mode::PH);

    let qso = parse_contact("7040 rtty 2018-12-01 1640 W4Y 599 VA W2Y 599 NY", true).unwrap();
    assert_eq!(qso.mode, Mode::RY);

    let qso = parse_contact("14074 FT8 2018-12-01 1640 W4Y FN20 W2Y FN31", true).unwrap();
    assert_eq!(qso.mode, Mode::DG);
}

#[test]
fn unmapped_mode_is_rejected() {
    assert_eq!(
        parse_contact("7005 MCW 2009-05-30 0002 AA1ZZZ 599 1 S50A 599 4", true),
        Err(ContactError::InvalidMode {
            mode: "MCW".to_string()
        })
    );
}

#[test]
fn malformed_timestamp_is_rejected() {
    assert_eq!(
        parse_contact("7005 CW 2009-13-30 0002 AA1ZZZ 599 1 S50A 599 4", true),
        Err(ContactError::InvalidTimestamp {
            text: "2009-13-30 0002".to_string()
        })
    );
    assert!(matches!(
        parse_contact("7005 CW 2009-05-30 00:02 AA1ZZZ 599 1 S50A 599 4", true),
        Err(ContactError::InvalidTimestamp { .. })
    ));
}

#[test]
fn encoded_body_decodes_to_same_contact() {
    for (line, valid) in [
        ("7005 CW 2009-05-30 0002 AA1ZZZ 599 1 S50A 599 4", true),
        ("3799 PH 1999-03-06 0711 HC8N 59 001 W1AW 59 001 0", false),
        ("LIGHT DG 2020-01-01 2359 N0CALL EM48 W9ABC EN52 1", true),
    ] {
        let qso = parse_contact(line, valid).unwrap();
        assert_eq!(qso.body(), line);
        assert_eq!(parse_contact(&qso.body(), qso.valid).unwrap(), qso);
    }
}

#[test]
fn line_prefix_follows_validity() {
    let qso = parse_contact("7005 CW 2009-05-30 0002 AA1ZZZ 599 1 S50A 599 4", false).unwrap();
    assert_eq!(
        qso.to_line(),
        "X-QSO: 7005 CW 2009-05-30 0002 AA1ZZZ 599 1 S50A 599 4"
    );
}

#[test]
fn uneven_exchanges_decode_differently() {
    let qso = cabrillo::model::contact::Contact::new(cabrillo::model::contact::ContactDraft {
        frequency: "7005".to_string(),
        mode: "CW".to_string(),
        timestamp: Utc.with_ymd_and_hms(2009, 5, 30, 0, 2, 0).unwrap(),
        sent_call: "A1A".to_string(),
        received_call: "B1B".to_string(),
        sent_exchange: vec!["599".to_string()],
        received_exchange: vec!["599".to_string(), "1".to_string()],
        transmitter_id: None,
        valid: true,
    })
    .unwrap();
    assert_eq!(qso.body(), "7005 CW 2009-05-30 0002 A1A 599 B1B 599 1");

    let decoded = parse_contact(&qso.body(), true).unwrap();
    assert_eq!(decoded.received_exchange, vec!["599"]);
    assert_eq!(decoded.transmitter_id, Some(TransmitterId::One));
    assert_ne!(decoded, qso);
}
