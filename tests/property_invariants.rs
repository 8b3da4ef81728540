use chrono::{DateTime, Duration, TimeZone, Utc};
use indexmap::IndexMap;
use proptest::{option, prelude::*, sample::select};

use cabrillo::{
    model::{
        contact::{Contact, ContactDraft},
        log::{Log, LogDraft, LogError, LogHeader, LogOptions},
    },
    parser::{contact::parse_contact, log::parse_log_text, ParseOptions},
    registry::{CATEGORY_BAND, CATEGORY_MODE, CATEGORY_OPERATOR, CATEGORY_POWER},
    types::{Mode, TransmitterId},
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 23, 0, 0, 0).unwrap()
}

fn call() -> impl Strategy<Value = String> {
    "[A-Z0-9]{3,7}"
}

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,10}( [A-Za-z0-9.@-]{1,10}){0,2}"
}

fn frequency() -> impl Strategy<Value = String> {
    prop_oneof![
        "[1-9][0-9]{3,5}",
        select(vec!["50", "144", "1.2G", "LIGHT"]).prop_map(str::to_string),
    ]
}

fn contact_at(minute: i64) -> impl Strategy<Value = Contact> {
    (
        frequency(),
        select(Mode::ALL.to_vec()),
        call(),
        call(),
        (1usize..4).prop_flat_map(|n| {
            (
                prop::collection::vec("[A-Z0-9]{1,4}", n),
                prop::collection::vec("[A-Z0-9]{1,4}", n),
            )
        }),
        option::of(select(vec![TransmitterId::Zero, TransmitterId::One])),
        any::<bool>(),
    )
        .prop_map(
            move |(frequency, mode, sent_call, received_call, (sent, received), t, valid)| {
                Contact::new(ContactDraft {
                    frequency,
                    mode: mode.code().to_string(),
                    timestamp: base() + Duration::minutes(minute),
                    sent_call,
                    received_call,
                    sent_exchange: sent,
                    received_exchange: received,
                    transmitter_id: t,
                    valid,
                })
                .unwrap()
            },
        )
}

fn ordered_contacts() -> impl Strategy<Value = Vec<Contact>> {
    prop::collection::vec(0i64..90, 0..12).prop_flat_map(|mut minutes| {
        minutes.sort_unstable();
        minutes
            .into_iter()
            .map(contact_at)
            .collect::<Vec<_>>()
    })
}

fn header() -> impl Strategy<Value = LogHeader> {
    (
        option::of(call()),
        option::of(text()),
        option::of(select(CATEGORY_POWER).prop_map(str::to_string)),
        option::of(select(CATEGORY_BAND).prop_map(str::to_string)),
        option::of(select(CATEGORY_MODE).prop_map(str::to_string)),
        option::of(select(CATEGORY_OPERATOR).prop_map(str::to_string)),
        option::of(any::<bool>()),
        option::of(0i64..100_000_000),
        prop::collection::vec(call(), 0..4),
        prop::collection::vec(text(), 0..3),
        prop::collection::vec(text(), 0..3),
        option::of(text()),
    )
        .prop_map(
            |(callsign, club, power, band, mode, operator, certificate, score, operators, address, soapbox, created_by)| {
                LogHeader {
                    callsign,
                    club,
                    category_power: power,
                    category_band: band,
                    category_mode: mode,
                    category_operator: operator,
                    certificate,
                    claimed_score: score,
                    operators,
                    address,
                    soapbox,
                    created_by,
                    ..LogHeader::default()
                }
            },
        )
}

fn extensions() -> impl Strategy<Value = IndexMap<String, String>> {
    let value = prop_oneof![1 => Just(String::new()), 3 => text()];
    prop::collection::vec(("X-[A-Z]{1,8}", value), 0..4).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(k, _)| k != "X-QSO")
            .collect()
    })
}

proptest! {
    #[test]
    fn contact_body_decodes_to_same_contact(contact in (0i64..10_000).prop_flat_map(contact_at)) {
        let decoded = parse_contact(&contact.body(), contact.valid).unwrap();
        prop_assert_eq!(decoded, contact);
    }

    #[test]
    fn ordered_log_survives_encode_and_decode(
        header in header(),
        contacts in ordered_contacts(),
        extensions in extensions(),
    ) {
        let log = Log::new(
            LogDraft { header, contacts, extensions },
            LogOptions::default(),
        ).unwrap();

        let text = log.encode().unwrap();
        let decoded = parse_log_text(&text, &ParseOptions::default()).unwrap();

        prop_assert!(log.extensions().values().all(|v| !v.is_empty()));
        prop_assert_eq!(&decoded, &log);
        prop_assert_eq!(decoded.contacts(), log.contacts());
        let order = |l: &Log| l.extensions().keys().cloned().collect::<Vec<_>>();
        prop_assert_eq!(order(&decoded), order(&log));
    }

    #[test]
    fn out_of_order_contacts_are_rejected(minutes in prop::collection::vec(0i64..60, 2..10)) {
        let contacts: Vec<Contact> = minutes
            .iter()
            .map(|m| parse_contact(
                &format!("7005 CW {} K1ABC 599 W9XYZ 599", (base() + Duration::minutes(*m)).format("%Y-%m-%d %H%M")),
                true,
            ).unwrap())
            .collect();
        let sorted = minutes.windows(2).all(|w| w[0] <= w[1]);

        let strict = Log::new(
            LogDraft { contacts: contacts.clone(), ..LogDraft::default() },
            LogOptions::default(),
        );
        prop_assert_eq!(strict.is_ok(), sorted);
        if !sorted {
            prop_assert!(matches!(strict, Err(LogError::OutOfOrder { .. })), "expected ordering error");
        }

        let relaxed = Log::new(
            LogDraft { contacts, ..LogDraft::default() },
            LogOptions { allow_unordered: true, ..LogOptions::default() },
        ).unwrap();
        prop_assert_eq!(relaxed.contacts().len(), minutes.len());
        prop_assert_eq!(relaxed.encode(), Err(LogError::UnorderedOutput));
    }
}
