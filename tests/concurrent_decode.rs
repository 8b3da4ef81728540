use cabrillo::{
    model::log::Log,
    parser::{log::parse_log_text, ParseOptions},
};

const CQWPX: &str = include_str!("data/CQWPX.log");
const YARC: &str = include_str!("data/YARC.log");

fn generated(call: &str, n: usize) -> String {
    let mut text = format!("START-OF-LOG: 3.0\nCALLSIGN: {call}\n");
    for i in 0..n {
        text.push_str(&format!(
            "QSO: 14025 CW 2024-11-23 {:02}{:02} {call} 599 {} W{i}AW 599 {}\n",
            i / 60 % 24,
            i % 60,
            i + 1,
            i + 7
        ));
    }
    text.push_str("END-OF-LOG:\n");
    text
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_documents_decode_in_parallel() {
    let docs: Vec<String> = (0..16).map(|i| generated(&format!("K{i}ABC"), 200)).collect();

    let mut tasks = Vec::new();
    for doc in docs.clone() {
        tasks.push(tokio::task::spawn_blocking(move || {
            parse_log_text(&doc, &ParseOptions::default())
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        let log = task.await.expect("join").expect("decode");
        assert_eq!(log.header.callsign, Some(format!("K{i}ABC")));
        assert_eq!(log.contacts().len(), 200);
        assert_eq!(log.encode().expect("encode"), {
            let again = parse_log_text(&docs[i], &ParseOptions::default()).expect("decode");
            again.encode().expect("encode")
        });
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shared_options_across_tasks() {
    let opts = ParseOptions {
        ignore_unknown_keyword: true,
        ..ParseOptions::default()
    };

    let a = tokio::spawn(async move { parse_log_text(CQWPX, &opts).map(|l: Log| l.contacts().len()) });
    let b = tokio::spawn(async move { parse_log_text(YARC, &opts).map(|l: Log| l.contacts().len()) });

    let from_task = (a.await.expect("join").expect("cqwpx"), b.await.expect("join").expect("yarc"));
    let inline = (
        parse_log_text(CQWPX, &opts).expect("cqwpx").contacts().len(),
        parse_log_text(YARC, &opts).expect("yarc").contacts().len(),
    );
    assert_eq!(from_task, inline);
}
