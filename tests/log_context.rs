//! Caller identifiers on feed log lines under concurrent requests.
//!
//! Installs the production JSON formatter as the global subscriber, writing
//! into memory, and reads the `uid` of the `mdc` span off each formatted line.

use std::io;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use reactive_feed::observability::logging::json_layer;

mod common;

#[derive(Clone, Default)]
struct Lines(Arc<Mutex<Vec<u8>>>);

impl io::Write for Lines {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Lines {
    type Writer = Lines;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Lines {
    fn parsed(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

fn message(line: &Value) -> &str {
    line["fields"]["message"].as_str().unwrap_or_default()
}

fn uids(line: &Value) -> Vec<&str> {
    line["spans"]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|span| span["name"] == "mdc")
        .filter_map(|span| span["uid"].as_str())
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_keep_their_own_uid() {
    let lines = Lines::default();
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(json_layer(lines.clone())),
    )
    .expect("global subscriber already set");

    let store = common::seeded_store();
    let mut tasks = Vec::new();
    for n in 0..12u32 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            let uid = format!("caller-{n}");
            let price = format!("{}", 10 + n * 7);
            let (status, items) = common::restaurants(common::app(store), &uid, &price).await;
            assert_eq!(status, StatusCode::OK);
            (uid, price, items.len())
        }));
    }

    let mut results = Vec::new();
    for task in tasks {
        results.push(task.await.unwrap());
    }

    let lines = lines.parsed();

    for (uid, price, count) in &results {
        let tagged: Vec<_> = lines
            .iter()
            .filter(|line| uids(line) == [uid.as_str()])
            .collect();

        let starts: Vec<_> = tagged
            .iter()
            .filter(|line| message(line).starts_with("finding restaurant"))
            .collect();
        assert_eq!(starts.len(), 1, "{uid}");
        let expected_start = format!(
            "finding restaurant having price lower than ${:.2} for {}",
            price.parse::<f64>().unwrap(),
            uid
        );
        assert_eq!(message(starts[0]), expected_start);

        let found = tagged
            .iter()
            .filter(|line| message(line).starts_with("found restaurant"))
            .count();
        assert_eq!(found, *count, "{uid}");
        assert_eq!(tagged.len(), count + 1, "{uid}");
    }

    // Every feed line carries exactly one identifier; nothing else carries any.
    for line in &lines {
        let is_feed_line = message(line).starts_with("finding restaurant")
            || message(line).starts_with("found restaurant");
        let expected = if is_feed_line { 1 } else { 0 };
        assert_eq!(uids(line).len(), expected, "{line}");
    }
}
