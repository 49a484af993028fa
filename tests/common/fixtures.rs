//! Static event corpora used across harnesses.
//!
//! Each applog corpus is a `&'static [&'static str]` of JSON-encoded log
//! lines, matching the string shape the capture collaborator delivers.

use eventlens_core::CapturedRecord;
use serde_json::{json, Map, Value};

/// API-call lines in the three common operation families.
pub const CORPUS_OPERATIONS: &[&str] = &[
    r#"{"operation":"/api.x.Auth/Login","time":"2024-01-15T10:00:00.000Z","user":{"id":"u1"},"latency":"23ms"}"#,
    r#"{"operation":"/api.x.Book/GetBook","time":"2024-01-15T10:00:01.000Z","user":{"id":"u1"},"args":{"bookId":"b42"}}"#,
    r#"{"operation":"/api.x.Book/GetChapterContent","time":"2024-01-15T10:00:02.500Z","user":{"id":"u1"},"userAttributes":{"bookId":"b42","chapterId":"c7","path":"/pages/reader"}}"#,
    r#"{"operation":"/api.x.Order/CreateOrder","time":"2024-01-15T10:00:03.000Z","level":"error","user":{"id":"u1"},"failReason":"[method]:\n{\"productId\":\"p9\"}\n[response]:\n{\"code\":500,\"message\":\"upstream unavailable\"}"}"#,
    r#"{"operation":"/api.x.Search/SearchBook","time":"2024-01-15T10:00:04.000Z","user":{"id":"u2"},"args":{"keyword":"dragons"}}"#,
];

/// Published-event and generic-log lines, including unmapped identifiers.
pub const CORPUS_EVENTEVENTS: &[&str] = &[
    r#"{"eventName":"ad_watch_start","time":"2024-01-15T11:00:00.000Z","analysisData":{"ad_type":"rewarded","ad_id":"slot-3"}}"#,
    r#"{"eventName":"ad_watch_end","time":"2024-01-15T11:00:30.000Z","analysisData":{"ad_type":"rewarded","watchtime":30,"is_success":true}}"#,
    r#"{"eventName":"never_seen_before","time":"2024-01-15T11:01:00.000Z"}"#,
    r#"{"msg":"request log","time":"2024-01-15T11:02:00.000Z","level":"info"}"#,
    r#"{"msg":"free-form diagnostic","time":"2024-01-15T11:03:00.000Z"}"#,
];

/// Lines with awkward edges: null-like values, missing times, bad JSON.
pub const CORPUS_EDGE: &[&str] = &[
    r#"{"operation":"/api.x.Auth/Login","user":{"id":""},"reason":"NULL","code":null}"#,
    r#"{"eventName":"book_unlock"}"#,
    r#"{broken json"#,
    r#"{"msg":"tail without anything else"}"#,
];

/// Wrap a corpus of JSON-encoded lines as captured records.
pub fn records_from(corpus: &[&str]) -> Vec<CapturedRecord> {
    corpus.iter().map(|line| CapturedRecord::new(json!(line))).collect()
}

/// A small tracker spreadsheet export: auto events, pay flow, search.
pub fn tracker_rows() -> Vec<Map<String, Value>> {
    [
        json!({"event": "$AppLaunch", "time": 1_705_312_800, "distinct_id": "u1", "page_name": "/pages/home"}),
        json!({"event": "Search_ButtonClick", "time": 1_705_312_860, "distinct_id": "u1", "keyword": "dragons"}),
        json!({"event": "Pay_Process", "time": 1_705_312_920, "distinct_id": "u1",
               "process_type": "create_order", "status": "start", "order_id": "o-1"}),
        json!({"event": "Pay_Process", "time": 1_705_312_930, "distinct_id": "u1",
               "process_type": "pay_callback", "status": "success", "order_id": "o-1", "pay_amount": "9.99"}),
        json!({"event": "UnseenCustomThing", "time": 1_705_312_940, "distinct_id": "u2", "note": "NULL"}),
    ]
    .into_iter()
    .map(|v| v.as_object().cloned().unwrap())
    .collect()
}

/// Generate `n` synthetic operation lines with strictly increasing times.
pub fn synthetic_records(n: usize) -> Vec<CapturedRecord> {
    (0..n)
        .map(|i| {
            let line = json!({
                "operation": "/api.x.Book/GetChapterContent",
                "time": format!("2024-01-15T10:{:02}:{:02}.000Z", (i / 60) % 60, i % 60),
                "user": {"id": format!("u{}", i % 7)},
                "userAttributes": {"bookId": format!("b{}", i % 13), "chapterId": format!("c{i}")},
            });
            CapturedRecord::new(json!(line.to_string()))
        })
        .collect()
}
