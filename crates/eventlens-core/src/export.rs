//! Export projection — flatten events into rows for JSON or CSV output.

use crate::types::NormalizedEvent;
use serde::Serialize;

/// One export row: the tabular subset of an event, with properties folded
/// into a single JSON string column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub index: usize,
    pub time: String,
    pub event: String,
    pub desc: String,
    pub category: String,
    pub level: String,
    pub user_id: String,
    pub page_path: String,
    pub properties: String,
}

impl ExportRow {
    pub fn from_event(event: &NormalizedEvent) -> Self {
        Self {
            index: event.index,
            time: event.time.clone(),
            event: event.event.clone(),
            desc: event.desc.clone(),
            category: event.category.label().to_string(),
            level: event.level.clone().unwrap_or_default(),
            user_id: event.user_id.clone(),
            page_path: event.page_path.clone(),
            properties: serde_json::to_string(&event.properties).unwrap_or_default(),
        }
    }
}

pub fn project<'a, I>(events: I) -> Vec<ExportRow>
where
    I: IntoIterator<Item = &'a NormalizedEvent>,
{
    events.into_iter().map(ExportRow::from_event).collect()
}

/// Serialize rows as a JSON array, optionally pretty-printed.
pub fn to_json(rows: &[ExportRow], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(rows)
    } else {
        serde_json::to_string(rows)
    }
}

/// Serialize rows as CSV with a header line. Fields containing commas,
/// quotes, or newlines are quoted with doubled inner quotes.
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from("index,time,event,desc,category,level,userId,pagePath,properties\n");
    for row in rows {
        let fields = [
            row.index.to_string(),
            row.time.clone(),
            row.event.clone(),
            row.desc.clone(),
            row.category.clone(),
            row.level.clone(),
            row.user_id.clone(),
            row.page_path.clone(),
            row.properties.clone(),
        ];
        let line: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
