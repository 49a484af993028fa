//! Detail extraction — renderable labeled fields for a single event.
//!
//! Pure functions from a [`NormalizedEvent`] to an ordered list of
//! [`DetailField`]s. Each source has its own block sequence; a block is
//! emitted only when its source data is present. No side effects, no
//! mutation of the event.

use crate::taxonomy::{PAY_PROCESS_STATUS, PAY_PROCESS_TYPES};
use crate::types::{NormalizedEvent, SectionBody};
use serde::Serialize;
use serde_json::Value;

/// Nested objects deeper than this collapse to a placeholder node.
const MAX_TREE_DEPTH: usize = 3;

/// One labeled detail field: an icon, a label, a text or tree value, and an
/// optional payload for copy-to-clipboard style consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailField {
    pub icon: &'static str,
    pub label: String,
    pub value: DetailValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailValue {
    Text(String),
    Tree(Vec<TreeNode>),
}

/// One node of a collapsible tree rendering of a JSON value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: Some(value.into()), children: Vec::new() }
    }

    fn branch(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self { label: label.into(), value: None, children }
    }

    fn collapsed(label: impl Into<String>) -> Self {
        Self::leaf(label, "…")
    }
}

fn field(icon: &'static str, label: &str, value: impl Into<String>) -> DetailField {
    DetailField { icon, label: label.to_string(), value: DetailValue::Text(value.into()), copy: None }
}

/// Detail blocks for an applog event, in display order. Error-level fields
/// lead; the structured `[method]`/`[response]`/`[error]` trees follow the
/// contextual blocks; raw args appear only when no structured block did.
pub fn applog_detail(event: &NormalizedEvent) -> Vec<DetailField> {
    let mut fields = Vec::new();
    let p = |key: &str| prop_text(event, key);

    if event.level.as_deref() == Some("ERROR") {
        if let Some(code) = p("code") {
            fields.push(field("❗", "Error code", code));
        }
        if let Some(reason) = p("reason") {
            fields.push(field("📝", "Error reason", reason));
        }
        if let Some(stack) = p("stack") {
            let mut f = field("📚", "Stack trace", stack.clone());
            f.copy = Some(stack);
            fields.push(f);
        }
    }

    if let Some(latency) = p("latency") {
        fields.push(field("⏱️", "Latency", latency));
    }

    if let Some(user_id) = p("userId") {
        fields.push(field("👤", "User", user_id));
    } else if let Some(open_id) = p("openId") {
        fields.push(field("👤", "Open ID", open_id));
    }

    if let Some(os) = p("os") {
        let version = p("osVersion").unwrap_or_default();
        fields.push(field("📱", "OS", format!("{os} {version}").trim_end().to_string()));
    }
    if let Some(model) = p("deviceModel") {
        let value = match p("deviceManufacturer") {
            Some(maker) => format!("{maker} {model}"),
            None => model,
        };
        fields.push(field("📱", "Device", value));
    }
    if let Some(browser) = p("browser") {
        let version = p("browserVersion").unwrap_or_default();
        fields.push(field("🌐", "Browser", format!("{browser} {version}").trim_end().to_string()));
    }
    if let Some(network) = p("networkType") {
        fields.push(field("📶", "Network", network));
    }

    // Launch path only makes sense on the login call.
    if event.event == "/api.x.Auth/Login" {
        if !event.page_path.is_empty() {
            fields.push(field("🛬", "Launch path", event.page_path.clone()));
        }
        if let Some(from) = p("fromType") {
            fields.push(field("🎯", "Acquisition", from));
        }
        if let Some(link) = p("linkId") {
            fields.push(field("🔗", "Link", link));
        }
    }

    if let Some(name) = p("miniAppName") {
        let id = p("miniAppId").or_else(|| p("miniAppKey")).unwrap_or_default();
        let value = if id.is_empty() { name } else { format!("{name} ({id})") };
        fields.push(field("📦", "Mini app", value));
    }

    if let Some(book) = p("bookName").or_else(|| p("bookId")) {
        fields.push(field("📖", "Book", book));
    }
    if let Some(chapter) = p("chapterId") {
        fields.push(field("📑", "Chapter", chapter));
    }

    if let Some(ad_type) = p("adType") {
        let value = match p("adId") {
            Some(id) => format!("{ad_type} ({id})"),
            None => ad_type,
        };
        fields.push(field("📺", "Ad", value));
    }
    if let Some(watchtime) = p("watchtime") {
        fields.push(field("⏱️", "Watch time", watchtime));
    }

    if let Some(success) = event.properties.get("isSuccess").and_then(Value::as_bool) {
        fields.push(field(
            if success { "✅" } else { "❌" },
            "Result",
            if success { "success" } else { "failure" },
        ));
    }

    let structured = structured_blocks(event);
    let had_structured = !structured.is_empty();
    fields.extend(structured);

    if !had_structured {
        if let Some(args) = event.properties.get("args") {
            fields.push(DetailField {
                icon: "📥",
                label: "Arguments".to_string(),
                value: DetailValue::Tree(json_tree(args, 0)),
                copy: serde_json::to_string_pretty(args).ok(),
            });
        }
    }

    if let Some(progress) = p("readProgress") {
        fields.push(field("📊", "Read progress", progress));
    }
    if let Some(code) = event.response_code {
        fields.push(field("🔢", "Response code", code.to_string()));
    }
    if let Some(cost) = prop_text(event, "costTime")
        .or_else(|| event.raw_data.get("costTime").map(scalar_text))
    {
        fields.push(field("⏲️", "Elapsed", cost));
    }
    if let Some(trace) = p("traceId") {
        let mut f = field("🧵", "Trace", trace.clone());
        f.copy = Some(trace);
        fields.push(f);
    }

    or_placeholder(fields)
}

/// Detail blocks for a tracker event: payment-flow steps resolve through the
/// process-type and status tables, reader and membership events get their
/// own fields, then a handful of generic commerce fields.
pub fn tracker_detail(event: &NormalizedEvent) -> Vec<DetailField> {
    let mut fields = Vec::new();
    let p = |key: &str| prop_text(event, key);

    match event.event.as_str() {
        "Pay_Process" => {
            if let Some(step) = p("process_type") {
                let (label, icon) = match PAY_PROCESS_TYPES.get(step.as_str()) {
                    Some(&(label, icon)) => (label.to_string(), icon),
                    None => (step, "💰"),
                };
                fields.push(field(icon, "Step", label));
            }
            if let Some(status) = p("status") {
                let (label, icon) = match PAY_PROCESS_STATUS.get(status.as_str()) {
                    Some(&(label, icon)) => (label.to_string(), icon),
                    None => (status, "💰"),
                };
                fields.push(field(icon, "Status", label));
            }
            if let Some(err) = p("error_msg") {
                fields.push(field("⚠️", "Error", err));
            }
        }
        "Reader_ButtonClick" => {
            if let Some(button) = p("button_name").or_else(|| p("button_id")) {
                fields.push(field("👆", "Button", button));
            }
        }
        "Reader_UnlockResult" => {
            if let Some(kind) = p("unlock_type") {
                fields.push(field("🔓", "Unlock type", kind));
            }
            if let Some(success) = event.properties.get("is_success").and_then(Value::as_bool) {
                fields.push(field(
                    if success { "✅" } else { "❌" },
                    "Result",
                    if success { "success" } else { "failure" },
                ));
            }
            if let Some(reason) = p("fail_reason") {
                fields.push(field("📝", "Fail reason", reason));
            }
        }
        "MemberPopup_Exposure" => {
            if let Some(kind) = p("popup_type") {
                fields.push(field("💳", "Popup", kind));
            }
        }
        "Member_SubmitOrder" => {
            if let Some(order) = p("order_id") {
                fields.push(field("📝", "Order", order));
            }
        }
        _ => {}
    }

    if let Some(amount) = p("pay_amount").or_else(|| p("amount")) {
        fields.push(field("💰", "Amount", amount));
    }
    if let Some(product) = p("product_name").or_else(|| p("product_id")) {
        fields.push(field("🛒", "Product", product));
    }
    if let Some(book) = p("book_name").or_else(|| p("book_id")) {
        fields.push(field("📖", "Book", book));
    }

    or_placeholder(fields)
}

/// The structured section trees. When both response and error are present
/// the error wins and the response is suppressed.
fn structured_blocks(event: &NormalizedEvent) -> Vec<DetailField> {
    let mut fields = Vec::new();
    if let Some(method) = &event.sections.method {
        fields.push(section_field("📤", "Request", method));
    }
    match (&event.sections.error, &event.sections.response) {
        (Some(error), _) => fields.push(section_field("❌", "Error", error)),
        (None, Some(response)) => fields.push(section_field("📥", "Response", response)),
        (None, None) => {}
    }
    fields
}

fn section_field(icon: &'static str, label: &str, body: &SectionBody) -> DetailField {
    match body {
        SectionBody::Json(value) => DetailField {
            icon,
            label: label.to_string(),
            value: DetailValue::Tree(json_tree(value, 0)),
            copy: serde_json::to_string_pretty(value).ok(),
        },
        SectionBody::Text(text) => DetailField {
            icon,
            label: label.to_string(),
            value: DetailValue::Text(text.clone()),
            copy: Some(text.clone()),
        },
    }
}

/// Depth-bounded tree rendering: scalars become leaves, arrays index their
/// elements, objects branch per key, and anything past the depth bound
/// collapses. The bound keeps output finite on pathologically deep payloads.
fn json_tree(value: &Value, depth: usize) -> Vec<TreeNode> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| node_for(key.clone(), child, depth))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, child)| node_for(i.to_string(), child, depth))
            .collect(),
        scalar => vec![TreeNode::leaf("value", scalar_text(scalar))],
    }
}

fn node_for(label: String, value: &Value, depth: usize) -> TreeNode {
    match value {
        Value::Object(_) | Value::Array(_) => {
            if depth + 1 >= MAX_TREE_DEPTH {
                TreeNode::collapsed(label)
            } else {
                TreeNode::branch(label, json_tree(value, depth + 1))
            }
        }
        scalar => TreeNode::leaf(label, scalar_text(scalar)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn prop_text(event: &NormalizedEvent, key: &str) -> Option<String> {
    event.properties.get(key).map(scalar_text).filter(|s| !s.is_empty())
}

fn or_placeholder(fields: Vec<DetailField>) -> Vec<DetailField> {
    if fields.is_empty() {
        vec![field("ℹ️", "Detail", "no detail available")]
    } else {
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applog::{normalize_applog, CapturedRecord};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn applog_event(line: Value) -> NormalizedEvent {
        normalize_applog(&[CapturedRecord::new(line)]).remove(0)
    }

    #[test]
    fn empty_event_yields_placeholder() {
        let fields = applog_detail(&applog_event(json!({"msg": "hi"})));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].value, DetailValue::Text("no detail available".to_string()));
    }

    #[test]
    fn error_fields_only_at_error_level() {
        let line = json!({"operation": "/api.x.Auth/Login", "code": 16, "reason": "UNAUTHENTICATED"});
        let info = applog_detail(&applog_event(line.clone()));
        assert!(!info.iter().any(|f| f.label == "Error code"));

        let mut with_level = line;
        with_level["level"] = json!("error");
        let err = applog_detail(&applog_event(with_level));
        assert!(err.iter().any(|f| f.label == "Error code"));
        assert!(err.iter().any(|f| f.label == "Error reason"));
    }

    #[test]
    fn error_section_suppresses_response() {
        let fail = "[response]:\n{\"code\":500}\n[error]:\ndialed too many times";
        let event = applog_event(json!({"operation": "/api.x.Order/CreateOrder", "failReason": fail}));
        let fields = applog_detail(&event);
        assert!(fields.iter().any(|f| f.label == "Error"));
        assert!(!fields.iter().any(|f| f.label == "Response"));
    }

    #[test]
    fn response_rendered_when_no_error_section() {
        let fail = "[method]:\n{\"op\":\"X\"}\n[response]:\n{\"code\":200}";
        let event = applog_event(json!({"operation": "/api.x.Order/CreateOrder", "failReason": fail}));
        let fields = applog_detail(&event);
        assert!(fields.iter().any(|f| f.label == "Request"));
        assert!(fields.iter().any(|f| f.label == "Response"));
    }

    #[test]
    fn raw_args_only_without_structured_blocks() {
        let with_args = applog_event(json!({"operation": "/api.x.Book/GetBook", "args": {"bookId": "b1"}}));
        assert!(applog_detail(&with_args).iter().any(|f| f.label == "Arguments"));

        let with_section = applog_event(json!({
            "operation": "/api.x.Book/GetBook",
            "args": {"bookId": "b1"},
            "failReason": "[response]:\n{\"code\":200}",
        }));
        assert!(!applog_detail(&with_section).iter().any(|f| f.label == "Arguments"));
    }

    #[test]
    fn tree_collapses_past_max_depth() {
        let deep = json!({"a": {"b": {"c": {"d": 1}}}});
        let tree = json_tree(&deep, 0);
        let a = &tree[0];
        let b = &a.children[0];
        let c = &b.children[0];
        assert_eq!(c.label, "c");
        assert_eq!(c.value.as_deref(), Some("…"));
        assert!(c.children.is_empty());
    }

    #[test]
    fn arrays_render_indexed_nodes() {
        let tree = json_tree(&json!({"items": [1, 2]}), 0);
        let items = &tree[0];
        assert_eq!(items.children[0].label, "0");
        assert_eq!(items.children[0].value.as_deref(), Some("1"));
    }

    #[test]
    fn pay_process_resolves_step_and_status() {
        let event = NormalizedEvent {
            event: "Pay_Process".to_string(),
            properties: json!({"process_type": "create_order", "status": "success"})
                .as_object()
                .cloned()
                .unwrap(),
            ..placeholder_tracker()
        };
        let fields = tracker_detail(&event);
        assert!(fields.iter().any(|f| matches!(&f.value, DetailValue::Text(t) if t == "Create order")));
        assert!(fields.iter().any(|f| matches!(&f.value, DetailValue::Text(t) if t == "Payment succeeded")));
    }

    fn placeholder_tracker() -> NormalizedEvent {
        crate::tracker::normalize_tracker(&[json!({"event": "Pay_Process", "time": 1_704_067_200})
            .as_object()
            .cloned()
            .unwrap()])
        .remove(0)
    }
}
