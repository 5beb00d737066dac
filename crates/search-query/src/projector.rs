//! Result projection.
//!
//! Maps raw engine hits into typed records selected by the `type`
//! discriminant. Missing fields fall back to neutral defaults and hit
//! order is preserved as returned by the engine.

use serde::Serialize;
use serde_json::{Map, Value};
use search_types::ContentType;

/// Path prefix used for files indexed without one.
pub const DEFAULT_URL_PREFIX: &str = "/wp-content/uploads/";

/// Page number used for files indexed without one.
pub const DEFAULT_PAGE: i64 = 1;

/// Priority used for FAQs indexed without one.
pub const DEFAULT_FAQ_PRIORITY: i64 = 10;

/// Type reported for hits without a `type` field.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Fields every record carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordBase {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Highlighted title when available
    pub title: String,
    /// Highlighted, cropped content
    pub content: String,
    /// Display date
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    #[serde(flatten)]
    pub base: RecordBase,
    pub filename: String,
    pub path: String,
    pub url_prefix: String,
    pub page: i64,
    pub document_type: String,
}

/// Posts and pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleResult {
    #[serde(flatten)]
    pub base: RecordBase,
    pub url: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqResult {
    #[serde(flatten)]
    pub base: RecordBase,
    pub categories: Vec<String>,
    pub priority: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventResult {
    #[serde(flatten)]
    pub base: RecordBase,
    pub url: String,
    pub event_time: String,
    pub event_location: String,
}

/// A projected hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultRecord {
    File(FileResult),
    Post(ArticleResult),
    Page(ArticleResult),
    Faq(FaqResult),
    Event(EventResult),
    /// Unknown type: common fields only
    Generic(RecordBase),
}

impl ResultRecord {
    pub fn base(&self) -> &RecordBase {
        match self {
            ResultRecord::File(r) => &r.base,
            ResultRecord::Post(r) | ResultRecord::Page(r) => &r.base,
            ResultRecord::Faq(r) => &r.base,
            ResultRecord::Event(r) => &r.base,
            ResultRecord::Generic(base) => base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    /// Raw `type` value of the hit.
    pub fn kind(&self) -> &str {
        &self.base().kind
    }

    /// Known content type, None for generic records.
    pub fn content_type(&self) -> Option<ContentType> {
        match self {
            ResultRecord::File(_) => Some(ContentType::File),
            ResultRecord::Post(_) => Some(ContentType::Post),
            ResultRecord::Page(_) => Some(ContentType::Page),
            ResultRecord::Faq(_) => Some(ContentType::Faq),
            ResultRecord::Event(_) => Some(ContentType::Event),
            ResultRecord::Generic(_) => None,
        }
    }
}

/// Projected search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Original raw query, directives included
    pub query: String,
    pub hits: Vec<ResultRecord>,
    pub total: u64,
    pub processing_time_ms: u64,
}

/// Project raw hits, preserving order.
pub fn project(hits: &[Value]) -> Vec<ResultRecord> {
    hits.iter().map(project_hit).collect()
}

/// Project a full engine response body.
///
/// `total` comes from `estimatedTotalHits`; missing counters default to 0
/// and a missing `hits` array yields no records.
pub fn project_response(raw_query: &str, response: &Value) -> SearchResult {
    let hits = response
        .get("hits")
        .and_then(Value::as_array)
        .map(|hits| project(hits))
        .unwrap_or_default();

    SearchResult {
        query: raw_query.to_string(),
        hits,
        total: response
            .get("estimatedTotalHits")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        processing_time_ms: response
            .get("processingTimeMs")
            .and_then(Value::as_u64)
            .unwrap_or(0),
    }
}

/// Project a single hit by its `type` discriminant.
pub fn project_hit(hit: &Value) -> ResultRecord {
    let empty = Map::new();
    let fields = hit.as_object().unwrap_or(&empty);
    let formatted = fields
        .get("_formatted")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let base = RecordBase {
        id: text(fields, "id").unwrap_or_default(),
        kind: text(fields, "type").unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        title: text(formatted, "title")
            .or_else(|| text(fields, "title"))
            .unwrap_or_default(),
        content: text(formatted, "content").unwrap_or_default(),
        date: text(fields, "date_display").unwrap_or_default(),
    };

    let field = |name: &str| text(fields, name).unwrap_or_default();

    match ContentType::parse(&base.kind) {
        Some(ContentType::File) => ResultRecord::File(FileResult {
            filename: field("filename"),
            path: field("path"),
            url_prefix: text(fields, "url_prefix")
                .unwrap_or_else(|| DEFAULT_URL_PREFIX.to_string()),
            page: integer(fields, "page").unwrap_or(DEFAULT_PAGE),
            document_type: field("document_type"),
            base,
        }),
        Some(ContentType::Faq) => ResultRecord::Faq(FaqResult {
            categories: fields
                .get("categories")
                .and_then(Value::as_array)
                .map(|values| values.iter().filter_map(scalar_text).collect())
                .unwrap_or_default(),
            priority: integer(fields, "priority").unwrap_or(DEFAULT_FAQ_PRIORITY),
            base,
        }),
        Some(ContentType::Event) => ResultRecord::Event(EventResult {
            url: field("url"),
            event_time: field("event_time"),
            event_location: field("event_location"),
            base,
        }),
        Some(ContentType::Post) => ResultRecord::Post(ArticleResult {
            url: field("url"),
            excerpt: field("excerpt"),
            base,
        }),
        Some(ContentType::Page) => ResultRecord::Page(ArticleResult {
            url: field("url"),
            excerpt: field("excerpt"),
            base,
        }),
        None => ResultRecord::Generic(base),
    }
}

/// String or number field as text; null and missing are None.
fn text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer field, accepting numeric strings.
fn integer(fields: &Map<String, Value>, name: &str) -> Option<i64> {
    match fields.get(name)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_faq_defaults() {
        let record = project_hit(&json!({"id": "faq-1", "type": "faq", "title": "Bins"}));
        match record {
            ResultRecord::Faq(faq) => {
                assert!(faq.categories.is_empty());
                assert_eq!(faq.priority, 10);
                assert_eq!(faq.base.title, "Bins");
            }
            other => panic!("expected faq, got {:?}", other),
        }
    }

    #[test]
    fn test_faq_fields() {
        let record = project_hit(&json!({
            "id": "faq-2",
            "type": "faq",
            "categories": ["Waste", "Council"],
            "priority": 3
        }));
        match record {
            ResultRecord::Faq(faq) => {
                assert_eq!(faq.categories, vec!["Waste", "Council"]);
                assert_eq!(faq.priority, 3);
            }
            other => panic!("expected faq, got {:?}", other),
        }
    }

    #[test]
    fn test_file_defaults() {
        let record = project_hit(&json!({
            "id": "file-1",
            "type": "file",
            "filename": "minutes.pdf",
            "path": "council/2024/minutes.pdf"
        }));
        match record {
            ResultRecord::File(file) => {
                assert_eq!(file.filename, "minutes.pdf");
                assert_eq!(file.path, "council/2024/minutes.pdf");
                assert_eq!(file.url_prefix, DEFAULT_URL_PREFIX);
                assert_eq!(file.page, 1);
                assert_eq!(file.document_type, "");
            }
            other => panic!("expected file, got {:?}", other),
        }
    }

    #[test]
    fn test_formatted_title_preferred() {
        let record = project_hit(&json!({
            "id": 42,
            "type": "page",
            "title": "Village Hall",
            "content": "raw content",
            "date_display": "1 March 2024",
            "_formatted": {
                "title": "<mark>Village</mark> Hall",
                "content": "…the <mark>village</mark> hall…"
            }
        }));
        let base = record.base();
        assert_eq!(base.id, "42");
        assert_eq!(base.title, "<mark>Village</mark> Hall");
        assert_eq!(base.content, "…the <mark>village</mark> hall…");
        assert_eq!(base.date, "1 March 2024");
        assert_eq!(record.content_type(), Some(ContentType::Page));
    }

    #[test]
    fn test_content_requires_formatted() {
        let record = project_hit(&json!({"type": "post", "content": "raw"}));
        assert_eq!(record.base().content, "");
    }

    #[test]
    fn test_event_fields() {
        let record = project_hit(&json!({
            "type": "event",
            "url": "/events/fete",
            "event_time": "14:00",
            "event_location": "Green"
        }));
        match record {
            ResultRecord::Event(event) => {
                assert_eq!(event.url, "/events/fete");
                assert_eq!(event.event_time, "14:00");
                assert_eq!(event.event_location, "Green");
            }
            other => panic!("expected event, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_generic() {
        let record = project_hit(&json!({"id": "x", "type": "podcast", "url": "/p"}));
        assert!(matches!(record, ResultRecord::Generic(_)));
        assert_eq!(record.kind(), "podcast");
        assert!(record.content_type().is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("url").is_none());
    }

    #[test]
    fn test_missing_type_and_id() {
        let record = project_hit(&json!({}));
        assert_eq!(record.kind(), UNKNOWN_TYPE);
        assert_eq!(record.id(), "");
        assert!(matches!(record, ResultRecord::Generic(_)));
    }

    #[test]
    fn test_order_preserved() {
        let hits = vec![
            json!({"id": "3", "type": "post"}),
            json!({"id": "1", "type": "file"}),
            json!({"id": "2", "type": "faq"}),
            json!({"id": "9", "type": "mystery"}),
        ];
        let ids: Vec<String> = project(&hits).iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "2", "9"]);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = project_hit(&json!({"id": "f", "type": "file", "page": "4"}));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["page"], 4);
        assert_eq!(json["url_prefix"], DEFAULT_URL_PREFIX);
    }

    #[test]
    fn test_project_response() {
        let response = json!({
            "hits": [{"id": "a", "type": "post", "excerpt": "Hello"}],
            "estimatedTotalHits": 12,
            "processingTimeMs": 3
        });
        let result = project_response("type:post hello", &response);
        assert_eq!(result.query, "type:post hello");
        assert_eq!(result.total, 12);
        assert_eq!(result.processing_time_ms, 3);
        assert_eq!(result.hits.len(), 1);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["processingTimeMs"], 3);
        assert_eq!(json["hits"][0]["excerpt"], "Hello");
    }

    #[test]
    fn test_project_response_defaults() {
        let result = project_response("hall", &json!({}));
        assert!(result.hits.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.processing_time_ms, 0);
    }
}
