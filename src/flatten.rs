//! Record flattening and notes sanitization
//!
//! Projects a nested deal record onto a fixed 21-column table. The column
//! table is static data: each column names its output header and the dotted
//! source path it reads from the raw record. Lookups are total — any missing
//! key or non-object intermediate resolves to an empty cell, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// One output column: header name, source path, and whether the cell
/// passes through the HTML sanitizer.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Output column header
    pub name: &'static str,
    /// Dotted source path as key segments
    pub path: &'static [&'static str],
    /// Strip markup and decode entities in this cell
    pub sanitize: bool,
}

impl ColumnSpec {
    /// Dotted source path as requested from the API (`fields[]=` projection)
    pub fn source_path(&self) -> String {
        self.path.join(".")
    }
}

const fn col(name: &'static str, path: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec {
        name,
        path,
        sanitize: false,
    }
}

/// The fixed export columns, in output order
pub const COLUMNS: [ColumnSpec; 21] = [
    col("name", &["name"]),
    col("stage", &["stage"]),
    col("product_name", &["product", "name"]),
    col("value", &["value"]),
    col("owner_email", &["owner", "email"]),
    col("organization_name", &["organization", "name"]),
    col("contact_email", &["contact", "email"]),
    col("referrer_email", &["referrer", "email"]),
    col("engagement_name", &["engagement", "name"]),
    col("engagement_date", &["engagement", "date"]),
    col("metrics_product_name", &["metrics", "product", "name"]),
    col("metrics_label", &["metrics", "label"]),
    col("metric1_estimated", &["metric1_estimated"]),
    col("metric1_actual", &["metric1_actual"]),
    col("metric2_estimated", &["metric2_estimated"]),
    col("metric2_actual", &["metric2_actual"]),
    col("metric3_estimated", &["metric3_estimated"]),
    col("metric3_actual", &["metric3_actual"]),
    col("metric4_estimated", &["metric4_estimated"]),
    col("metric4_actual", &["metric4_actual"]),
    ColumnSpec {
        name: "notes",
        path: &["notes"],
        sanitize: true,
    },
];

/// Flatten a raw deal record into 21 cells in column order.
///
/// Total over arbitrary input: absent fields, nulls, and non-scalar values
/// all render as empty cells.
pub fn flatten_deal(deal: &Value) -> Vec<String> {
    COLUMNS
        .iter()
        .map(|column| {
            let cell = render_cell(lookup(deal, column.path));
            if column.sanitize {
                sanitize_html(&cell)
            } else {
                cell
            }
        })
        .collect()
}

/// Resolve a path by sequential object-key lookups
fn lookup<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = record;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}

/// Render a looked-up value as a cell string
fn render_cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // null, absent, arrays, objects
        _ => String::new(),
    }
}

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Strip `<...>` markup and decode basic HTML entities.
///
/// Idempotent on already-clean text; empty input yields an empty string.
pub fn sanitize_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let no_tags = TAG_RE.replace_all(text, "");
    decode_entities(&no_tags)
}

/// Decode the basic named/numeric entities. Ampersand last, so encoded
/// entities like `&amp;amp;` only unwrap one level per pass.
fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_columns_shape() {
        assert_eq!(COLUMNS.len(), 21);
        assert_eq!(COLUMNS[0].name, "name");
        assert_eq!(COLUMNS[20].name, "notes");
        assert_eq!(COLUMNS[2].source_path(), "product.name");
        assert_eq!(COLUMNS[10].source_path(), "metrics.product.name");
    }

    #[test]
    fn test_flatten_sparse_record() {
        let deal = json!({
            "name": "Acme Deal",
            "product": {"name": "Widget"},
            "value": 1000
        });

        let row = flatten_deal(&deal);

        assert_eq!(row.len(), 21);
        assert_eq!(row[0], "Acme Deal");
        assert_eq!(row[2], "Widget");
        assert_eq!(row[3], "1000");
        // Everything else defaults to empty
        assert_eq!(row[1], "");
        assert_eq!(row[4], "");
        assert_eq!(row[20], "");
    }

    #[test]
    fn test_flatten_empty_record() {
        let row = flatten_deal(&json!({}));
        assert_eq!(row.len(), 21);
        assert!(row.iter().all(String::is_empty));
    }

    #[test]
    fn test_flatten_never_fails_on_odd_shapes() {
        // Intermediate values that aren't objects resolve to empty cells
        let deal = json!({
            "product": "not-an-object",
            "owner": null,
            "engagement": ["not", "an", "object"],
            "metrics": {"product": 42},
            "value": true
        });

        let row = flatten_deal(&deal);

        assert_eq!(row[2], ""); // product.name
        assert_eq!(row[4], ""); // owner.email
        assert_eq!(row[8], ""); // engagement.name
        assert_eq!(row[10], ""); // metrics.product.name
        assert_eq!(row[3], "true"); // value as bool
    }

    #[test]
    fn test_flatten_non_object_input() {
        assert!(flatten_deal(&json!(null)).iter().all(String::is_empty));
        assert!(flatten_deal(&json!("deal")).iter().all(String::is_empty));
    }

    #[test]
    fn test_flatten_sanitizes_notes() {
        let deal = json!({"notes": "<p>Call <b>next week</b> &amp; confirm</p>"});
        let row = flatten_deal(&deal);
        assert_eq!(row[20], "Call next week & confirm");
    }

    #[test_case("<b>Hi</b> &amp; bye", "Hi & bye"; "tags and ampersand")]
    #[test_case("", ""; "empty input")]
    #[test_case("plain text", "plain text"; "already clean")]
    #[test_case("&quot;quoted&quot;", "\"quoted\""; "double quotes")]
    #[test_case("it&#39;s fine", "it's fine"; "numeric apostrophe")]
    #[test_case("a &lt; b &gt; c", "a < b > c"; "angle brackets")]
    #[test_case("<div class=\"x\"><span>nested</span></div>", "nested"; "nested tags")]
    #[test_case("dangling < bracket", "dangling < bracket"; "unclosed bracket stays")]
    fn test_sanitize_html(input: &str, expected: &str) {
        assert_eq!(sanitize_html(input), expected);
    }

    #[test]
    fn test_sanitize_idempotent_on_clean_text() {
        for text in ["", "plain", "Hi & bye", "a < b", "it's \"fine\""] {
            let once = sanitize_html(text);
            assert_eq!(sanitize_html(&once), once);
        }
    }
}
