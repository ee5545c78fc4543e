//! Pagination Normalizer
//!
//! List endpoints answer with a bare array, a Spring-style page object
//! (`content`, `number`, `size`, `totalElements`, `totalPages`) or the MVP
//! envelope (`data`, `total`, `page`, `size`). Everything is folded into one
//! `Page` shape here so no caller has to sniff response shapes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Requested window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub index: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(index: u64, size: u64) -> Self {
        Self { index, size }
    }

    pub fn first(size: u64) -> Self {
        Self { index: 0, size }
    }
}

/// Page metadata without the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub page_index: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl PageInfo {
    /// Metadata for `total` elements split into pages of `size`.
    pub fn for_total(page_index: u64, page_size: u64, total_elements: u64) -> Self {
        let total_pages = page_count(total_elements, page_size);
        Self {
            page_index: clamp_index(page_index, total_pages),
            page_size,
            total_elements,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }
}

/// A normalized window over a record collection. Serializes in the
/// Spring page shape, so normalizing a serialized `Page` is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(rename = "number")]
    pub page_index: u64,
    #[serde(rename = "size")]
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            page_index: 0,
            page_size: 0,
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Treats `items` as the whole, unpaginated result.
    pub fn from_items(items: Vec<T>, request: PageRequest) -> Self {
        let info = PageInfo::for_total(request.index, request.size, items.len() as u64);
        Self {
            content: items,
            page_index: info.page_index,
            page_size: info.page_size,
            total_elements: info.total_elements,
            total_pages: info.total_pages,
        }
    }

    pub fn info(&self) -> PageInfo {
        PageInfo {
            page_index: self.page_index,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// `ceil(total / size)`, zero when `size` is zero.
pub fn page_count(total: u64, size: u64) -> u64 {
    if size == 0 {
        0
    } else {
        total.div_ceil(size)
    }
}

fn clamp_index(index: u64, total_pages: u64) -> u64 {
    index.min(total_pages.max(1) - 1)
}

/// Folds any list response body into a `Page`. Never fails: unknown shapes
/// yield an empty page and undecodable elements are skipped.
pub fn normalize<T: DeserializeOwned>(body: Value, request: PageRequest) -> Page<T> {
    match body {
        Value::Array(items) => Page::from_items(decode_items(items), request),
        Value::Object(mut map) => {
            if let Some(content) = map.remove("content") {
                Page {
                    content: decode_items(into_array(content)),
                    page_index: read_count(&map, "number"),
                    page_size: read_count(&map, "size"),
                    total_elements: read_count(&map, "totalElements"),
                    total_pages: read_count(&map, "totalPages"),
                }
            } else if let Some(data) = map.remove("data") {
                from_envelope(data, &map, request)
            } else {
                warn!(keys = ?map.keys().collect::<Vec<_>>(), "unrecognised list response shape");
                Page::empty()
            }
        }
        Value::Null => Page::empty(),
        other => {
            warn!(kind = value_kind(&other), "list response is not an array or object");
            Page::empty()
        }
    }
}

fn from_envelope<T: DeserializeOwned>(data: Value, map: &Map<String, Value>, request: PageRequest) -> Page<T> {
    let items = decode_items(into_array(data));
    // A zero or missing total falls back to the rows actually returned.
    let total = map
        .get("total")
        .and_then(as_count)
        .filter(|total| *total > 0)
        .unwrap_or(items.len() as u64);
    let index = map.get("page").and_then(as_count).unwrap_or(request.index);
    let size = map.get("size").and_then(as_count).unwrap_or(request.size);
    let info = PageInfo::for_total(index, size, total);
    Page {
        content: items,
        page_index: info.page_index,
        page_size: info.page_size,
        total_elements: info.total_elements,
        total_pages: info.total_pages,
    }
}

fn into_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            warn!(kind = value_kind(&other), "expected an array of records");
            Vec::new()
        }
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    let mut decoded = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => decoded.push(record),
            Err(e) => warn!(position, error = %e, "skipping undecodable record"),
        }
    }
    decoded
}

fn read_count(map: &Map<String, Value>, key: &str) -> u64 {
    map.get(key).and_then(as_count).unwrap_or(0)
}

fn as_count(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(page: &Page<Value>) -> Vec<u64> {
        page.content.iter().filter_map(|v| v["id"].as_u64()).collect()
    }

    fn array_of(n: u64) -> Value {
        Value::Array((1..=n).map(|id| json!({ "id": id })).collect())
    }

    #[test]
    fn test_array_is_whole_result() {
        let page: Page<Value> = normalize(array_of(23), PageRequest::new(0, 5));
        assert_eq!(page.total_elements, 23);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.page_size, 5);
        assert_eq!(page.content.len(), 23);
    }

    #[test]
    fn test_array_keeps_requested_index() {
        let page: Page<Value> = normalize(array_of(23), PageRequest::new(3, 5));
        assert_eq!(page.page_index, 3);
    }

    #[test]
    fn test_array_index_stays_in_range() {
        let page: Page<Value> = normalize(array_of(4), PageRequest::new(9, 5));
        assert_eq!(page.page_index, 0);
        let empty: Page<Value> = normalize(json!([]), PageRequest::new(2, 5));
        assert_eq!(empty.page_index, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_page_object_passes_through() {
        let body = json!({
            "content": [{ "id": 6 }, { "id": 7 }],
            "number": 1,
            "size": 5,
            "totalElements": 7,
            "totalPages": 2
        });
        let page: Page<Value> = normalize(body, PageRequest::new(0, 10));
        assert_eq!(ids(&page), vec![6, 7]);
        assert_eq!(page.info(), PageInfo { page_index: 1, page_size: 5, total_elements: 7, total_pages: 2 });
    }

    #[test]
    fn test_page_object_missing_numbers_default_to_zero() {
        let page: Page<Value> = normalize(json!({ "content": [{ "id": 1 }] }), PageRequest::new(4, 10));
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.info(), PageInfo::default());
    }

    #[test]
    fn test_mvp_envelope() {
        let body = json!({ "data": [{ "id": 1 }, { "id": 2 }], "total": 12, "page": 0, "size": 2 });
        let page: Page<Value> = normalize(body, PageRequest::new(0, 10));
        assert_eq!(ids(&page), vec![1, 2]);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 6);
    }

    #[test]
    fn test_mvp_envelope_without_totals_counts_data() {
        let page: Page<Value> = normalize(json!({ "data": [{ "id": 1 }] }), PageRequest::new(0, 10));
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_size, 10);
    }

    #[test]
    fn test_mvp_envelope_zero_total_counts_data() {
        let body = json!({ "data": [{ "id": 1 }, { "id": 2 }, { "id": 3 }], "total": 0 });
        let page: Page<Value> = normalize(body, PageRequest::new(0, 10));
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);

        let empty: Page<Value> = normalize(json!({ "data": [], "total": 0 }), PageRequest::new(0, 10));
        assert_eq!(empty.total_elements, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_unknown_shapes_yield_empty_page() {
        for body in [json!("oops"), json!(42), json!(null), json!({ "items": [] }), json!({ "content": "x" })] {
            let page: Page<Value> = normalize(body, PageRequest::new(0, 5));
            assert!(page.content.is_empty());
            assert_eq!(page.total_elements, 0);
        }
    }

    #[test]
    fn test_undecodable_elements_are_skipped() {
        #[derive(Debug, Deserialize, Serialize, PartialEq)]
        struct Row {
            id: u64,
        }
        let page: Page<Row> = normalize(json!([{ "id": 1 }, { "id": "x" }, { "id": 3 }]), PageRequest::new(0, 5));
        assert_eq!(page.content, vec![Row { id: 1 }, Row { id: 3 }]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let request = PageRequest::new(1, 5);
        let bodies = vec![
            array_of(23),
            json!({ "content": [{ "id": 9 }], "number": 2, "totalPages": 3 }),
            json!({ "data": [{ "id": 1 }], "total": 40, "size": 20 }),
            json!(false),
        ];
        for body in bodies {
            let once: Page<Value> = normalize(body, request);
            let again: Page<Value> = normalize(serde_json::to_value(&once).unwrap(), request);
            assert_eq!(again, once);
        }
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(23, 5), 5);
        assert_eq!(page_count(25, 5), 5);
        assert_eq!(page_count(0, 5), 0);
        assert_eq!(page_count(7, 0), 0);
    }
}
