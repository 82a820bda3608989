//! Scan-creation request body with an attached filter expression.
//!
//! The rendered filter is stored verbatim; nothing here inspects it.

use crate::filter::Filter;
use base64::prelude::*;
use serde::{Serialize, Serializer};

/// Anything that can carry one opaque filter expression
pub trait FilterExpressionSink {
    fn set_filter_expression(&mut self, expression: String);
}

/// Render `filter` once and store it on `sink`
pub fn attach_filter<S: FilterExpressionSink + ?Sized>(sink: &mut S, filter: &Filter) {
    let expression = filter.render();
    tracing::debug!(filter = %expression, kind = filter.type_name(), "attaching scan filter");
    sink.set_filter_expression(expression);
}

/// Body of a scanner-creation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_base64"
    )]
    start_row: Option<Vec<u8>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_base64"
    )]
    end_row: Option<Vec<u8>>,
    #[serde(
        rename = "column",
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_base64_list"
    )]
    columns: Vec<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_versions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caching: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_blocks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<String>,
}

impl ScanRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_row(mut self, row: impl Into<Vec<u8>>) -> Self {
        self.start_row = Some(row.into());
        self
    }

    pub fn end_row(mut self, row: impl Into<Vec<u8>>) -> Self {
        self.end_row = Some(row.into());
        self
    }

    /// Restrict the scan to a `family:qualifier` column (or a whole family)
    pub fn column(mut self, column: impl Into<Vec<u8>>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn batch(mut self, batch: Option<u32>) -> Self {
        self.batch = batch;
        self
    }

    pub fn max_versions(mut self, max_versions: Option<u32>) -> Self {
        self.max_versions = max_versions;
        self
    }

    pub fn caching(mut self, caching: Option<u32>) -> Self {
        self.caching = caching;
        self
    }

    pub fn cache_blocks(mut self, cache_blocks: Option<bool>) -> Self {
        self.cache_blocks = cache_blocks;
        self
    }

    pub fn with_filter(mut self, filter: &Filter) -> Self {
        attach_filter(&mut self, filter);
        self
    }

    pub fn filter_expression(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FilterExpressionSink for ScanRequest {
    fn set_filter_expression(&mut self, expression: String) {
        self.filter = Some(expression);
    }
}

fn serialize_opt_base64<S: Serializer>(
    value: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(bytes) => serializer.serialize_str(&BASE64_STANDARD.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

fn serialize_base64_list<S: Serializer>(
    values: &[Vec<u8>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|bytes| BASE64_STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{CompareOp, Comparator};
    use serde_json::json;

    #[test]
    fn test_filter_is_stored_verbatim() {
        let filter = Filter::paginate(1, 1).unwrap();
        let request = ScanRequest::new().with_filter(&filter);
        assert_eq!(request.filter_expression(), Some("Paginate(1,1)"));
    }

    #[test]
    fn test_attaching_twice_keeps_only_the_last_filter() {
        let request = ScanRequest::new()
            .with_filter(&Filter::key_only())
            .with_filter(&Filter::first_key_only());
        assert_eq!(request.filter_expression(), Some("FirstKeyOnly()"));
    }

    #[test]
    fn test_json_body() {
        let filter = Filter::single_column_value("first", "line", CompareOp::Equal)
            .comparator(Comparator::exact_i32(1))
            .build()
            .unwrap();
        let request = ScanRequest::new()
            .start_row("row-0")
            .column("first:line")
            .batch(Some(10))
            .with_filter(&filter);

        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "startRow": "cm93LTA=",
                "column": ["Zmlyc3Q6bGluZQ=="],
                "batch": 10,
                "filter": "SingleColumnValue('Zmlyc3Q=','bGluZQ==',EQUAL,ExactBytes('AQAAAA=='),false,true)"
            })
        );
    }

    #[test]
    fn test_scan_without_filter_omits_field() {
        let value = serde_json::to_value(ScanRequest::new()).unwrap();
        assert_eq!(value, json!({}));
    }

    struct Recorder(Vec<String>);

    impl FilterExpressionSink for Recorder {
        fn set_filter_expression(&mut self, expression: String) {
            self.0.push(expression);
        }
    }

    #[test]
    fn test_attach_filter_renders_once_per_call() {
        let mut recorder = Recorder(Vec::new());
        attach_filter(&mut recorder, &Filter::count(2).unwrap());
        assert_eq!(recorder.0, vec!["Count(2)".to_string()]);
    }
}
