//! Declarative filter descriptions read from TOML, JSON, or JSON5 files.
//!
//! ```toml
//! type = "single_column_value"
//! family = "first"
//! qualifier = "line"
//! op = "GREATER"
//! filter_if_missing = true
//!
//! [comparator]
//! type = "exact_bytes"
//! value = { int32 = 1 }
//! ```

use super::compare_op::{BitwiseOp, CompareOp};
use super::comparator::Comparator;
use super::error::FilterError;
use super::kinds::{Filter, SingleColumnValueBuilder};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("Failed to read filter description '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse filter description '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Invalid filter description '{path}': {source}")]
    Invalid {
        path: String,
        #[source]
        source: FilterError,
    },
}

/// Byte argument as written in a description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByteValue {
    /// UTF-8 bytes of the string
    Text(String),
    Base64 { base64: String },
    /// Little-endian 32-bit integer
    Int32 { int32: i32 },
}

impl ByteValue {
    pub fn to_bytes(&self) -> Result<Vec<u8>, FilterError> {
        match self {
            ByteValue::Text(text) => Ok(text.as_bytes().to_vec()),
            ByteValue::Base64 { base64 } => BASE64_STANDARD
                .decode(base64)
                .map_err(|e| FilterError::invalid(format!("invalid base64 '{base64}': {e}"))),
            ByteValue::Int32 { int32 } => Ok(int32.to_le_bytes().to_vec()),
        }
    }
}

impl From<&str> for ByteValue {
    fn from(text: &str) -> Self {
        ByteValue::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComparatorDescription {
    ExactBytes { value: ByteValue },
    PrefixBytes { value: ByteValue },
    MaskedBytes { value: ByteValue, op: BitwiseOp },
    Absent,
    Substring { text: String },
}

impl ComparatorDescription {
    pub fn into_comparator(self) -> Result<Comparator, FilterError> {
        match self {
            ComparatorDescription::ExactBytes { value } => {
                Comparator::exact_bytes(value.to_bytes()?)
            }
            ComparatorDescription::PrefixBytes { value } => {
                Comparator::prefix_bytes(value.to_bytes()?)
            }
            ComparatorDescription::MaskedBytes { value, op } => {
                Comparator::masked_bytes(value.to_bytes()?, op)
            }
            ComparatorDescription::Absent => Ok(Comparator::absent()),
            ComparatorDescription::Substring { text } => Ok(Comparator::substring(text)),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterDescription {
    Count {
        limit: i64,
    },
    Paginate {
        limit: i64,
        offset: i64,
    },
    ColumnPrefix {
        prefix: ByteValue,
    },
    ColumnRange {
        min_column: ByteValue,
        min_inclusive: bool,
        max_column: ByteValue,
        max_inclusive: bool,
    },
    DependentColumn {
        family: ByteValue,
        qualifier: ByteValue,
        #[serde(default)]
        drop_dependent_column: bool,
        op: CompareOp,
        comparator: ComparatorDescription,
    },
    Family {
        op: CompareOp,
        comparator: ComparatorDescription,
    },
    KeyOnly,
    FirstKeyOnly,
    SingleColumnValue(ColumnValueDescription),
    SingleColumnValueExclude(ColumnValueDescription),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnValueDescription {
    pub family: ByteValue,
    pub qualifier: ByteValue,
    pub op: CompareOp,
    pub comparator: ComparatorDescription,
    #[serde(default)]
    pub filter_if_missing: bool,
    #[serde(default = "default_true")]
    pub latest_version_only: bool,
}

impl FilterDescription {
    /// Validate the description and build the filter it describes
    pub fn into_filter(self) -> Result<Filter, FilterError> {
        match self {
            FilterDescription::Count { limit } => Filter::count(limit),
            FilterDescription::Paginate { limit, offset } => Filter::paginate(limit, offset),
            FilterDescription::ColumnPrefix { prefix } => {
                Filter::column_prefix(prefix.to_bytes()?)
            }
            FilterDescription::ColumnRange {
                min_column,
                min_inclusive,
                max_column,
                max_inclusive,
            } => Ok(Filter::column_range(
                min_column.to_bytes()?,
                min_inclusive,
                max_column.to_bytes()?,
                max_inclusive,
            )),
            FilterDescription::DependentColumn {
                family,
                qualifier,
                drop_dependent_column,
                op,
                comparator,
            } => Filter::dependent_column(
                family.to_bytes()?,
                qualifier.to_bytes()?,
                drop_dependent_column,
                op,
                comparator.into_comparator()?,
            ),
            FilterDescription::Family { op, comparator } => {
                Ok(Filter::family(op, comparator.into_comparator()?))
            }
            FilterDescription::KeyOnly => Ok(Filter::key_only()),
            FilterDescription::FirstKeyOnly => Ok(Filter::first_key_only()),
            FilterDescription::SingleColumnValue(test) => {
                let builder = Filter::single_column_value(
                    test.family.to_bytes()?,
                    test.qualifier.to_bytes()?,
                    test.op,
                );
                finish_column_value(builder, test)
            }
            FilterDescription::SingleColumnValueExclude(test) => {
                let builder = Filter::single_column_value_exclude(
                    test.family.to_bytes()?,
                    test.qualifier.to_bytes()?,
                    test.op,
                );
                finish_column_value(builder, test)
            }
        }
    }
}

fn finish_column_value(
    builder: SingleColumnValueBuilder,
    test: ColumnValueDescription,
) -> Result<Filter, FilterError> {
    builder
        .comparator(test.comparator.into_comparator()?)
        .filter_if_missing(test.filter_if_missing)
        .latest_version_only(test.latest_version_only)
        .build()
}

/// Description file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    Toml,
    Json,
    Json5,
}

impl DescriptionFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("json") => DescriptionFormat::Json,
            Some("json5") => DescriptionFormat::Json5,
            _ => DescriptionFormat::Toml,
        }
    }
}

pub fn parse_description(
    raw: &str,
    format: DescriptionFormat,
) -> Result<FilterDescription, String> {
    match format {
        DescriptionFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
        DescriptionFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        DescriptionFormat::Json5 => json5::from_str(raw).map_err(|e| e.to_string()),
    }
}

/// Read a description file and build the filter it describes
pub fn load_description(path: &Path) -> Result<Filter, DescriptionError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| DescriptionError::Read {
        path: path_display.clone(),
        source,
    })?;

    let description =
        parse_description(&raw, DescriptionFormat::from_path(path)).map_err(|message| {
            DescriptionError::Parse {
                path: path_display.clone(),
                message,
            }
        })?;

    description
        .into_filter()
        .map_err(|source| DescriptionError::Invalid {
            path: path_display,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_single_column_value() {
        let raw = r#"
type = "single_column_value"
family = "first"
qualifier = "line"
op = "GREATER"

[comparator]
type = "exact_bytes"
value = { int32 = 1 }
"#;
        let filter = parse_description(raw, DescriptionFormat::Toml)
            .unwrap()
            .into_filter()
            .unwrap();
        assert_eq!(
            filter.render(),
            "SingleColumnValue('Zmlyc3Q=','bGluZQ==',GREATER,ExactBytes('AQAAAA=='),false,true)"
        );
    }

    #[test]
    fn test_parse_json_masked_bytes() {
        let raw = r#"{
            "type": "family",
            "op": "=",
            "comparator": { "type": "masked_bytes", "value": { "base64": "AwAAAA==" }, "op": "xor" }
        }"#;
        let filter = parse_description(raw, DescriptionFormat::Json)
            .unwrap()
            .into_filter()
            .unwrap();
        assert_eq!(filter.render(), "Family(EQUAL,MaskedBytes('AwAAAA==',XOR))");
    }

    #[test]
    fn test_parse_json5_key_only() {
        let raw = "{ type: 'key_only', }";
        let filter = parse_description(raw, DescriptionFormat::Json5)
            .unwrap()
            .into_filter()
            .unwrap();
        assert_eq!(filter, Filter::key_only());
    }

    #[test]
    fn test_unknown_operator_fails_to_parse() {
        let raw = r#"{ "type": "family", "op": "roughly", "comparator": { "type": "absent" } }"#;
        assert!(parse_description(raw, DescriptionFormat::Json).is_err());
    }

    #[test]
    fn test_negative_count_is_invalid() {
        let raw = r#"{ "type": "count", "limit": -3 }"#;
        let description = parse_description(raw, DescriptionFormat::Json).unwrap();
        assert!(matches!(
            description.into_filter(),
            Err(FilterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bad_base64_is_invalid() {
        let value = ByteValue::Base64 {
            base64: "not base64!".to_string(),
        };
        assert!(value.to_bytes().is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DescriptionFormat::from_path(Path::new("f.JSON")),
            DescriptionFormat::Json
        );
        assert_eq!(
            DescriptionFormat::from_path(Path::new("f.json5")),
            DescriptionFormat::Json5
        );
        assert_eq!(
            DescriptionFormat::from_path(Path::new("f.toml")),
            DescriptionFormat::Toml
        );
        assert_eq!(
            DescriptionFormat::from_path(Path::new("filter")),
            DescriptionFormat::Toml
        );
    }
}
