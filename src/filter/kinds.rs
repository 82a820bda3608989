use super::compare_op::CompareOp;
use super::comparator::Comparator;
use super::error::FilterError;
use super::render::{Call, quote_bytes, render_bool, render_int};
use std::fmt;

/// A single server-side row filter.
///
/// Values are validated when constructed and immutable afterwards, so
/// rendering never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    kind: FilterKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Return at most `limit` columns per row
    Count { limit: u32 },
    /// Return `limit` columns per row starting at column `offset`
    Paginate { limit: u32, offset: u32 },
    ColumnPrefix { prefix: Vec<u8> },
    /// Columns between two qualifiers; an empty bound is unbounded
    ColumnRange {
        min_column: Vec<u8>,
        min_inclusive: bool,
        max_column: Vec<u8>,
        max_inclusive: bool,
    },
    DependentColumn {
        family: Vec<u8>,
        qualifier: Vec<u8>,
        drop_dependent_column: bool,
        op: CompareOp,
        comparator: Comparator,
    },
    Family { op: CompareOp, comparator: Comparator },
    KeyOnly,
    FirstKeyOnly,
    SingleColumnValue(ColumnValueTest),
    SingleColumnValueExclude(ColumnValueTest),
}

/// Fields shared by the single-column-value filters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnValueTest {
    pub family: Vec<u8>,
    pub qualifier: Vec<u8>,
    pub op: CompareOp,
    pub comparator: Comparator,
    pub filter_if_missing: bool,
    pub latest_version_only: bool,
}

impl Filter {
    pub fn count(limit: i64) -> Result<Self, FilterError> {
        let limit = non_negative("Count", "limit", limit)?;
        Ok(Self::from_kind(FilterKind::Count { limit }))
    }

    pub fn paginate(limit: i64, offset: i64) -> Result<Self, FilterError> {
        let limit = non_negative("Paginate", "limit", limit)?;
        let offset = non_negative("Paginate", "offset", offset)?;
        Ok(Self::from_kind(FilterKind::Paginate { limit, offset }))
    }

    pub fn column_prefix(prefix: impl Into<Vec<u8>>) -> Result<Self, FilterError> {
        let prefix = required("ColumnPrefix", "prefix", prefix.into())?;
        Ok(Self::from_kind(FilterKind::ColumnPrefix { prefix }))
    }

    pub fn column_range(
        min_column: impl Into<Vec<u8>>,
        min_inclusive: bool,
        max_column: impl Into<Vec<u8>>,
        max_inclusive: bool,
    ) -> Self {
        Self::from_kind(FilterKind::ColumnRange {
            min_column: min_column.into(),
            min_inclusive,
            max_column: max_column.into(),
            max_inclusive,
        })
    }

    pub fn dependent_column(
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
        drop_dependent_column: bool,
        op: CompareOp,
        comparator: Comparator,
    ) -> Result<Self, FilterError> {
        let family = required("DependentColumn", "family", family.into())?;
        let qualifier = required("DependentColumn", "qualifier", qualifier.into())?;
        Ok(Self::from_kind(FilterKind::DependentColumn {
            family,
            qualifier,
            drop_dependent_column,
            op,
            comparator,
        }))
    }

    pub fn family(op: CompareOp, comparator: Comparator) -> Self {
        Self::from_kind(FilterKind::Family { op, comparator })
    }

    pub fn key_only() -> Self {
        Self::from_kind(FilterKind::KeyOnly)
    }

    pub fn first_key_only() -> Self {
        Self::from_kind(FilterKind::FirstKeyOnly)
    }

    /// Start a `SingleColumnValue` filter; defaults are
    /// `filter_if_missing = false` and `latest_version_only = true`
    pub fn single_column_value(
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
        op: CompareOp,
    ) -> SingleColumnValueBuilder {
        SingleColumnValueBuilder::new(false, family.into(), qualifier.into(), op)
    }

    /// Start a `SingleColumnValueExclude` filter, which also drops the
    /// tested column from returned rows
    pub fn single_column_value_exclude(
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
        op: CompareOp,
    ) -> SingleColumnValueBuilder {
        SingleColumnValueBuilder::new(true, family.into(), qualifier.into(), op)
    }

    fn from_kind(kind: FilterKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            FilterKind::Count { .. } => "Count",
            FilterKind::Paginate { .. } => "Paginate",
            FilterKind::ColumnPrefix { .. } => "ColumnPrefix",
            FilterKind::ColumnRange { .. } => "ColumnRange",
            FilterKind::DependentColumn { .. } => "DependentColumn",
            FilterKind::Family { .. } => "Family",
            FilterKind::KeyOnly => "KeyOnly",
            FilterKind::FirstKeyOnly => "FirstKeyOnly",
            FilterKind::SingleColumnValue(_) => "SingleColumnValue",
            FilterKind::SingleColumnValueExclude(_) => "SingleColumnValueExclude",
        }
    }

    /// Render the filter as a Filter Language expression
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let call = Call::open(f, self.type_name())?;
        match &self.kind {
            FilterKind::Count { limit } => call.arg(render_int(*limit))?.close(),
            FilterKind::Paginate { limit, offset } => call
                .arg(render_int(*limit))?
                .arg(render_int(*offset))?
                .close(),
            FilterKind::ColumnPrefix { prefix } => call.arg(quote_bytes(prefix))?.close(),
            FilterKind::ColumnRange {
                min_column,
                min_inclusive,
                max_column,
                max_inclusive,
            } => call
                .arg(quote_bytes(min_column))?
                .arg(render_bool(*min_inclusive))?
                .arg(quote_bytes(max_column))?
                .arg(render_bool(*max_inclusive))?
                .close(),
            FilterKind::DependentColumn {
                family,
                qualifier,
                drop_dependent_column,
                op,
                comparator,
            } => call
                .arg(quote_bytes(family))?
                .arg(quote_bytes(qualifier))?
                .arg(render_bool(*drop_dependent_column))?
                .arg(op)?
                .arg(comparator)?
                .close(),
            FilterKind::Family { op, comparator } => call.arg(op)?.arg(comparator)?.close(),
            FilterKind::KeyOnly | FilterKind::FirstKeyOnly => call.close(),
            FilterKind::SingleColumnValue(test) | FilterKind::SingleColumnValueExclude(test) => {
                call.arg(quote_bytes(&test.family))?
                    .arg(quote_bytes(&test.qualifier))?
                    .arg(test.op)?
                    .arg(&test.comparator)?
                    .arg(render_bool(test.filter_if_missing))?
                    .arg(render_bool(test.latest_version_only))?
                    .close()
            }
        }
    }
}

/// Builder for the single-column-value filters.
///
/// Every optional field already holds its default, so the rendered
/// argument list is always complete.
#[derive(Debug, Clone)]
pub struct SingleColumnValueBuilder {
    exclude: bool,
    family: Vec<u8>,
    qualifier: Vec<u8>,
    op: CompareOp,
    comparator: Option<Comparator>,
    filter_if_missing: bool,
    latest_version_only: bool,
}

impl SingleColumnValueBuilder {
    fn new(exclude: bool, family: Vec<u8>, qualifier: Vec<u8>, op: CompareOp) -> Self {
        Self {
            exclude,
            family,
            qualifier,
            op,
            comparator: None,
            filter_if_missing: false,
            latest_version_only: true,
        }
    }

    pub fn comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Compare against raw value bytes with an `ExactBytes` comparator
    pub fn value(self, value: impl Into<Vec<u8>>) -> Result<Self, FilterError> {
        Ok(self.comparator(Comparator::exact_bytes(value)?))
    }

    /// Drop rows that do not have the tested column at all
    pub fn filter_if_missing(mut self, filter_if_missing: bool) -> Self {
        self.filter_if_missing = filter_if_missing;
        self
    }

    /// Only test the newest version of the column
    pub fn latest_version_only(mut self, latest_version_only: bool) -> Self {
        self.latest_version_only = latest_version_only;
        self
    }

    pub fn build(self) -> Result<Filter, FilterError> {
        let type_name = if self.exclude {
            "SingleColumnValueExclude"
        } else {
            "SingleColumnValue"
        };
        let family = required(type_name, "family", self.family)?;
        let qualifier = required(type_name, "qualifier", self.qualifier)?;
        let comparator = self.comparator.ok_or_else(|| {
            FilterError::invalid(format!("{type_name} requires a comparator or value"))
        })?;

        let test = ColumnValueTest {
            family,
            qualifier,
            op: self.op,
            comparator,
            filter_if_missing: self.filter_if_missing,
            latest_version_only: self.latest_version_only,
        };
        Ok(Filter::from_kind(if self.exclude {
            FilterKind::SingleColumnValueExclude(test)
        } else {
            FilterKind::SingleColumnValue(test)
        }))
    }
}

fn non_negative(type_name: &str, field: &str, value: i64) -> Result<u32, FilterError> {
    if value < 0 {
        return Err(FilterError::invalid(format!(
            "{type_name} {field} must be non-negative, got {value}"
        )));
    }
    u32::try_from(value).map_err(|_| {
        FilterError::invalid(format!(
            "{type_name} {field} {value} exceeds the maximum of {}",
            u32::MAX
        ))
    })
}

fn required(type_name: &str, field: &str, bytes: Vec<u8>) -> Result<Vec<u8>, FilterError> {
    if bytes.is_empty() {
        return Err(FilterError::invalid(format!(
            "{type_name} {field} must not be empty"
        )));
    }
    Ok(bytes)
}
