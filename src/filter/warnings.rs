use super::compare_op::CompareOp;
use super::comparator::{Comparator, ComparatorKind};
use super::kinds::{Filter, FilterKind};
use colored::Colorize;

/// Collect warnings for filters that are valid but unlikely to do what the
/// caller meant
pub fn filter_warnings(filter: &Filter) -> Vec<String> {
    let mut warnings = Vec::new();

    match filter.kind() {
        FilterKind::ColumnRange {
            min_column,
            min_inclusive,
            max_column,
            max_inclusive,
        } => {
            let crossed = !max_column.is_empty() && min_column > max_column;
            let empty_point = min_column == max_column
                && !min_column.is_empty()
                && !(*min_inclusive && *max_inclusive);
            if crossed || empty_point {
                warnings.push("ColumnRange bounds select no columns".to_string());
            }
        }
        FilterKind::DependentColumn { op, comparator, .. }
        | FilterKind::Family { op, comparator } => {
            check_comparison(filter.type_name(), *op, comparator, &mut warnings);
        }
        FilterKind::SingleColumnValue(test) | FilterKind::SingleColumnValueExclude(test) => {
            check_comparison(filter.type_name(), test.op, &test.comparator, &mut warnings);
        }
        FilterKind::Count { limit: 0 } | FilterKind::Paginate { limit: 0, .. } => {
            warnings.push(format!(
                "{} with a limit of 0 returns rows without columns",
                filter.type_name()
            ));
        }
        _ => {}
    }

    warnings
}

fn check_comparison(
    type_name: &str,
    op: CompareOp,
    comparator: &Comparator,
    warnings: &mut Vec<String>,
) {
    if op == CompareOp::NoOperation {
        warnings.push(format!("{type_name} uses {op}, which matches no cells"));
    }
    if matches!(comparator.kind(), ComparatorKind::Absent)
        && !matches!(op, CompareOp::Equal | CompareOp::NotEqual)
    {
        warnings.push(format!(
            "{type_name} compares Absent() with {op}; only EQUAL and NOT_EQUAL are meaningful"
        ));
    }
}

/// Print warnings for a filter to stderr
pub fn print_filter_warnings(filter: &Filter) {
    for warning in filter_warnings(filter) {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }
}
