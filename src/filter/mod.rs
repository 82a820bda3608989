//! Filter Language encoding
//!
//! Builds typed filter and comparator values and renders them into the
//! function-call shaped expression the row store's scan endpoint accepts.
//!
//! # Grammar
//!
//! ```text
//! expr   := TypeName "(" [ arg ("," arg)* ] ")"
//! arg    := 'base64' | 'text' | integer | true | false | TOKEN | expr
//! ```
//!
//! Byte arguments are base64 encoded (standard alphabet, padded) and single
//! quoted. Free text is single quoted with embedded quotes doubled. Every
//! argument of a variant is always written, defaults included, because the
//! server matches arguments by position.
//!
//! # Examples
//!
//! ```text
//! Count(2)
//! Paginate(1,1)
//! ColumnRange('YQ==',true,'Yg==',false)
//! SingleColumnValue('Zmlyc3Q=','bGluZQ==',EQUAL,ExactBytes('AQAAAA=='),false,true)
//! Family(EQUAL,MaskedBytes('AwAAAA==',XOR))
//! ```

pub mod compare_op;
pub mod comparator;
pub mod description;
pub mod error;
pub mod kinds;
pub mod render;
pub mod warnings;

pub use compare_op::{BitwiseOp, CompareOp};
pub use comparator::{Comparator, ComparatorKind};
pub use description::{
    ByteValue, ComparatorDescription, DescriptionError, FilterDescription, load_description,
};
pub use error::FilterError;
pub use kinds::{ColumnValueTest, Filter, FilterKind, SingleColumnValueBuilder};
pub use warnings::{filter_warnings, print_filter_warnings};

/// Filter type names in the order they are listed to users
pub const FILTER_TYPE_NAMES: [&str; 10] = [
    "Count",
    "Paginate",
    "ColumnPrefix",
    "ColumnRange",
    "DependentColumn",
    "Family",
    "KeyOnly",
    "FirstKeyOnly",
    "SingleColumnValue",
    "SingleColumnValueExclude",
];

pub const COMPARATOR_TYPE_NAMES: [&str; 5] =
    ["ExactBytes", "PrefixBytes", "MaskedBytes", "Absent", "Substring"];
