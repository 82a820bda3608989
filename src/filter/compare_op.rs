use super::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relational operator applied between a cell value and a comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompareOp {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    /// Never matches a cell
    NoOperation,
}

impl CompareOp {
    pub const ALL: [CompareOp; 7] = [
        CompareOp::Equal,
        CompareOp::NotEqual,
        CompareOp::Greater,
        CompareOp::GreaterOrEqual,
        CompareOp::Less,
        CompareOp::LessOrEqual,
        CompareOp::NoOperation,
    ];

    /// Token written into the filter expression
    pub fn token(&self) -> &'static str {
        match self {
            CompareOp::Equal => "EQUAL",
            CompareOp::NotEqual => "NOT_EQUAL",
            CompareOp::Greater => "GREATER",
            CompareOp::GreaterOrEqual => "GREATER_OR_EQUAL",
            CompareOp::Less => "LESS",
            CompareOp::LessOrEqual => "LESS_OR_EQUAL",
            CompareOp::NoOperation => "NO_OP",
        }
    }
}

impl FromStr for CompareOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "equal" | "eq" | "=" | "==" => Ok(CompareOp::Equal),
            "not_equal" | "ne" | "!=" | "<>" => Ok(CompareOp::NotEqual),
            "greater" | "greater_than" | "gt" | ">" => Ok(CompareOp::Greater),
            "greater_or_equal" | "greater_than_or_equal" | "ge" | ">=" => {
                Ok(CompareOp::GreaterOrEqual)
            }
            "less" | "less_than" | "lt" | "<" => Ok(CompareOp::Less),
            "less_or_equal" | "less_than_or_equal" | "le" | "<=" => Ok(CompareOp::LessOrEqual),
            "no_op" | "no_operation" | "noop" => Ok(CompareOp::NoOperation),
            _ => Err(FilterError::invalid(format!(
                "unknown compare operator '{s}'. Valid operators are: {}",
                CompareOp::ALL.map(|op| op.token()).join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for CompareOp {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompareOp> for String {
    fn from(op: CompareOp) -> Self {
        op.token().to_string()
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Bitwise operator used by the masked-bytes comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
}

impl BitwiseOp {
    pub const ALL: [BitwiseOp; 3] = [BitwiseOp::And, BitwiseOp::Or, BitwiseOp::Xor];

    pub fn token(&self) -> &'static str {
        match self {
            BitwiseOp::And => "AND",
            BitwiseOp::Or => "OR",
            BitwiseOp::Xor => "XOR",
        }
    }
}

impl FromStr for BitwiseOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "and" | "&" => Ok(BitwiseOp::And),
            "or" | "|" => Ok(BitwiseOp::Or),
            "xor" | "^" => Ok(BitwiseOp::Xor),
            _ => Err(FilterError::invalid(format!(
                "unknown bitwise operator '{s}'. Valid operators are: AND, OR, XOR"
            ))),
        }
    }
}

impl TryFrom<String> for BitwiseOp {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BitwiseOp> for String {
    fn from(op: BitwiseOp) -> Self {
        op.token().to_string()
    }
}

impl fmt::Display for BitwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
