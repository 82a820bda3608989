use super::compare_op::BitwiseOp;
use super::error::FilterError;
use super::render::{Call, quote_bytes, quote_text};
use std::fmt;

/// Leaf value-comparison strategy used by value-testing filters.
///
/// Construct through the associated functions; the payload is validated
/// once and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparator {
    kind: ComparatorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComparatorKind {
    /// Cell value equals the payload byte-for-byte
    ExactBytes(Vec<u8>),
    /// Cell value starts with the payload
    PrefixBytes(Vec<u8>),
    /// Cell value combined with the payload under a bitwise operator
    MaskedBytes { mask: Vec<u8>, op: BitwiseOp },
    /// Cell value is absent
    Absent,
    /// Cell value contains the text
    Substring(String),
}

impl Comparator {
    pub fn exact_bytes(payload: impl Into<Vec<u8>>) -> Result<Self, FilterError> {
        let payload = required_payload("ExactBytes", payload.into())?;
        Ok(Self::from_kind(ComparatorKind::ExactBytes(payload)))
    }

    /// Exact match on a little-endian 32-bit integer cell
    pub fn exact_i32(value: i32) -> Self {
        Self::from_kind(ComparatorKind::ExactBytes(value.to_le_bytes().to_vec()))
    }

    pub fn prefix_bytes(payload: impl Into<Vec<u8>>) -> Result<Self, FilterError> {
        let payload = required_payload("PrefixBytes", payload.into())?;
        Ok(Self::from_kind(ComparatorKind::PrefixBytes(payload)))
    }

    pub fn masked_bytes(mask: impl Into<Vec<u8>>, op: BitwiseOp) -> Result<Self, FilterError> {
        let mask = required_payload("MaskedBytes", mask.into())?;
        Ok(Self::from_kind(ComparatorKind::MaskedBytes { mask, op }))
    }

    pub fn absent() -> Self {
        Self::from_kind(ComparatorKind::Absent)
    }

    pub fn substring(text: impl Into<String>) -> Self {
        Self::from_kind(ComparatorKind::Substring(text.into()))
    }

    /// Substring comparator from raw bytes that must be UTF-8
    pub fn substring_from_utf8(bytes: &[u8]) -> Result<Self, FilterError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::substring(text))
    }

    fn from_kind(kind: ComparatorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &ComparatorKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ComparatorKind::ExactBytes(_) => "ExactBytes",
            ComparatorKind::PrefixBytes(_) => "PrefixBytes",
            ComparatorKind::MaskedBytes { .. } => "MaskedBytes",
            ComparatorKind::Absent => "Absent",
            ComparatorKind::Substring(_) => "Substring",
        }
    }

    /// Render the comparator as a Filter Language expression
    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn required_payload(type_name: &str, payload: Vec<u8>) -> Result<Vec<u8>, FilterError> {
    if payload.is_empty() {
        return Err(FilterError::invalid(format!(
            "{type_name} requires a non-empty payload"
        )));
    }
    Ok(payload)
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let call = Call::open(f, self.type_name())?;
        match &self.kind {
            ComparatorKind::ExactBytes(payload) | ComparatorKind::PrefixBytes(payload) => {
                call.arg(quote_bytes(payload))?.close()
            }
            ComparatorKind::MaskedBytes { mask, op } => {
                call.arg(quote_bytes(mask))?.arg(op)?.close()
            }
            ComparatorKind::Absent => call.close(),
            ComparatorKind::Substring(text) => call.arg(quote_text(text))?.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_bytes() {
        let comparator = Comparator::exact_bytes("first").unwrap();
        assert_eq!(comparator.render(), "ExactBytes('Zmlyc3Q=')");
    }

    #[test]
    fn test_exact_i32_is_little_endian() {
        assert_eq!(Comparator::exact_i32(1).render(), "ExactBytes('AQAAAA==')");
        assert_eq!(
            Comparator::exact_i32(1),
            Comparator::exact_bytes(vec![1, 0, 0, 0]).unwrap()
        );
    }

    #[test]
    fn test_prefix_bytes() {
        let comparator = Comparator::prefix_bytes(3i32.to_le_bytes()).unwrap();
        assert_eq!(comparator.render(), "PrefixBytes('AwAAAA==')");
    }

    #[test]
    fn test_masked_bytes_renders_operator_unquoted() {
        let comparator = Comparator::masked_bytes(3i32.to_le_bytes(), BitwiseOp::Xor).unwrap();
        assert_eq!(comparator.render(), "MaskedBytes('AwAAAA==',XOR)");
    }

    #[test]
    fn test_absent_has_no_arguments() {
        assert_eq!(Comparator::absent().render(), "Absent()");
    }

    #[test]
    fn test_substring_is_not_base64_encoded() {
        assert_eq!(Comparator::substring("ab").render(), "Substring('ab')");
        assert_eq!(Comparator::substring("o'neil").render(), "Substring('o''neil')");
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        assert!(matches!(
            Comparator::exact_bytes(Vec::new()),
            Err(FilterError::InvalidArgument(_))
        ));
        assert!(Comparator::prefix_bytes("").is_err());
        assert!(Comparator::masked_bytes(Vec::new(), BitwiseOp::And).is_err());
    }

    #[test]
    fn test_substring_from_invalid_utf8_fails() {
        let result = Comparator::substring_from_utf8(&[0x66, 0xff, 0x6f]);
        assert!(matches!(result, Err(FilterError::EncodingFailure(_))));

        let ok = Comparator::substring_from_utf8("héllo".as_bytes()).unwrap();
        assert_eq!(ok, Comparator::substring("héllo"));
    }
}
