//! Argument rendering shared by every filter and comparator kind.
//!
//! All quoting and escaping lives here so the rules cannot drift between
//! variants.

use base64::prelude::*;
use std::fmt::{self, Display, Write};

/// Quote a byte payload as `'<base64>'`
pub fn quote_bytes(bytes: &[u8]) -> String {
    format!("'{}'", BASE64_STANDARD.encode(bytes))
}

/// Quote free text as `'<text>'`, doubling any embedded single quote
pub fn quote_text(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        if c == '\'' {
            quoted.push('\'');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

pub fn render_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

pub fn render_int(value: impl Into<i64>) -> String {
    value.into().to_string()
}

/// Writes `Name(arg1,arg2,...)` into a formatter.
///
/// Arguments are written verbatim: callers pass already-quoted text or a
/// nested value whose `Display` is its own rendered expression.
pub(crate) struct Call<'a, 'f> {
    out: &'a mut fmt::Formatter<'f>,
    first: bool,
}

impl<'a, 'f> Call<'a, 'f> {
    pub(crate) fn open(out: &'a mut fmt::Formatter<'f>, name: &str) -> Result<Self, fmt::Error> {
        out.write_str(name)?;
        out.write_char('(')?;
        Ok(Self { out, first: true })
    }

    pub(crate) fn arg(mut self, value: impl Display) -> Result<Self, fmt::Error> {
        if !self.first {
            self.out.write_char(',')?;
        }
        self.first = false;
        write!(self.out, "{value}")?;
        Ok(self)
    }

    pub(crate) fn close(self) -> fmt::Result {
        self.out.write_char(')')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_bytes_uses_padded_standard_alphabet() {
        assert_eq!(quote_bytes(b"line"), "'bGluZQ=='");
        assert_eq!(quote_bytes(&[0xfb, 0xff]), "'+/8='");
    }

    #[test]
    fn test_quote_text_doubles_single_quotes() {
        assert_eq!(quote_text("abc"), "'abc'");
        assert_eq!(quote_text("it's"), "'it''s'");
        assert_eq!(quote_text("''"), "''''''");
        assert_eq!(quote_text(""), "''");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(render_bool(true), "true");
        assert_eq!(render_bool(false), "false");
        assert_eq!(render_int(42u32), "42");
        assert_eq!(render_int(-7i64), "-7");
    }
}
