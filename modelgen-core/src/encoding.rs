//! Output encodings for generated files.
//!
//! Template sources are decoded and rendered output is encoded with the same
//! charset. Only the charsets that actually occur in generated artifacts are
//! supported: UTF-8 for source code, ISO-8859-1 for legacy property files.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// Charset used both to read a template source and to write its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl OutputEncoding {
    /// Decode raw file bytes into a string.
    pub fn decode(self, bytes: &[u8]) -> Result<String, EncodingError> {
        match self {
            OutputEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|source| EncodingError::InvalidUtf8 { source }),
            // Every byte is a valid ISO-8859-1 char; code points map 1:1.
            OutputEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Encode rendered text into the bytes to write.
    ///
    /// UTF-8 borrows the input; ISO-8859-1 fails on any char above U+00FF.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>, EncodingError> {
        match self {
            OutputEncoding::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            OutputEncoding::Latin1 => {
                let mut bytes = Vec::with_capacity(text.len());
                for ch in text.chars() {
                    let code = u32::from(ch);
                    if code > 0xFF {
                        return Err(EncodingError::Unmappable {
                            ch,
                            encoding: self,
                        });
                    }
                    bytes.push(code as u8);
                }
                Ok(Cow::Owned(bytes))
            }
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputEncoding::Utf8 => write!(f, "UTF-8"),
            OutputEncoding::Latin1 => write!(f, "ISO-8859-1"),
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(OutputEncoding::Utf8),
            "iso-8859-1" | "latin-1" | "latin1" => Ok(OutputEncoding::Latin1),
            other => Err(EncodingError::UnknownName {
                name: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("UTF-8", OutputEncoding::Utf8)]
    #[case("utf8", OutputEncoding::Utf8)]
    #[case("ISO-8859-1", OutputEncoding::Latin1)]
    #[case("Latin-1", OutputEncoding::Latin1)]
    #[case("latin1", OutputEncoding::Latin1)]
    fn parses_known_names(#[case] name: &str, #[case] expected: OutputEncoding) {
        assert_eq!(name.parse::<OutputEncoding>().unwrap(), expected);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "EBCDIC".parse::<OutputEncoding>().unwrap_err();
        assert!(matches!(err, EncodingError::UnknownName { .. }));
    }

    #[test]
    fn latin1_round_trips_high_bytes() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let text = OutputEncoding::Latin1.decode(&bytes).unwrap();
        let encoded = OutputEncoding::Latin1.encode(&text).unwrap();
        assert_eq!(encoded.as_ref(), bytes.as_slice());
    }

    #[test]
    fn latin1_rejects_chars_outside_range() {
        let err = OutputEncoding::Latin1.encode("snowman \u{2603}").unwrap_err();
        assert!(matches!(err, EncodingError::Unmappable { ch: '\u{2603}', .. }));
    }

    #[test]
    fn utf8_decode_rejects_invalid_bytes() {
        let err = OutputEncoding::Utf8.decode(&[0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidUtf8 { .. }));
    }

    #[test]
    fn utf8_encode_borrows() {
        let encoded = OutputEncoding::Utf8.encode("héllo").unwrap();
        assert!(matches!(encoded, Cow::Borrowed(_)));
        assert_eq!(encoded.as_ref(), "héllo".as_bytes());
    }

    #[test]
    fn display_uses_canonical_charset_names() {
        assert_eq!(OutputEncoding::Utf8.to_string(), "UTF-8");
        assert_eq!(OutputEncoding::Latin1.to_string(), "ISO-8859-1");
    }
}
