//! UTF-8 decoding for inputs of no recognized format

use super::FormatExtractor;
use crate::error::ExtractResult;
use crate::types::DocumentFormat;

const BOM: char = '\u{feff}';

/// Strict UTF-8 decoder. Invalid input is an error, never lossily replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct Utf8Fallback;

impl Utf8Fallback {
    pub fn new() -> Self {
        Self
    }
}

impl FormatExtractor for Utf8Fallback {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Text
    }

    fn extract(&self, data: &[u8]) -> ExtractResult<String> {
        let text = std::str::from_utf8(data)?;
        let text = text.strip_prefix(BOM).unwrap_or(text);
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use proptest::prelude::*;

    #[test]
    fn test_plain_text_trimmed() {
        let text = Utf8Fallback::new().extract(b"hello\n").unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_bom_stripped() {
        let text = Utf8Fallback::new().extract("\u{feff}  notes".as_bytes()).unwrap();
        assert_eq!(text, "notes");
    }

    #[test]
    fn test_invalid_utf8() {
        let result = Utf8Fallback::new().extract(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(ExtractError::DecodeFailure(_))));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Utf8Fallback::new().extract(b"").unwrap(), "");
    }

    proptest! {
        #[test]
        fn prop_valid_utf8_decodes_to_trimmed_input(s in "[^\u{feff}]*") {
            let text = Utf8Fallback::new().extract(s.as_bytes()).unwrap();
            prop_assert_eq!(text, s.trim());
        }
    }
}
