//! URL-safe base64 text channel.
//!
//! Encoding strips padding; decoding tolerates padding but does not require
//! it. Decoded bytes must be valid UTF-8 to yield text.

use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::{DecodePaddingMode, GeneralPurposeConfig};
use base64::{alphabet, Engine};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes `text` as unpadded URL-safe base64.
pub fn to_base64url(text: &str) -> String {
    ENGINE.encode(text.as_bytes())
}

/// Decodes a URL-safe base64 segment back to text.
pub fn text_from_base64url(segment: &str) -> Result<String, SegmentError> {
    let bytes = ENGINE.decode(segment)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_without_padding() {
        assert_eq!(to_base64url("a"), "YQ");
        assert_eq!(to_base64url("{\"alg\":\"HS256\"}"), "eyJhbGciOiJIUzI1NiJ9");
    }

    #[test]
    fn decodes_with_or_without_padding() {
        assert_eq!(text_from_base64url("YQ").unwrap(), "a");
        assert_eq!(text_from_base64url("YQ==").unwrap(), "a");
    }

    #[test]
    fn uses_url_safe_alphabet() {
        // "???>" is "Pz8/Pg" in standard base64.
        assert_eq!(to_base64url("???>"), "Pz8_Pg");
        assert!(text_from_base64url("a+b/").is_err());
    }

    #[test]
    fn rejects_non_utf8_payloads() {
        // "_w" decodes to the single byte 0xff.
        assert!(matches!(
            text_from_base64url("_w"),
            Err(SegmentError::Utf8(_))
        ));
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(matches!(
            text_from_base64url("no spaces allowed"),
            Err(SegmentError::Base64(_))
        ));
    }

    #[test]
    fn round_trips_text() {
        for text in ["", "a", "hello world", "{\"sub\":\"1234567890\"}", "⛰"] {
            assert_eq!(text_from_base64url(&to_base64url(text)).unwrap(), text);
        }
    }
}
