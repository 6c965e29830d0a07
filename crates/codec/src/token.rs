//! Compact token form <-> structured triple.
//!
//! Segment-count policy (pinned, see DESIGN.md):
//! - empty input: all three parts absent;
//! - one segment (no dot anywhere): the lone blob is taken to be the
//!   payload, header and signature absent;
//! - two segments: header and payload;
//! - three or more: header, payload, and everything after the second dot
//!   rejoined verbatim as the signature.
//!
//! Header and payload decode independently; a corrupt header never blocks
//! the payload or the signature. `decode` is total and never errors.

use crate::base64url::{text_from_base64url, to_base64url};

/// Result of decoding one dot-delimited segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// The segment did not exist in the input.
    Absent,
    /// The segment existed but base64url decoding (or UTF-8) failed.
    Unparseable,
    /// Decoded text, which may or may not itself be valid JSON.
    Present(String),
}

impl Part {
    /// Decoded text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Present(text) => Some(text),
            _ => None,
        }
    }

    fn from_segment(segment: &str) -> Part {
        match text_from_base64url(segment) {
            Ok(text) => Part::Present(text),
            Err(_) => Part::Unparseable,
        }
    }
}

/// The structured triple produced by [`decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedJwt {
    pub header: Part,
    pub payload: Part,
    pub signature: Part,
}

/// Splits `raw` on `.` and decodes header and payload as base64url text.
///
/// The signature channel is opaque: it is carried verbatim, dots and all,
/// and never decoded.
pub fn decode(raw: &str) -> DecodedJwt {
    if raw.is_empty() {
        return DecodedJwt {
            header: Part::Absent,
            payload: Part::Absent,
            signature: Part::Absent,
        };
    }

    let mut segments = raw.splitn(3, '.');
    let first = segments.next().unwrap_or_default();
    match (segments.next(), segments.next()) {
        // A bare blob is assumed to be a payload-only token.
        (None, _) => DecodedJwt {
            header: Part::Absent,
            payload: Part::from_segment(first),
            signature: Part::Absent,
        },
        (Some(payload), None) => DecodedJwt {
            header: Part::from_segment(first),
            payload: Part::from_segment(payload),
            signature: Part::Absent,
        },
        (Some(payload), Some(signature)) => DecodedJwt {
            header: Part::from_segment(first),
            payload: Part::from_segment(payload),
            signature: Part::Present(signature.to_string()),
        },
    }
}

/// Input to [`encode`]: plain header/payload text and a verbatim signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeJwt {
    pub header: Option<String>,
    pub payload: Option<String>,
    pub signature: Option<String>,
}

/// Rebuilds the compact form from plain-text parts.
///
/// Header and payload are base64url-encoded when non-empty; an empty or
/// absent field contributes an empty segment at its position. Trailing
/// empty segments are retained so the segment count survives a re-decode.
pub fn encode(jwt: &EncodeJwt) -> String {
    fn segment(field: Option<&str>) -> String {
        match field {
            Some(text) if !text.is_empty() => to_base64url(text),
            _ => String::new(),
        }
    }

    format!(
        "{}.{}.{}",
        segment(jwt.header.as_deref()),
        segment(jwt.payload.as_deref()),
        jwt.signature.as_deref().unwrap_or_default()
    )
}
