//! Compact-form JWT codec and JSON normalizer.
//!
//! Two small, pure function families:
//! - the codec maps between the dot-delimited base64url token string and a
//!   structured triple of header/payload/signature parts, with independent
//!   per-segment failure;
//! - the normalizer reformats a JSON text fragment (pretty or compact)
//!   without ever rejecting non-JSON input.
//!
//! No I/O, no state, no panics on user input.

mod base64url;
mod normalize;
mod token;

pub use base64url::{text_from_base64url, to_base64url, SegmentError};
pub use normalize::{try_compact, try_pretty};
pub use token::{decode, encode, DecodedJwt, EncodeJwt, Part};
