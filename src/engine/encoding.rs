//! Byte-to-text decoding.
//!
//! The page is expected to be UTF-8, but older responses have been served as
//! Latin-1. Latin-1 maps every byte to a codepoint, so once the fallback is
//! allowed decoding cannot fail; callers that want a hard failure on
//! malformed UTF-8 disable it through [`EncodingHints`].

use crate::{EncodingHints, ParseError};
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode `bytes` using `hints`.
///
/// ```text
/// charset names Latin-1 ──▶ Latin-1
/// otherwise             ──▶ UTF-8 ── invalid ──▶ Latin-1 (if allowed)
///                                              └▶ ParseError::Undecodable
/// ```
pub fn decode_page(bytes: &[u8], hints: &EncodingHints) -> Result<String, ParseError> {
    if hints.declares_latin1() {
        debug!(target: "passgrab", charset = ?hints.charset, "decoding as declared latin-1");
        return Ok(latin1(bytes));
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(text.to_owned()),
        Err(err) if hints.allow_latin1_fallback => {
            debug!(target: "passgrab", valid_up_to = err.valid_up_to(), "invalid utf-8, falling back to latin-1");
            Ok(latin1(bytes))
        }
        Err(err) => {
            debug!(target: "passgrab", valid_up_to = err.valid_up_to(), "invalid utf-8 and latin-1 fallback disabled");
            Err(ParseError::Undecodable)
        }
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
