use crate::engine::{Pipeline, RunResult};
use crate::{CandidateToken, ParseError, TokenClass};
use serde::Serialize;
use std::time::Duration;

/// Labels accepted as "this page is Latin-1".
const LATIN1_LABELS: &[&str] = &["iso-8859-1", "iso8859-1", "iso_8859-1", "latin1", "latin-1", "l1"];

/// How to turn response bytes into text.
#[derive(Debug, Clone)]
pub struct EncodingHints {
    /// Charset the server declared, if any (e.g. from `Content-Type`).
    pub charset: Option<String>,
    /// Decode as Latin-1 when the bytes are not valid UTF-8.
    pub allow_latin1_fallback: bool,
}

impl Default for EncodingHints {
    fn default() -> Self {
        Self { charset: None, allow_latin1_fallback: true }
    }
}

impl EncodingHints {
    /// UTF-8 or nothing: invalid bytes yield [`ParseError::Undecodable`].
    pub fn strict_utf8() -> Self {
        Self { charset: None, allow_latin1_fallback: false }
    }

    /// Pick up the `charset=` parameter of a `Content-Type` header value.
    pub fn from_content_type(content_type: &str) -> Self {
        let charset = content_type.split(';').skip(1).find_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim().eq_ignore_ascii_case("charset").then(|| value.trim().trim_matches('"').to_ascii_lowercase())
        });
        Self { charset, ..Self::default() }
    }

    pub(crate) fn declares_latin1(&self) -> bool {
        self.charset.as_deref().is_some_and(|label| LATIN1_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label)))
    }
}

/// The three recovered passwords.
///
/// Fields are pairwise distinct and `ascii` uses at least one character
/// outside `[A-Za-z0-9]`; [`PasswordSet::new`] refuses anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordSet {
    hex: String,
    ascii: String,
    alphanumeric: String,
}

impl PasswordSet {
    pub fn new(hex: String, ascii: String, alphanumeric: String) -> Result<Self, ParseError> {
        if hex == ascii || hex == alphanumeric || ascii == alphanumeric {
            return Err(ParseError::DuplicatePasswords);
        }
        if ascii.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ParseError::NoQualifyingAsciiMatch);
        }
        Ok(Self { hex, ascii, alphanumeric })
    }

    /// 64 uppercase hex characters.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// 63 printable ASCII characters, at least one of them special.
    pub fn ascii(&self) -> &str {
        &self.ascii
    }

    /// 63 characters from `[A-Za-z0-9]`.
    pub fn alphanumeric(&self) -> &str {
        &self.alphanumeric
    }

    /// The passwords in display order, tagged with their class.
    pub fn entries(&self) -> [(TokenClass, &str); 3] {
        [
            (TokenClass::HexUpper64, self.hex.as_str()),
            (TokenClass::PrintableAscii63, self.ascii.as_str()),
            (TokenClass::Alnum63, self.alphanumeric.as_str()),
        ]
    }
}

/// Result of one parse call: all three passwords, or why not.
pub type ParseOutcome = Result<PasswordSet, ParseError>;

/// Per-stage wall-clock timings of a verbose run.
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    pub total: Duration,
    pub decode: Duration,
    pub sanitize: Duration,
    pub entities: Duration,
    pub extract: Duration,
    pub disambiguate: Duration,
}

/// Result from [`parse_verbose`].
///
/// This is meant for diagnosing a page that stopped parsing; the plain
/// [`parse`] path does not collect any of it.
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub outcome: ParseOutcome,
    pub timings: StageTimings,
    /// Byte length of the normalized text (`None` when decoding failed).
    pub normalized_len: Option<usize>,
    /// Every candidate token of every class, grouped by class.
    pub candidates: Vec<CandidateToken>,
}

/// Recover the passwords from raw response bytes.
///
/// # Example
/// ```
/// use passgrab::{EncodingHints, ParseError, parse};
///
/// let outcome = parse(b"<p>nothing here</p>", &EncodingHints::default());
/// assert_eq!(outcome.unwrap_err(), ParseError::NoHexMatch);
/// ```
pub fn parse(bytes: &[u8], hints: &EncodingHints) -> ParseOutcome {
    Pipeline::from_bytes(bytes, hints).run()
}

/// Recover the passwords from page text that is already decoded.
pub fn parse_text(html: &str) -> ParseOutcome {
    Pipeline::from_text(html).run()
}

/// Like [`parse`], but also report stage timings and every candidate found.
pub fn parse_verbose(bytes: &[u8], hints: &EncodingHints) -> ParseReport {
    let RunResult { outcome, metrics, normalized_len, candidates } = Pipeline::from_bytes(bytes, hints).run_with_metrics();

    ParseReport {
        outcome,
        timings: StageTimings {
            total: metrics.total,
            decode: metrics.decode,
            sanitize: metrics.sanitize,
            entities: metrics.entities,
            extract: metrics.extract,
            disambiguate: metrics.disambiguate,
        },
        normalized_len,
        candidates,
    }
}
