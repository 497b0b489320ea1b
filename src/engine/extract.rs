//! Boundary-aware fixed-length scans.
//!
//! Each class is scanned by finding *maximal* runs of its boundary set and
//! keeping only runs whose length is exactly the class width and whose every
//! character is admitted by the class body. Because runs are maximal, a
//! match can never be a clipped piece of a longer run:
//!
//! ```text
//! text:   ...:␠3F09…A1␠(...)      65 hex chars
//!            └──── run ────┘       len 65 ≠ 64  ─▶ rejected, not clipped
//! ```
//!
//! Scan A and scan B keep the first hit only; scan C keeps every hit in
//! document order because it is resolved later by `disambiguate.rs`.

use crate::{CandidateToken, ParseError, Range, TokenClass};
use regex::Regex;
use tracing::{trace, warn};

/// The raw scan results the disambiguator works from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub hex: CandidateToken,
    pub alphanumeric: CandidateToken,
    /// Every 63-char printable run, in document order. Usually includes the
    /// alphanumeric token itself.
    pub ascii: Vec<CandidateToken>,
}

/// Run scans A, B and C over normalized text.
///
/// Fails on the first of scan A or scan B that finds nothing.
pub fn extract(text: &str) -> Result<Extraction, ParseError> {
    let hex = scan(text, TokenClass::HexUpper64).next();
    let alphanumeric = scan(text, TokenClass::Alnum63).next();
    assemble(hex, alphanumeric, || scan(text, TokenClass::PrintableAscii63).collect())
}

impl Extraction {
    /// Rebuild an extraction from the output of [`scan`] over every class,
    /// without scanning the text again.
    pub fn from_candidates(candidates: &[CandidateToken]) -> Result<Extraction, ParseError> {
        let first = |class: TokenClass| candidates.iter().find(|c| c.class == class).cloned();
        assemble(first(TokenClass::HexUpper64), first(TokenClass::Alnum63), || {
            candidates.iter().filter(|c| c.class == TokenClass::PrintableAscii63).cloned().collect()
        })
    }
}

fn assemble(
    hex: Option<CandidateToken>,
    alphanumeric: Option<CandidateToken>,
    ascii: impl FnOnce() -> Vec<CandidateToken>,
) -> Result<Extraction, ParseError> {
    let Some(hex) = hex else {
        warn!(target: "passgrab", "no 64-char hex run; page layout may have changed");
        return Err(ParseError::NoHexMatch);
    };
    let Some(alphanumeric) = alphanumeric else {
        warn!(target: "passgrab", "no 63-char alphanumeric run; page layout may have changed");
        return Err(ParseError::NoAlphanumericMatch);
    };
    let ascii = ascii();

    trace!(target: "passgrab", hex = ?hex.range, alphanumeric = ?alphanumeric.range, ascii = ascii.len(), "extracted");
    Ok(Extraction { hex, alphanumeric, ascii })
}

/// Every token of `class` in `text`, in document order.
pub fn scan(text: &str, class: TokenClass) -> impl Iterator<Item = CandidateToken> + '_ {
    run_pattern(class)
        .find_iter(text)
        .filter(move |run| run.len() == class.width() && run.as_str().chars().all(|c| class.admits(c)))
        .map(move |run| CandidateToken {
            class,
            range: Range { start: run.start(), end: run.end() },
            text: run.as_str().to_owned(),
        })
}

/// Maximal runs of the class's boundary set (see `TokenClass::bounds`).
fn run_pattern(class: TokenClass) -> &'static Regex {
    match class {
        TokenClass::HexUpper64 => regex!(r"[0-9A-Fa-f]+"),
        TokenClass::Alnum63 => regex!(r"[0-9A-Za-z]+"),
        TokenClass::PrintableAscii63 => regex!(r"[!-~]+"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(n: usize) -> String {
        (0..n).map(|i| b"0123456789ABCDEF"[(i * 7 + 3) % 16] as char).collect()
    }

    fn alnum(n: usize) -> String {
        const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        (0..n).map(|i| ALPHABET[(i * 11 + 5) % ALPHABET.len()] as char).collect()
    }

    #[test]
    fn run_patterns_agree_with_class_bounds() {
        for class in TokenClass::ALL {
            for b in 0u8..=0x7f {
                let c = b as char;
                assert_eq!(
                    run_pattern(class).is_match(&c.to_string()),
                    class.bounds(c),
                    "class {class:?} char {c:?}"
                );
            }
        }
    }

    #[test]
    fn exact_hex_run_is_returned_whole() {
        let token = hex(64);
        let text = format!("key: {token} (256 bits)");
        let found = scan(&text, TokenClass::HexUpper64).next().unwrap();
        assert_eq!(found.text, token);
        assert_eq!(found.range, Range { start: 5, end: 69 });
    }

    #[test]
    fn longer_hex_run_is_rejected_not_clipped() {
        let text = format!("x {} y", hex(65));
        assert_eq!(scan(&text, TokenClass::HexUpper64).count(), 0);
        assert_eq!(extract(&text).unwrap_err(), ParseError::NoHexMatch);
    }

    #[test]
    fn lowercase_hex_neighbour_extends_the_run() {
        let text = format!("x a{} y", hex(64));
        assert_eq!(scan(&text, TokenClass::HexUpper64).count(), 0);
    }

    #[test]
    fn hex_run_needs_uppercase_body() {
        let text = format!("x {} y", hex(64).to_ascii_lowercase());
        assert_eq!(scan(&text, TokenClass::HexUpper64).count(), 0);
    }

    #[test]
    fn first_alnum_run_wins() {
        let first = alnum(63);
        let second: String = first.chars().rev().collect();
        let text = format!("{} | {first} | {second}", alnum(64));
        let found = scan(&text, TokenClass::Alnum63).next().unwrap();
        assert_eq!(found.text, first);
    }

    #[test]
    fn printable_runs_are_listed_in_order() {
        let a = alnum(63);
        let b = format!("{}@", alnum(62));
        let text = format!("{a}\n{b}\n{}", "!".repeat(64));
        let runs: Vec<_> = scan(&text, TokenClass::PrintableAscii63).map(|t| t.text).collect();
        assert_eq!(runs, vec![a, b]);
    }

    #[test]
    fn extraction_from_candidates_matches_a_fresh_scan() {
        let text = format!("{} {} {}@ {}", hex(64), alnum(63), alnum(62), hex(65));
        let candidates: Vec<_> = TokenClass::ALL.into_iter().flat_map(|class| scan(&text, class)).collect();
        assert_eq!(Extraction::from_candidates(&candidates).unwrap(), extract(&text).unwrap());

        let no_hex: Vec<_> = candidates.into_iter().filter(|c| c.class != TokenClass::HexUpper64).collect();
        assert_eq!(Extraction::from_candidates(&no_hex).unwrap_err(), ParseError::NoHexMatch);
    }

    #[test]
    fn missing_alphanumeric_is_structural() {
        let text = format!("{} only", hex(64));
        assert_eq!(extract(&text).unwrap_err(), ParseError::NoAlphanumericMatch);
    }
}
