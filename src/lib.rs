use serde::Serialize;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;


pub use api::{EncodingHints, ParseOutcome, ParseReport, PasswordSet, StageTimings, parse, parse_text, parse_verbose};
pub use engine::{Extraction, decode_entities, decode_page, disambiguate, extract, normalize, sanitize, scan};
pub use error::{FailureKind, ParseError};

// --- Character classes -------------------------------------------------------

bitflags::bitflags! {
    /// Classes a single character belongs to. A character may carry several
    /// bits at once (`'A'` is both `UPPER` and `HEX_UPPER`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharClass: u8 {
        const DIGIT     = 1 << 0;
        const HEX_UPPER = 1 << 1;
        const HEX_LOWER = 1 << 2;
        const UPPER     = 1 << 3;
        const LOWER     = 1 << 4;
        /// Printable ASCII outside `[A-Za-z0-9]`.
        const SPECIAL   = 1 << 5;
    }
}

impl CharClass {
    pub const ALNUM: CharClass = CharClass::DIGIT.union(CharClass::UPPER).union(CharClass::LOWER);
    pub const HEX: CharClass = CharClass::DIGIT.union(CharClass::HEX_UPPER).union(CharClass::HEX_LOWER);

    /// Classify `c`. Anything outside printable ASCII (`!`..=`~`) is empty.
    pub fn of(c: char) -> CharClass {
        match c {
            '0'..='9' => CharClass::DIGIT,
            'A'..='F' => CharClass::UPPER | CharClass::HEX_UPPER,
            'G'..='Z' => CharClass::UPPER,
            'a'..='f' => CharClass::LOWER | CharClass::HEX_LOWER,
            'g'..='z' => CharClass::LOWER,
            '!'..='~' => CharClass::SPECIAL,
            _ => CharClass::empty(),
        }
    }
}

// --- Token classes -----------------------------------------------------------

/// The three password shapes embedded in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenClass {
    /// 64 uppercase hexadecimal characters (256 bits).
    HexUpper64,
    /// 63 characters from `[A-Za-z0-9]`.
    Alnum63,
    /// 63 printable ASCII characters (`!`..=`~`).
    PrintableAscii63,
}

impl TokenClass {
    pub const ALL: [TokenClass; 3] = [TokenClass::HexUpper64, TokenClass::Alnum63, TokenClass::PrintableAscii63];

    /// Exact token length in characters (and bytes; every class is ASCII).
    pub const fn width(self) -> usize {
        match self {
            TokenClass::HexUpper64 => 64,
            TokenClass::Alnum63 | TokenClass::PrintableAscii63 => 63,
        }
    }

    /// Whether `c` may appear inside a token of this class.
    pub fn admits(self, c: char) -> bool {
        let class = CharClass::of(c);
        match self {
            TokenClass::HexUpper64 => class.intersects(CharClass::DIGIT | CharClass::HEX_UPPER),
            TokenClass::Alnum63 => class.intersects(CharClass::ALNUM),
            TokenClass::PrintableAscii63 => !class.is_empty(),
        }
    }

    /// Whether `c` next to a token would extend its run.
    ///
    /// For hex this is wider than the body: a lowercase hex digit still
    /// counts as part of the run, so an uppercase run touching one is
    /// rejected rather than clipped.
    pub fn bounds(self, c: char) -> bool {
        match self {
            TokenClass::HexUpper64 => CharClass::of(c).intersects(CharClass::HEX),
            TokenClass::Alnum63 | TokenClass::PrintableAscii63 => self.admits(c),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenClass::HexUpper64 => "hex",
            TokenClass::Alnum63 => "alphanumeric",
            TokenClass::PrintableAscii63 => "ascii",
        }
    }
}

/// Byte span inside the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// A fixed-length substring of the normalized text that satisfies one
/// class's body and boundary constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateToken {
    pub class: TokenClass,
    pub range: Range,
    pub text: String,
}

impl CandidateToken {
    /// Whether the token uses at least one character outside `[A-Za-z0-9]`.
    pub fn has_special(&self) -> bool {
        self.text.chars().any(|c| CharClass::of(c).contains(CharClass::SPECIAL))
    }
}
