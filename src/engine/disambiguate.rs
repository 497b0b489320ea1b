//! Picking the ASCII password out of scan C.
//!
//! Printable ASCII is a superset of the alphanumeric class, so scan C also
//! reports the alphanumeric password (and would report any hex token of the
//! same width). Those are excluded by exact string equality. The first
//! remaining candidate that actually uses a special character wins; if none
//! does, the parse fails rather than guessing.

use crate::{CandidateToken, ParseError, PasswordSet};
use tracing::debug;

use super::extract::Extraction;

pub fn disambiguate(extraction: &Extraction) -> Result<PasswordSet, ParseError> {
    let claimed = [extraction.hex.text.as_str(), extraction.alphanumeric.text.as_str()];

    let unclaimed: Vec<&CandidateToken> =
        extraction.ascii.iter().filter(|candidate| !claimed.contains(&candidate.text.as_str())).collect();
    debug!(
        target: "passgrab",
        candidates = extraction.ascii.len(),
        excluded = extraction.ascii.len() - unclaimed.len(),
        "disambiguating ascii candidates"
    );

    let Some(ascii) = unclaimed.into_iter().find(|candidate| candidate.has_special()) else {
        return Err(ParseError::NoQualifyingAsciiMatch);
    };

    PasswordSet::new(extraction.hex.text.clone(), ascii.text.clone(), extraction.alphanumeric.text.clone())
}
