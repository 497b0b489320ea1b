//! Stage orchestration.
//!
//! `Pipeline` owns nothing but borrowed input; building one is free, and two
//! runs over the same input always produce the same outcome.
//!
//! ```text
//! Pipeline::from_bytes ─┐
//!                       ├─▶ run()              ─▶ ParseOutcome
//! Pipeline::from_text  ─┘   run_with_metrics() ─▶ RunResult
//! ```

use super::disambiguate::disambiguate;
use super::encoding::decode_page;
use super::entities::decode_entities;
use super::extract::{Extraction, extract, scan};
use super::metrics::{RunMetrics, RunResult};
use super::sanitize::sanitize;
use crate::{EncodingHints, ParseError, ParseOutcome, TokenClass};
use std::borrow::Cow;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum Page<'a> {
    Raw { bytes: &'a [u8], hints: &'a EncodingHints },
    Text(&'a str),
}

#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    page: Page<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn from_bytes(bytes: &'a [u8], hints: &'a EncodingHints) -> Self {
        Self { page: Page::Raw { bytes, hints } }
    }

    pub fn from_text(text: &'a str) -> Self {
        Self { page: Page::Text(text) }
    }

    fn decode(&self) -> Result<Cow<'a, str>, ParseError> {
        match self.page {
            Page::Raw { bytes, hints } => decode_page(bytes, hints).map(Cow::Owned),
            Page::Text(text) => Ok(Cow::Borrowed(text)),
        }
    }

    pub fn run(&self) -> ParseOutcome {
        let page = self.decode()?;
        let text = decode_entities(&sanitize(&page));
        let extraction = extract(&text)?;
        disambiguate(&extraction)
    }

    /// Same as [`Pipeline::run`], timing each stage and keeping every
    /// candidate the scans found.
    pub fn run_with_metrics(&self) -> RunResult {
        let t0 = Instant::now();
        let mut metrics = RunMetrics::default();

        let stage = Instant::now();
        let page = match self.decode() {
            Ok(page) => page,
            Err(err) => {
                metrics.decode = stage.elapsed();
                metrics.total = t0.elapsed();
                return RunResult { outcome: Err(err), metrics, normalized_len: None, candidates: Vec::new() };
            }
        };
        metrics.decode = stage.elapsed();

        let stage = Instant::now();
        let sanitized = sanitize(&page);
        metrics.sanitize = stage.elapsed();

        let stage = Instant::now();
        let text = decode_entities(&sanitized);
        metrics.entities = stage.elapsed();

        let stage = Instant::now();
        let candidates: Vec<_> = TokenClass::ALL.into_iter().flat_map(|class| scan(&text, class)).collect();
        let extraction = Extraction::from_candidates(&candidates);
        metrics.extract = stage.elapsed();

        let stage = Instant::now();
        let outcome = extraction.and_then(|extraction| disambiguate(&extraction));
        metrics.disambiguate = stage.elapsed();
        metrics.total = t0.elapsed();

        debug!(
            target: "passgrab",
            total = ?metrics.total,
            normalized = text.len(),
            candidates = candidates.len(),
            ok = outcome.is_ok(),
            "pipeline finished"
        );

        RunResult { outcome, metrics, normalized_len: Some(text.len()), candidates }
    }
}
