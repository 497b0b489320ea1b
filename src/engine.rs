//! Normalization, extraction and disambiguation engine.
//!
//! Recovering the passwords from a page is a strictly forward pipeline. Every
//! stage is a pure function of the previous stage's output; nothing survives
//! between calls.
//!
//! ```text
//! bytes + EncodingHints
//!        │  decode_page                  (encoding.rs)
//!        v
//!   page text
//!        │  sanitize                     (sanitize.rs)
//!        │    <script>, <style>, comments ─▶ " "
//!        │    <wbr>                        ─▶ ""
//!        │    any other tag                ─▶ " "
//!        v
//!   plain text with entities
//!        │  decode_entities              (entities.rs)
//!        v
//!   normalized text
//!        │  extract                      (extract.rs)
//!        │    scan A: first 64-hex run      ── none ─▶ NoHexMatch
//!        │    scan B: first 63-alnum run    ── none ─▶ NoAlphanumericMatch
//!        │    scan C: every 63-printable run
//!        v
//!   Extraction
//!        │  disambiguate                 (disambiguate.rs)
//!        │    drop runs already claimed by A or B
//!        │    first remaining run with a special character
//!        v
//!   PasswordSet | ParseError
//! ```
//!
//! ## Responsibilities by module
//!
//! - `encoding.rs`: bytes to text (UTF-8, then Latin-1).
//! - `sanitize.rs`: markup removal. Step order matters: stripping tags before
//!   dropping script blocks would leak script bodies into the search space.
//! - `entities.rs`: single-pass character reference decoding.
//! - `extract.rs`: boundary-aware fixed-length scans.
//! - `disambiguate.rs`: resolves the alphanumeric ⊂ printable overlap.
//! - `pipeline.rs`: runs the stages in order, optionally timing each one.
//! - `metrics.rs`: per-stage timings for verbose runs.
//!
//! ## Debugging
//!
//! Every stage emits `tracing` events under the `passgrab` target. Run the
//! CLI with `RUST_LOG=passgrab=trace` to see candidate spans as they are found.

#[path = "engine/disambiguate.rs"]
mod disambiguate;
#[path = "engine/encoding.rs"]
mod encoding;
#[path = "engine/entities.rs"]
mod entities;
#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pipeline.rs"]
mod pipeline;
#[path = "engine/sanitize.rs"]
mod sanitize;

pub use disambiguate::disambiguate;
pub use encoding::decode_page;
pub use entities::decode_entities;
pub use extract::{Extraction, extract, scan};
pub use metrics::RunResult;
pub use pipeline::Pipeline;
pub use sanitize::sanitize;

/// Sanitize then decode entities: raw page text to normalized text.
pub fn normalize(html: &str) -> String {
    decode_entities(&sanitize(html))
}
