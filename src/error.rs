//! Error types for the gradex-pagedata library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PageDataError`] — **Fatal**: the operation in progress cannot continue
//!   (unreadable file, page text extraction failure, serialisation failure).
//!   Returned as `Err(PageDataError)` from the top-level functions.
//!
//! * [`TokenError`] — **Non-fatal**: one embedded token on a page failed to
//!   decode as JSON, but the remaining tokens are fine. Stored inside
//!   [`crate::codec::PageScan`] so callers can inspect partial success rather
//!   than losing a whole page to one corrupt token.
//!
//! A whole-document walk that aborts mid-way wraps its fatal error in
//! [`DocumentReadError`], which also carries everything decoded before the
//! failure.

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::DocumentData;

/// All fatal errors returned by the gradex-pagedata library.
///
/// Token-level decode failures use [`TokenError`] and are stored in
/// [`crate::codec::PageScan`] rather than propagated here.
#[derive(Debug, Error)]
pub enum PageDataError {
    // ── Reader errors ─────────────────────────────────────────────────────
    /// The file could not be opened or parsed as a PDF.
    #[error("failed to open PDF '{path}': {detail}")]
    Open { path: PathBuf, detail: String },

    /// An in-memory buffer could not be parsed as a PDF.
    #[error("not a readable PDF: {detail}")]
    Parse { detail: String },

    /// A page index beyond the document's page count was requested.
    #[error("page index {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// The engine failed to extract text from a specific page.
    #[error("text extraction failed on page {page}: {detail}")]
    PageText { page: usize, detail: String },

    // ── Writer errors ─────────────────────────────────────────────────────
    /// A record could not be serialised to JSON before embedding.
    #[error("page data could not be serialised: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// A text run was requested before any page was opened on the builder.
    #[error("no open page to draw on; call add_page first")]
    NoOpenPage,

    /// The engine failed to assemble or encode the document under construction.
    #[error("document composition failed: {detail}")]
    Compose { detail: String },

    /// The finished document could not be written to disk.
    #[error("failed to write output file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single embedded token that failed to decode as JSON.
///
/// Non-fatal: collected in [`crate::codec::PageScan::errors`] while the
/// remaining tokens on the same page are still decoded.
#[derive(Debug, Error)]
#[error("token {index}: {source}")]
pub struct TokenError {
    /// Zero-based position of the token in scan order on its page.
    pub index: usize,
    #[source]
    pub source: serde_json::Error,
}

/// A whole-document walk that hit a fatal error part-way through.
///
/// Opening the file, reading the page count, or fetching a page's text can
/// each fail; the walk stops at the first such failure, but everything decoded
/// up to that point is kept in [`partial`](Self::partial) so a caller can
/// still salvage the readable pages.
#[derive(Debug, Error)]
#[error("document walk aborted: {source}")]
pub struct DocumentReadError {
    /// Pages decoded before the failure, keyed by 0-based page index.
    pub partial: DocumentData,
    #[source]
    pub source: PageDataError,
}
