//! # gradex-pagedata
//!
//! Hide structured exam-marking metadata inside PDF pages and get it back out.
//!
//! ## Why this crate?
//!
//! An exam-marking pipeline shuttles scanned scripts between ingestion,
//! markers, moderators, and checkers. Sidecar files get separated from their
//! PDFs; filename conventions get mangled. Instead, this crate embeds each
//! page's provenance, authorship, question/marking, and processing-history
//! record *inside the page itself*, as a JSON payload drawn at an invisible
//! font size far off the page area. The document looks and prints identically,
//! but any tool that can extract page text can recover the records.
//!
//! ## Pipeline overview
//!
//! ```text
//! PageData
//!  │
//!  ├─ 1. Encode   serde_json → "<gradex-pagedata>{…}</gradex-pagedata>"
//!  ├─ 2. Embed    invisible text run on the page (DocumentBuilder)
//!  ├─ 3. Ship     ordinary PDF serialisation, nothing special to carry
//!  ├─ 4. Extract  page text via the PDF engine (DocumentReader)
//!  ├─ 5. Scan     find every marker-delimited token (scan::extract_tokens)
//!  └─ 6. Decode   JSON → PageData, per-token errors collected, not fatal
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use gradex_pagedata::{codec, scan_document, DocumentBuilder, DocumentReader, PageData};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Write: one record hidden on one page.
//!     let mut builder = DocumentBuilder::new();
//!     builder.add_page();
//!     let mut record = PageData::default();
//!     record.exam.course_code = "ENGI99887".into();
//!     record.page.number = 1;
//!     codec::write_page_data(&mut builder, &record)?;
//!     let bytes = builder.to_bytes()?;
//!
//!     // Read it back from the finished document.
//!     let reader = DocumentReader::from_bytes(&bytes)?;
//!     let data = scan_document(&reader)?;
//!     assert_eq!(data.record_count(), 1);
//!     assert_eq!(data.records(0)[0].exam.course_code, "ENGI99887");
//!     Ok(())
//! }
//! ```
//!
//! ## Record lifecycle
//!
//! Records are immutable once embedded. A later processing stage does not
//! rewrite a record in place; it embeds a *new* one whose
//! [`ProcessingDetails::previous`](types::ProcessingDetails) points at the
//! prior step's id. Readers therefore see zero or more records per page and
//! decide which generation they care about.
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pagedata` inspector binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! gradex-pagedata = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod codec;
pub mod error;
pub mod reader;
pub mod redact;
pub mod scan;
pub mod types;
pub mod writer;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{HiddenTextSink, PageTextSource};
pub use codec::{DocumentData, PageScan};
pub use error::{DocumentReadError, PageDataError, TokenError};
pub use reader::{read_document, scan_document, DocumentReader};
pub use redact::strip_author_identity;
pub use types::{
    AuthorDetails, ContactDetails, CustomDetails, ExamDetails, MarkDetails, MarkingAction,
    PageData, PageDetails, ParameterDetails, ProcessingDetails, QuestionDetails,
    SubmissionDetails,
};
pub use writer::{DocumentBuilder, Placement};
