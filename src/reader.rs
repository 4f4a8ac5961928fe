//! Reading side: open a finished PDF and walk its pages for embedded records.
//!
//! [`DocumentReader`] wraps a parsed [`lopdf::Document`] and exposes it
//! through the [`PageTextSource`] trait; [`scan_document`] walks any source
//! page by page. A reader owns its document handle, so any number of reader
//! threads can work independently as long as each opens its own.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::backend::PageTextSource;
use crate::codec::{self, DocumentData};
use crate::error::{DocumentReadError, PageDataError};

/// A finished PDF opened for page-by-page text extraction.
pub struct DocumentReader {
    doc: lopdf::Document,
    /// Ordered 1-based page numbers, cached at open time.
    pages: Vec<u32>,
}

impl DocumentReader {
    /// Open and parse a PDF file.
    ///
    /// # Errors
    /// [`PageDataError::Open`] if the file cannot be read or is not a
    /// parseable PDF.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PageDataError> {
        let path = path.as_ref();
        let doc = lopdf::Document::load(path).map_err(|e| PageDataError::Open {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Parse a PDF already held in memory.
    ///
    /// # Errors
    /// [`PageDataError::Parse`] if the bytes are not a parseable PDF.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PageDataError> {
        let doc = lopdf::Document::load_mem(bytes).map_err(|e| PageDataError::Parse {
            detail: e.to_string(),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already-parsed document.
    pub fn from_document(doc: lopdf::Document) -> Self {
        let pages: Vec<u32> = doc.get_pages().into_keys().collect();
        info!(pages = pages.len(), "PDF loaded");
        Self { doc, pages }
    }
}

impl std::fmt::Debug for DocumentReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentReader")
            .field("page_count", &self.pages.len())
            .finish_non_exhaustive()
    }
}

impl PageTextSource for DocumentReader {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page_index: usize) -> Result<String, PageDataError> {
        let number =
            self.pages
                .get(page_index)
                .copied()
                .ok_or(PageDataError::PageOutOfRange {
                    page: page_index,
                    total: self.pages.len(),
                })?;
        self.doc
            .extract_text(&[number])
            .map_err(|e| PageDataError::PageText {
                page: page_index,
                detail: e.to_string(),
            })
    }
}

/// Walk every page of a source, decoding all embedded records.
///
/// A page text fetch failure aborts the walk immediately; the returned
/// [`DocumentReadError`] carries everything decoded before the failure.
/// Token-level decode failures never abort: they are collected per page in
/// [`crate::codec::PageScan::errors`] and logged.
pub fn scan_document<S: PageTextSource>(source: &S) -> Result<DocumentData, DocumentReadError> {
    let mut data = DocumentData::default();

    for index in 0..source.page_count() {
        let text = match source.page_text(index) {
            Ok(text) => text,
            Err(source) => {
                return Err(DocumentReadError {
                    partial: data,
                    source,
                })
            }
        };

        let scan = codec::decode_page_text(&text);
        for error in &scan.errors {
            warn!(page = index, %error, "skipping undecodable token");
        }
        debug!(
            page = index,
            records = scan.records.len(),
            errors = scan.errors.len(),
            "page scanned"
        );
        data.pages.insert(index, scan);
    }

    info!(
        pages = data.pages.len(),
        records = data.record_count(),
        errors = data.error_count(),
        "document scan complete"
    );
    Ok(data)
}

/// Open a PDF file and decode every embedded record, grouped by page index.
///
/// Convenience wrapper: [`DocumentReader::open`] followed by
/// [`scan_document`]. An open failure is reported with an empty partial
/// result.
pub fn read_document(path: impl AsRef<Path>) -> Result<DocumentData, DocumentReadError> {
    let reader = DocumentReader::open(path).map_err(|source| DocumentReadError {
        partial: DocumentData::default(),
        source,
    })?;
    scan_document(&reader)
}
