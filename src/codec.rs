//! Encode records into wrapped payloads and decode them back out of page text.
//!
//! Encoding is `serde_json` plus [`crate::scan::wrap`]; decoding runs the
//! scanner over a page's text and JSON-decodes each token independently.
//!
//! ## Decode error policy
//!
//! Historically the single-page path kept only the *last* decode error while
//! the whole-document path swallowed them all. Here both paths follow one
//! policy: every token that fails to decode is kept as a [`TokenError`] in
//! [`PageScan::errors`], next to every record that did decode. Callers choose
//! their own tolerance: ignore the errors, log them, or treat any as fatal.

use std::collections::BTreeMap;

use tracing::debug;

use crate::backend::{HiddenTextSink, PageTextSource};
use crate::error::{PageDataError, TokenError};
use crate::scan;
use crate::types::PageData;

/// The decode result for one page: every record that decoded, plus a
/// [`TokenError`] for every token that did not.
#[derive(Debug, Default)]
pub struct PageScan {
    /// Successfully decoded records, in page order.
    pub records: Vec<PageData>,
    /// Tokens that failed to decode, with their scan-order index.
    pub errors: Vec<TokenError>,
}

impl PageScan {
    /// True when every token on the page decoded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decoded records for a whole document, keyed by 0-based page index.
///
/// Every walked page has an entry, including pages that carried no tokens.
#[derive(Debug, Default)]
pub struct DocumentData {
    pub pages: BTreeMap<usize, PageScan>,
}

impl DocumentData {
    /// Total records decoded across all pages.
    pub fn record_count(&self) -> usize {
        self.pages.values().map(|scan| scan.records.len()).sum()
    }

    /// Total tokens that failed to decode across all pages.
    pub fn error_count(&self) -> usize {
        self.pages.values().map(|scan| scan.errors.len()).sum()
    }

    /// The records decoded on one page; empty for unknown indices.
    pub fn records(&self, page_index: usize) -> &[PageData] {
        self.pages
            .get(&page_index)
            .map(|scan| scan.records.as_slice())
            .unwrap_or(&[])
    }
}

/// Serialise a record and wrap it in the markers, ready for embedding.
///
/// # Errors
/// Returns [`PageDataError::Encode`] if the record cannot be serialised
/// (which `PageData` by construction cannot trigger, but the signature
/// follows the serialiser's).
pub fn encode(data: &PageData) -> Result<String, PageDataError> {
    let json = serde_json::to_string(data).map_err(|source| PageDataError::Encode { source })?;
    Ok(scan::wrap(&json))
}

/// Serialise a record and embed it on the sink's current page.
pub fn write_page_data<S: HiddenTextSink>(
    sink: &mut S,
    data: &PageData,
) -> Result<(), PageDataError> {
    let wrapped = encode(data)?;
    sink.append_hidden_text(&wrapped)
}

/// Wrap a raw payload string and embed it on the sink's current page.
///
/// The payload must not contain the literal marker strings. Useful for
/// tooling that re-embeds tokens it did not decode.
pub fn write_page_string<S: HiddenTextSink>(
    sink: &mut S,
    payload: &str,
) -> Result<(), PageDataError> {
    sink.append_hidden_text(&scan::wrap(payload))
}

/// Decode every token found in one page's extracted text.
///
/// Decoding the same text twice yields identical results; a token that fails
/// to decode never stops its neighbours from decoding.
pub fn decode_page_text(text: &str) -> PageScan {
    let mut page = PageScan::default();

    for (index, token) in scan::extract_tokens(text).into_iter().enumerate() {
        match serde_json::from_str::<PageData>(&token) {
            Ok(record) => page.records.push(record),
            Err(source) => page.errors.push(TokenError { index, source }),
        }
    }

    page
}

/// The raw token strings embedded on one page, in page order.
pub fn page_tokens<S: PageTextSource>(
    source: &S,
    page_index: usize,
) -> Result<Vec<String>, PageDataError> {
    let text = source.page_text(page_index)?;
    Ok(scan::extract_tokens(&text))
}

/// Fetch one page's text from the source and decode every token on it.
pub fn scan_page<S: PageTextSource>(
    source: &S,
    page_index: usize,
) -> Result<PageScan, PageDataError> {
    let text = source.page_text(page_index)?;
    let page = decode_page_text(&text);
    debug!(
        page = page_index,
        records = page.records.len(),
        errors = page.errors.len(),
        "page scanned"
    );
    Ok(page)
}
