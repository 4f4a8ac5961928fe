//! Marker scanner: find every payload bracketed by the literal tags.
//!
//! The embedded format is intentionally primitive. Each payload is wrapped as
//! `<gradex-pagedata>…</gradex-pagedata>` with no escaping, nesting, or
//! versioning; changing the marker strings would make existing documents
//! unreadable by deployed readers. A payload must therefore never itself
//! contain the literal marker text. JSON happens to make that easy, but it is
//! a caller-maintained precondition, not something the scanner validates.

/// Literal marker opening an embedded payload.
pub const START_TAG: &str = "<gradex-pagedata>";

/// Literal marker closing an embedded payload.
pub const END_TAG: &str = "</gradex-pagedata>";

/// Wrap a payload in the start/end markers, ready for embedding.
pub fn wrap(payload: &str) -> String {
    let mut out = String::with_capacity(START_TAG.len() + payload.len() + END_TAG.len());
    out.push_str(START_TAG);
    out.push_str(payload);
    out.push_str(END_TAG);
    out
}

/// Extract every substring strictly between a matched start/end marker pair.
///
/// Scans left to right, non-overlapping, first match wins. A start marker with
/// no matching end marker ends the scan: the dangling marker and any trailing
/// text are silently discarded rather than reported. The result preserves
/// page order and may be empty.
pub fn extract_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(START_TAG) {
        let body = &rest[start + START_TAG.len()..];
        let Some(end) = body.find(END_TAG) else {
            // Unterminated token: drop it and stop.
            break;
        };
        tokens.push(body[..end].to_string());
        rest = &body[end + END_TAG.len()..];
    }

    tokens
}
