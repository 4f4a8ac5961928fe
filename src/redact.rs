//! Redaction: a reduced-information copy of a record for co-operating parties
//! not entitled to full identity data.

use crate::types::{AuthorDetails, PageData, SubmissionDetails};

/// Produce a copy of `data` with author identity and submission metadata
/// stripped out.
///
/// Kept as-is: exam, page, contact, questions, processing, custom. The author
/// is reduced to its anonymization flag alone, and the submission details are
/// cleared to their zero value regardless of input. Pure and total: there is
/// no failure mode and the input is never mutated.
///
/// Free-form custom fields on questions, processing steps, and the record
/// itself pass through untouched, so anything identity-revealing placed there
/// is the embedding workflow's problem, not this function's.
pub fn strip_author_identity(data: &PageData) -> PageData {
    PageData {
        exam: data.exam.clone(),
        author: AuthorDetails {
            anonymous: data.author.anonymous,
            ..Default::default()
        },
        page: data.page.clone(),
        contact: data.contact.clone(),
        submission: SubmissionDetails::default(),
        questions: data.questions.clone(),
        processing: data.processing.clone(),
        custom: data.custom.clone(),
    }
}
