//! The record family embedded in a page: [`PageData`] and its nested parts.
//!
//! Every struct here round-trips losslessly through JSON. Decoding is
//! deliberately permissive: unknown fields are ignored and missing fields fall
//! back to their zero/empty form (`#[serde(default)]`), so a reader built
//! against this version can still open records written by older or newer
//! tooling. An embedded record is never rewritten in place; a workflow that
//! wants to amend one embeds a *new* record whose processing history points at
//! the previous step's id.
//!
//! Wire field names follow the deployed camelCase format, with unique ids
//! kept under their historical `"UUID"` tag.

use serde::{Deserialize, Serialize};

/// The root record attached to one physical page.
///
/// There are no required fields: `PageData::default()` is a valid, empty
/// record, and any syntactically valid JSON object decodes into one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageData {
    pub exam: ExamDetails,
    pub author: AuthorDetails,
    pub page: PageDetails,
    pub contact: ContactDetails,
    pub submission: SubmissionDetails,
    pub questions: Vec<QuestionDetails>,
    pub processing: Vec<ProcessingDetails>,
    pub custom: Vec<CustomDetails>,
}

/// Which exam sitting this page belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExamDetails {
    pub course_code: String,
    /// Diet/sitting identifier, e.g. `"April 2020"`.
    pub diet: String,
    #[serde(rename = "UUID")]
    pub uuid: String,
}

/// The candidate who produced the page.
///
/// `uuid` may already hold an anonymized placeholder rather than a real
/// identity; `anonymous` records whether that substitution happened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorDetails {
    pub exam_number: String,
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub anonymous: bool,
}

/// Identity of the physical page itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageDetails {
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// 1-based page number within the submission.
    pub number: u32,
}

/// A person responsible for some step: author contact, marker, processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactDetails {
    pub name: String,
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub email: String,
    pub address: String,
}

/// How the page arrived: the received file and when it was ingested.
///
/// This is the identity-revealing part of a record (original filenames tend
/// to carry exam numbers), which is why redaction clears it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionDetails {
    /// Filename of the submission as originally received.
    pub original: String,
    /// Epoch seconds at ingestion.
    pub received: i64,
    #[serde(rename = "UUID")]
    pub uuid: String,
}

/// One question (or question part) on the page.
///
/// `section` holds the lettered part, e.g. `"(a)"`, and `number` the numeric
/// one; deeper part/subpart structure nests recursively through `parts`, owned
/// strictly parent-to-child.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionDetails {
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Display name used in dropboxes and reports.
    pub name: String,
    pub section: String,
    pub number: u32,
    pub parts: Vec<QuestionDetails>,
    pub marks_available: f64,
    pub marks_awarded: f64,
    #[serde(rename = "markers")]
    pub marking: Vec<MarkingAction>,
    #[serde(rename = "moderators")]
    pub moderating: Vec<MarkingAction>,
    #[serde(rename = "checkers")]
    pub checking: Vec<MarkingAction>,
}

/// One marking, moderating, or checking pass over a question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkingAction {
    pub contact: ContactDetails,
    pub mark: MarkDetails,
    pub done: bool,
    /// Epoch seconds at completion.
    pub unix_time: i64,
    pub custom: CustomDetails,
}

/// The scores attached to a [`MarkingAction`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkDetails {
    pub given: f64,
    pub available: f64,
    pub comment: f64,
}

/// A free-form key/value pair for data the schema does not model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomDetails {
    pub key: String,
    pub value: String,
}

/// One step in the processing history of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessingDetails {
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// The `uuid` of the processing step this one supersedes, if any.
    pub previous: String,
    /// Epoch seconds at which the step ran.
    pub unix_time: i64,
    pub name: String,
    pub parameters: Vec<ParameterDetails>,
    pub by: ContactDetails,
}

/// A named parameter of a [`ProcessingDetails`] step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterDetails {
    pub name: String,
    pub value: String,
    pub sequence: u32,
}
