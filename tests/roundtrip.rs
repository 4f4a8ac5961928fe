//! End-to-end integration tests for gradex-pagedata.
//!
//! These go through the real PDF engine: compose a document, serialise it to
//! bytes (or disk), parse those bytes back, extract page text, and decode.
//! No fakes anywhere; if the invisible-run format stops surviving a real
//! serialise/parse cycle, these are the tests that notice.

use gradex_pagedata::{
    codec, read_document, scan_document, strip_author_identity, ContactDetails, CustomDetails,
    DocumentBuilder, DocumentReader, MarkDetails, MarkingAction, PageData, ParameterDetails,
    ProcessingDetails, QuestionDetails,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Serialise the builder and parse the bytes back, as a reader would.
fn reload(builder: &DocumentBuilder) -> DocumentReader {
    let bytes = builder.to_bytes().expect("document must serialise");
    assert!(bytes.starts_with(b"%PDF-"));
    DocumentReader::from_bytes(&bytes).expect("serialised document must parse")
}

/// A record exercising every nested part of the data model.
fn sample_page_data() -> PageData {
    let marker = ContactDetails {
        name: "A. Marker".into(),
        uuid: "contact-77".into(),
        email: "marker@example.org".into(),
        address: "Rm 2.12, Sanderson".into(),
    };

    let mut pd = PageData::default();
    pd.exam.course_code = "ENGI99887".into();
    pd.exam.diet = "April 2020".into();
    pd.exam.uuid = "exam-42".into();
    pd.author.exam_number = "B12345".into();
    pd.author.uuid = "author-9".into();
    pd.page.uuid = "page-3".into();
    pd.page.number = 3;
    pd.contact = marker.clone();
    pd.submission.original = "B12345-script.pdf".into();
    pd.submission.received = 1_586_822_400;
    pd.submission.uuid = "sub-5".into();

    pd.questions.push(QuestionDetails {
        uuid: "q1".into(),
        name: "Q1".into(),
        section: String::new(),
        number: 1,
        parts: vec![QuestionDetails {
            uuid: "q1a".into(),
            section: "a".into(),
            marks_available: 5.0,
            parts: vec![QuestionDetails {
                uuid: "q1a-i".into(),
                section: "i".into(),
                marks_available: 2.0,
                ..Default::default()
            }],
            ..Default::default()
        }],
        marks_available: 20.0,
        marks_awarded: 17.5,
        marking: vec![MarkingAction {
            contact: marker.clone(),
            mark: MarkDetails {
                given: 17.5,
                available: 20.0,
                comment: 0.5,
            },
            done: true,
            unix_time: 1_586_908_800,
            custom: CustomDetails {
                key: "pen".into(),
                value: "red".into(),
            },
        }],
        ..Default::default()
    });

    pd.processing.push(ProcessingDetails {
        uuid: "proc-2".into(),
        previous: "proc-1".into(),
        unix_time: 1_586_995_200,
        name: "flatten".into(),
        parameters: vec![ParameterDetails {
            name: "dpi".into(),
            value: "300".into(),
            sequence: 0,
        }],
        by: marker,
    });

    pd.custom.push(CustomDetails {
        key: "batch".into(),
        value: "a".into(),
    });

    pd
}

// ── Raw payload round-trips (string level) ───────────────────────────────────

#[test]
fn two_payloads_per_page_survive_serialisation() {
    let text1a = r#"{"exam":"ENGI99887","number":"B12345","page":1,"Batch":"a"}"#;
    let text1b = r#"{"exam":"ENGI99886","number":"B12345","page":1,"Batch":"xx"}"#;
    let text2a = r#"{"exam":"ENGI99887","number":"B12345","page":2,"Batch":"a"}"#;
    let text2b = r#"{"exam":"ENGI99897","number":"B12345","page":2,"Batch":"b"}"#;

    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_string(&mut builder, text1a).unwrap();
    codec::write_page_string(&mut builder, text1b).unwrap();
    builder.add_page();
    codec::write_page_string(&mut builder, text2a).unwrap();
    codec::write_page_string(&mut builder, text2b).unwrap();

    let reader = reload(&builder);

    let page1 = codec::page_tokens(&reader, 0).unwrap();
    assert_eq!(page1.len(), 2, "wrong number of page data tokens");
    assert!(page1.contains(&text1a.to_string()));
    assert!(page1.contains(&text1b.to_string()));

    let page2 = codec::page_tokens(&reader, 1).unwrap();
    assert_eq!(page2.len(), 2, "wrong number of page data tokens");
    assert!(page2.contains(&text2a.to_string()));
    assert!(page2.contains(&text2b.to_string()));
}

#[test]
fn long_payloads_survive_serialisation() {
    let text1a = "X".repeat(9999);
    let text1b = "Y".repeat(9999);

    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_string(&mut builder, &text1a).unwrap();
    codec::write_page_string(&mut builder, &text1b).unwrap();

    let tokens = codec::page_tokens(&reload(&builder), 0).unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(tokens.contains(&text1a));
    assert!(tokens.contains(&text1b));
}

#[test]
fn payloads_coexist_with_visible_text() {
    let payload = r#"{"exam":"ENGI99887","number":"B12345","page":1}"#;

    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_string(&mut builder, payload).unwrap();
    builder
        .add_text("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", 12.0, 100.0, 700.0)
        .unwrap();

    let reader = reload(&builder);
    let tokens = codec::page_tokens(&reader, 0).unwrap();
    assert_eq!(tokens, vec![payload.to_string()]);

    // The visible text really is on the page, just not inside any token.
    let text = {
        use gradex_pagedata::PageTextSource;
        reader.page_text(0).unwrap()
    };
    assert!(text.contains("AAAAAAA"));
}

#[test]
fn tokens_on_one_page_keep_write_order() {
    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_string(&mut builder, "first").unwrap();
    codec::write_page_string(&mut builder, "second").unwrap();
    codec::write_page_string(&mut builder, "third").unwrap();

    let tokens = codec::page_tokens(&reload(&builder), 0).unwrap();
    assert_eq!(tokens, vec!["first", "second", "third"]);
}

// ── Record round-trips (PageData level) ──────────────────────────────────────

#[test]
fn page_data_roundtrips_deep_equal() {
    let original = sample_page_data();

    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_data(&mut builder, &original).unwrap();

    let data = scan_document(&reload(&builder)).unwrap();
    assert_eq!(data.record_count(), 1);
    assert_eq!(data.records(0), &[original]);
}

#[test]
fn records_group_by_page_index() {
    let mut on_page_1a = sample_page_data();
    on_page_1a.page.number = 1;
    let mut on_page_1b = sample_page_data();
    on_page_1b.page.number = 1;
    on_page_1b.exam.course_code = "ENGI99886".into();
    let mut on_page_2 = sample_page_data();
    on_page_2.page.number = 2;

    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_data(&mut builder, &on_page_1a).unwrap();
    codec::write_page_data(&mut builder, &on_page_1b).unwrap();
    builder.add_page();
    codec::write_page_data(&mut builder, &on_page_2).unwrap();
    builder.add_page(); // trailing page with no records

    let data = scan_document(&reload(&builder)).unwrap();

    let courses: Vec<&str> = data
        .records(0)
        .iter()
        .map(|r| r.exam.course_code.as_str())
        .collect();
    assert_eq!(data.records(0).len(), 2);
    assert!(courses.contains(&"ENGI99887"));
    assert!(courses.contains(&"ENGI99886"));

    assert_eq!(data.records(1), &[on_page_2]);
    assert!(data.records(2).is_empty());
    assert_eq!(data.pages.len(), 3);
}

#[test]
fn malformed_token_skipped_but_neighbour_decodes() {
    let good = sample_page_data();

    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_string(&mut builder, r#"{"exam":"#).unwrap(); // truncated JSON
    codec::write_page_data(&mut builder, &good).unwrap();

    let data = scan_document(&reload(&builder)).unwrap();
    assert_eq!(data.record_count(), 1);
    assert_eq!(data.error_count(), 1);
    assert_eq!(data.records(0), &[good]);

    let scan = &data.pages[&0];
    assert_eq!(scan.errors[0].index, 0);
}

#[test]
fn decoding_the_same_document_twice_is_identical() {
    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_data(&mut builder, &sample_page_data()).unwrap();

    let reader = reload(&builder);
    let first = scan_document(&reader).unwrap();
    let second = scan_document(&reader).unwrap();
    assert_eq!(first.records(0), second.records(0));
}

#[test]
fn redacted_record_still_embeds_and_decodes() {
    let safe = strip_author_identity(&sample_page_data());

    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_data(&mut builder, &safe).unwrap();

    let data = scan_document(&reload(&builder)).unwrap();
    assert_eq!(data.records(0), &[safe]);
    assert!(data.records(0)[0].author.exam_number.is_empty());
}

// ── On-disk round-trip ───────────────────────────────────────────────────────

#[test]
fn on_disk_roundtrip_via_file_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("marked.pdf");

    let record = sample_page_data();
    let mut builder = DocumentBuilder::new();
    builder.add_page();
    codec::write_page_data(&mut builder, &record).unwrap();
    builder.save(&path).expect("document must save to disk");

    let data = read_document(&path).expect("document must walk from disk");
    assert_eq!(data.record_count(), 1);
    assert_eq!(data.records(0), &[record]);
}
