//! Writing side: compose a PDF page by page and hide text runs in it.
//!
//! [`DocumentBuilder`] accumulates content operations per page and assembles
//! a [`lopdf::Document`] on demand. Hidden runs are ordinary `Tj` text
//! operations drawn at an effectively-zero font size, positioned far outside
//! any plausible page area: technically present and extractable, never
//! rendered or printed.
//!
//! Placement used to be jittered with process-global randomness; it is now a
//! fixed, caller-injectable [`Placement`] strategy so that composing the same
//! document twice produces the same bytes.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use crate::backend::HiddenTextSink;
use crate::error::PageDataError;

/// A4 portrait in points, the default page size.
pub const PAGE_SIZE_A4: (f32, f32) = (595.0, 842.0);

/// Where and how hidden runs are drawn.
///
/// The defaults put runs well beyond any real page dimensions at a font size
/// no renderer can rasterise. Successive runs on the same page are stepped
/// apart by `y_step` so they do not coincide.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    /// Font size of the hidden run; effectively zero.
    pub font_size: f32,
    /// Horizontal offset of every run, in points.
    pub x: f32,
    /// Vertical offset of the first run on a page, in points.
    pub y: f32,
    /// Vertical distance between successive runs on the same page.
    pub y_step: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            font_size: 0.000_001,
            x: 99_999.0,
            y: 99_999.0,
            y_step: 10.0,
        }
    }
}

/// One page under construction.
#[derive(Default)]
struct PageDraft {
    ops: Vec<Operation>,
    hidden_runs: usize,
}

/// A PDF document under incremental construction.
///
/// Pages are appended with [`add_page`](Self::add_page); text (visible or
/// hidden) always lands on the most recently added page. Exactly one writer
/// per document under construction; readers open their own
/// [`crate::reader::DocumentReader`] on the finished bytes.
///
/// # Example
/// ```
/// use gradex_pagedata::{codec, DocumentBuilder, PageData};
///
/// # fn main() -> Result<(), gradex_pagedata::PageDataError> {
/// let mut builder = DocumentBuilder::new();
/// builder.add_page();
/// codec::write_page_data(&mut builder, &PageData::default())?;
/// let bytes = builder.to_bytes()?;
/// assert!(bytes.starts_with(b"%PDF-"));
/// # Ok(())
/// # }
/// ```
pub struct DocumentBuilder {
    pages: Vec<PageDraft>,
    page_size: (f32, f32),
    placement: Placement,
}

impl DocumentBuilder {
    /// A builder with A4 pages and the default hidden-run placement.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            page_size: PAGE_SIZE_A4,
            placement: Placement::default(),
        }
    }

    /// Override the page size, in points.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_size = (width, height);
        self
    }

    /// Override the hidden-run placement strategy.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Append a fresh, empty page; subsequent text lands on it.
    pub fn add_page(&mut self) {
        self.pages.push(PageDraft::default());
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Draw visible text on the current page at the given position.
    ///
    /// # Errors
    /// [`PageDataError::NoOpenPage`] if no page has been added yet.
    pub fn add_text(
        &mut self,
        text: &str,
        size: f32,
        x: f32,
        y: f32,
    ) -> Result<(), PageDataError> {
        let page = self.current_page()?;
        push_text_run(&mut page.ops, text, size, x, y);
        Ok(())
    }

    fn current_page(&mut self) -> Result<&mut PageDraft, PageDataError> {
        self.pages.last_mut().ok_or(PageDataError::NoOpenPage)
    }

    /// Assemble the accumulated pages into a [`lopdf::Document`].
    ///
    /// Every page shares a single standard Helvetica font resource `F1`; each
    /// page gets its own encoded content stream.
    pub fn to_document(&self) -> Result<Document, PageDataError> {
        let (width, height) = self.page_size;
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for draft in &self.pages {
            let content = Content {
                operations: draft.ops.clone(),
            };
            let encoded = content.encode().map_err(|e| PageDataError::Compose {
                detail: e.to_string(),
            })?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![0.into(), 0.into(), Object::Real(width), Object::Real(height)],
                "Resources" => Object::Dictionary(dictionary! {
                    "Font" => Object::Dictionary(dictionary! {
                        "F1" => font_id,
                    }),
                }),
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    /// Serialise the document into a byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PageDataError> {
        let mut doc = self.to_document()?;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PageDataError::Compose {
                detail: e.to_string(),
            })?;
        Ok(buffer)
    }

    /// Serialise the document to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PageDataError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|source| PageDataError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HiddenTextSink for DocumentBuilder {
    fn append_hidden_text(&mut self, text: &str) -> Result<(), PageDataError> {
        let placement = self.placement;
        let page = self.current_page()?;
        let y = placement.y + placement.y_step * page.hidden_runs as f32;
        push_text_run(&mut page.ops, text, placement.font_size, placement.x, y);
        page.hidden_runs += 1;
        debug!(chars = text.len(), x = placement.x, y, "hidden text run appended");
        Ok(())
    }
}

/// Append one `BT … Tj … ET` text object to a page's operation list.
fn push_text_run(ops: &mut Vec<Operation>, text: &str, size: f32, x: f32, y: f32) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec!["F1".into(), Object::Real(size)]));
    ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}
