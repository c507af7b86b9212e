//! PDF rendering of redacted text
//!
//! One paragraph per input line in a single monospaced style: Courier 10pt on
//! US Letter with one-inch margins. Lines longer than the printable width wrap
//! at character boundaries. Mask runs are painted as filled boxes over the
//! cells they occupy instead of as glyphs, since the standard fonts have no
//! full-block character.

use crate::domain::RenderError;
use crate::redaction::MASK_CHAR;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// Page geometry in PDF points. Courier advances 600/1000 em per glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub page_width: i64,
    pub page_height: i64,
    /// Same on all four sides
    pub margin: i64,
    pub font_size: i64,
    /// Baseline-to-baseline distance
    pub leading: i64,
    /// Horizontal advance of one glyph
    pub char_width: i64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 612,
            page_height: 792,
            margin: 72,
            font_size: 10,
            leading: 12,
            char_width: 6,
        }
    }
}

impl PageLayout {
    /// Characters that fit on one printed row
    pub fn columns(&self) -> usize {
        ((self.page_width - 2 * self.margin) / self.char_width).max(1) as usize
    }

    /// Rows that fit on one page
    pub fn rows(&self) -> usize {
        ((self.page_height - 2 * self.margin) / self.leading).max(1) as usize
    }

    fn baseline(&self, row: usize) -> i64 {
        self.page_height - self.margin - self.font_size - self.leading * row as i64
    }
}

/// Text to PDF renderer
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PageLayout,
}

impl PdfRenderer {
    /// Create a renderer with a custom layout
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    /// Page layout in use
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Render `text` into PDF bytes. Empty text yields a single blank page.
    pub fn render(&self, text: &str) -> Result<Vec<u8>, RenderError> {
        let rows = wrap_lines(text, self.layout.columns());
        let pages: Vec<&[String]> = if rows.is_empty() {
            vec![rows.as_slice()]
        } else {
            rows.chunks(self.layout.rows()).collect()
        };

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page_rows in &pages {
            let content = self.page_content(page_rows);
            let encoded = content
                .encode()
                .map_err(|e| RenderError::ContentEncoding(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(page_count),
                "Resources" => resources_id,
                "MediaBox" => media_box(&self.layout),
            }),
        );

        let catalog_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::PdfWrite(e.to_string()))?;

        tracing::debug!(
            pages = page_count,
            rows = rows.len(),
            size_bytes = buffer.len(),
            "PDF rendered"
        );

        Ok(buffer)
    }

    fn page_content(&self, rows: &[String]) -> Content {
        let layout = &self.layout;
        let mut operations = Vec::new();

        // Text, with mask cells left blank
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec!["F1".into(), Object::Integer(layout.font_size)],
        ));
        operations.push(Operation::new("TL", vec![Object::Integer(layout.leading)]));
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(layout.margin), Object::Integer(layout.baseline(0))],
        ));
        for (index, row) in rows.iter().enumerate() {
            if index > 0 {
                operations.push(Operation::new("T*", vec![]));
            }
            if !row.is_empty() {
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_row(row), StringFormat::Literal)],
                ));
            }
        }
        operations.push(Operation::new("ET", vec![]));

        // Mask boxes over the blanked cells
        for (index, row) in rows.iter().enumerate() {
            for (start, len) in mask_runs(row) {
                operations.push(Operation::new(
                    "re",
                    vec![
                        Object::Integer(layout.margin + layout.char_width * start as i64),
                        Object::Integer(layout.baseline(index) - 2),
                        Object::Integer(layout.char_width * len as i64),
                        Object::Integer(layout.font_size),
                    ],
                ));
            }
        }
        if rows.iter().any(|row| row.contains(MASK_CHAR)) {
            operations.push(Operation::new("f", vec![]));
        }

        Content { operations }
    }
}

fn media_box(layout: &PageLayout) -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(layout.page_width),
        Object::Integer(layout.page_height),
    ]
}

/// Split text into printed rows: one per input line, wrapped at `columns`
/// characters. Tabs print as a single space.
pub fn wrap_lines(text: &str, columns: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = line
            .chars()
            .map(|c| if c == '\t' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        for chunk in chars.chunks(columns.max(1)) {
            rows.push(chunk.iter().collect());
        }
    }
    rows
}

/// `(start_column, length)` of each run of mask characters in a row
pub fn mask_runs(row: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for (column, c) in row.chars().enumerate() {
        if c == MASK_CHAR {
            match current {
                Some((start, len)) => current = Some((start, len + 1)),
                None => current = Some((column, 1)),
            }
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    runs.extend(current);
    runs
}

/// WinAnsi bytes for a row: masks become spaces, anything outside Latin-1
/// becomes `?`
fn encode_row(row: &str) -> Vec<u8> {
    row.chars()
        .map(|c| match c {
            MASK_CHAR => b' ',
            c if (c as u32) < 0x100 => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
