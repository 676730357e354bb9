//! Divider pages.
//!
//! A divider is a blank US Letter page reading `Source: <name>` near the top
//! left, underlined by a thin rule. Rendering depends only on the name, so
//! the same name always produces the same content stream.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::{Result, StitchError};

/// US Letter width in points.
pub const PAGE_WIDTH: i64 = 612;
/// US Letter height in points.
pub const PAGE_HEIGHT: i64 = 792;

const FONT_NAME: &str = "Helvetica-Bold";
const FONT_SIZE: i64 = 16;
const TEXT_X: i64 = 72;
const TEXT_Y: i64 = 720;
const RULE_Y: i64 = 710;
const RULE_START: i64 = 72;
const RULE_END: i64 = 540;

/// Divider page announcing the source that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DividerPage {
    name: String,
}

impl DividerPage {
    /// Create a divider for the source with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Text drawn on the page.
    pub fn text(&self) -> String {
        format!("Source: {}", self.name)
    }

    /// Render the divider as a standalone one-page document.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::AssemblyFailed`] if the content stream cannot be
    /// encoded.
    pub fn render(&self) -> Result<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => FONT_NAME,
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
                Operation::new("Td", vec![TEXT_X.into(), TEXT_Y.into()]),
                Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(&self.text()))]),
                Operation::new("ET", vec![]),
                Operation::new("w", vec![1.into()]),
                Operation::new("m", vec![RULE_START.into(), RULE_Y.into()]),
                Operation::new("l", vec![RULE_END.into(), RULE_Y.into()]),
                Operation::new("S", vec![]),
            ],
        };
        let encoded = content.encode().map_err(|e| {
            StitchError::assembly_failed(format!("divider for '{}': {e}", self.name))
        })?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }
}

/// Encode text for a WinAnsiEncoding simple font.
///
/// Latin-1 characters map to themselves; anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}
