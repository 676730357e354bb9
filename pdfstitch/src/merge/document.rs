//! Page blocks and the output document accumulator.
//!
//! A [`PageBlock`] is one loaded document whose pages no longer depend on
//! attributes inherited from their page tree. [`OutputDocument`] starts empty
//! and takes blocks in order, moving their objects into a single flat page
//! tree.

use std::collections::HashSet;

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::error::{Result, StitchError};
use crate::ingest::PerFileError;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Version written when no source asks for a newer one.
const BASE_VERSION: &str = "1.5";

/// A document whose pages are ready to be moved into the output.
#[derive(Debug)]
pub struct PageBlock {
    document: Document,
    page_count: usize,
}

impl PageBlock {
    /// Prepare a loaded document for assembly.
    ///
    /// Inherited attributes are copied onto every page so that the page keeps
    /// its resources and geometry once it is re-parented.
    ///
    /// # Errors
    ///
    /// Returns [`PerFileError::Corrupt`] if the document has no pages or a
    /// page is not a dictionary.
    pub fn prepare(mut document: Document) -> std::result::Result<Self, PerFileError> {
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();

        if page_ids.is_empty() {
            return Err(PerFileError::corrupt("PDF has no pages"));
        }

        for &page_id in &page_ids {
            flatten_inherited(&mut document, page_id)?;
        }

        Ok(Self {
            document,
            page_count: page_ids.len(),
        })
    }

    /// Number of pages in the block.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// PDF version of the underlying document.
    pub fn version(&self) -> &str {
        &self.document.version
    }
}

/// Copy inherited attributes from the ancestors of `page_id` onto the page.
fn flatten_inherited(
    document: &mut Document,
    page_id: ObjectId,
) -> std::result::Result<(), PerFileError> {
    let page = document
        .get_dictionary(page_id)
        .map_err(|e| PerFileError::corrupt(format!("page {} {} R: {e}", page_id.0, page_id.1)))?;

    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();

    let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();
    let mut visited = HashSet::from([page_id]);
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(node_id) = parent {
        // A malformed tree may loop back on itself.
        if missing.is_empty() || !visited.insert(node_id) {
            break;
        }

        let Ok(node) = document.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    if inherited.is_empty() {
        return Ok(());
    }

    let page = document
        .get_dictionary_mut(page_id)
        .map_err(|e| PerFileError::corrupt(format!("page {} {} R: {e}", page_id.0, page_id.1)))?;

    for (key, value) in inherited {
        page.set(key, value);
    }

    Ok(())
}

/// The stitched document being assembled.
#[derive(Debug)]
pub struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    page_count: usize,
}

impl OutputDocument {
    /// Create an empty document with a single, empty page tree.
    pub fn new() -> Self {
        let mut document = Document::with_version(BASE_VERSION);
        let pages_id = document.new_object_id();

        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_count: 0,
        }
    }

    /// Append every page of `block` after the pages already present.
    ///
    /// Returns the number of pages appended.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::AssemblyFailed`] if the page tree cannot be
    /// updated. The accumulator is left unchanged in that case.
    pub fn append(&mut self, block: PageBlock) -> Result<usize> {
        self.append_all([block])
    }

    /// Append several blocks in order, all or nothing.
    ///
    /// Every block is renumbered and re-parented before the page tree is
    /// touched, so a block that cannot be placed leaves the accumulator
    /// without any of the others either.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::AssemblyFailed`] if any block cannot be placed
    /// or the page tree is malformed.
    pub fn append_all(&mut self, blocks: impl IntoIterator<Item = PageBlock>) -> Result<usize> {
        self.kids()?;

        let mut next_id = self.document.max_id + 1;
        let mut placed = Vec::new();
        for block in blocks {
            let block = place(block, self.pages_id, next_id)?;
            next_id = next_id.max(block.document.max_id + 1);
            placed.push(block);
        }

        let mut appended = 0;
        for block in placed {
            appended += self.commit(block)?;
        }
        Ok(appended)
    }

    /// Move an already placed block into the page tree.
    fn commit(&mut self, block: PlacedBlock) -> Result<usize> {
        let PlacedBlock { document, page_ids } = block;

        let pages = self
            .document
            .get_dictionary_mut(self.pages_id)
            .map_err(|e| StitchError::assembly_failed(format!("missing page tree root: {e}")))?;

        let kids = pages
            .get_mut(b"Kids")
            .and_then(Object::as_array_mut)
            .map_err(|e| StitchError::assembly_failed(format!("page tree has no Kids: {e}")))?;
        kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));

        let appended = page_ids.len();
        self.page_count += appended;
        pages.set("Count", self.page_count as i64);

        if document.version.as_str() > self.document.version.as_str() {
            self.document.version = document.version.clone();
        }

        self.document.max_id = self.document.max_id.max(document.max_id);
        self.document.objects.extend(document.objects);

        Ok(appended)
    }

    /// Kids of the output page tree root.
    fn kids(&self) -> Result<&Vec<Object>> {
        self.document
            .get_dictionary(self.pages_id)
            .map_err(|e| StitchError::assembly_failed(format!("missing page tree root: {e}")))?
            .get(b"Kids")
            .and_then(Object::as_array)
            .map_err(|e| StitchError::assembly_failed(format!("page tree has no Kids: {e}")))
    }

    /// Pages accumulated so far.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// True when no page has been appended.
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }

    /// Finish assembly and return the document, ready to be written.
    ///
    /// Objects no longer reachable from the new page tree (source catalogs,
    /// outlines, old page tree nodes) are dropped and streams are compressed.
    pub fn finish(self) -> Document {
        let mut document = self.document;

        let info_id = document.add_object(dictionary! {
            "Producer" => Object::string_literal(format!("pdfstitch {}", crate::VERSION)),
        });
        document.trailer.set("Info", info_id);

        document.prune_objects();
        document.renumber_objects();
        document.compress();

        document
    }
}

/// A block renumbered into the output's id space and re-parented onto its
/// page tree, not yet linked in.
#[derive(Debug)]
struct PlacedBlock {
    document: Document,
    page_ids: Vec<ObjectId>,
}

/// Renumber `block` from `first_id` and point its pages at `pages_id`.
fn place(block: PageBlock, pages_id: ObjectId, first_id: u32) -> Result<PlacedBlock> {
    let mut document = block.document;
    document.renumber_objects_with(first_id);

    let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(StitchError::assembly_failed(
            "page tree lost its pages during renumbering",
        ));
    }

    for &page_id in &page_ids {
        document
            .get_dictionary_mut(page_id)
            .map_err(|e| {
                StitchError::assembly_failed(format!(
                    "cannot re-parent page {} {} R: {e}",
                    page_id.0, page_id.1
                ))
            })?
            .set("Parent", pages_id);
    }

    Ok(PlacedBlock { document, page_ids })
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}
