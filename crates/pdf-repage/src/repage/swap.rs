//! Pairwise-adjacent page swapping
//!
//! The new order is computed as a pure index permutation, then applied to
//! the document by rewriting the root page tree. Every fully matched pair
//! (positions 2i and 2i+1) exchanges places; an unpaired trailing page
//! keeps its position.

use crate::types::*;
use lopdf::{Document, Object, ObjectId};

// =============================================================================
// Permutation
// =============================================================================

/// Calculate the swapped page order for a document of `page_count` pages.
///
/// Returns 0-based source indices in output order. For example, 4 pages
/// give `[1, 0, 3, 2]`: the output opens with source page 2, then page 1,
/// and so on. With `restore_first_pair` the first two output slots are
/// swapped back, leaving the first pair in original order while later
/// pairs stay exchanged.
pub fn swap_order(page_count: usize, restore_first_pair: bool) -> Vec<usize> {
    let mut order = Vec::with_capacity(page_count);

    let mut i = 0;
    while i + 1 < page_count {
        order.push(i + 1);
        order.push(i);
        i += 2;
    }
    if i < page_count {
        // Unpaired trailing page stays where it was
        order.push(i);
    }

    if restore_first_pair && order.len() >= 2 {
        order.swap(0, 1);
    }

    order
}

// =============================================================================
// Document Application
// =============================================================================

/// Rewrite the document's page order by swapping adjacent pairs.
pub fn swap_adjacent_pages(doc: &mut Document, restore_first_pair: bool) -> Result<()> {
    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    let reordered: Vec<ObjectId> = swap_order(page_ids.len(), restore_first_pair)
        .into_iter()
        .map(|i| page_ids[i])
        .collect();
    apply_page_order(doc, &reordered)
}

/// Attributes a page may inherit from ancestor nodes in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Rebuild the root page tree with pages in the given order.
///
/// Nested page trees are flattened: each page is reparented directly under
/// the root /Pages node. Inheritable attributes are hoisted onto the page
/// dictionaries first so nothing is lost when interior nodes go away.
fn apply_page_order(doc: &mut Document, page_ids_in_order: &[ObjectId]) -> Result<()> {
    if page_ids_in_order.is_empty() {
        return Ok(());
    }

    let root_id = root_pages_id(doc)?;

    // Collect hoisted values before taking any mutable borrow
    let mut hoisted: Vec<(ObjectId, Vec<(Vec<u8>, Object)>)> = Vec::new();
    for &page_id in page_ids_in_order {
        let mut attrs = Vec::new();
        for key in INHERITABLE_KEYS {
            if let Some(value) = inherited_attribute(doc, page_id, key)? {
                attrs.push((key.to_vec(), value));
            }
        }
        hoisted.push((page_id, attrs));
    }

    for (page_id, attrs) in hoisted {
        let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
        for (key, value) in attrs {
            page_dict.set(key, value);
        }
        page_dict.set("Parent", Object::Reference(root_id));
    }

    let kids: Vec<Object> = page_ids_in_order
        .iter()
        .map(|id| Object::Reference(*id))
        .collect();
    let count = kids.len() as i64;

    let root_dict = doc.get_object_mut(root_id)?.as_dict_mut()?;
    root_dict.set("Kids", Object::Array(kids));
    root_dict.set("Count", Object::Integer(count));

    // Interior nodes of a flattened tree are now orphans
    doc.prune_objects();

    Ok(())
}

/// The root /Pages node referenced by the catalog
fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    Ok(doc.catalog()?.get(b"Pages")?.as_reference()?)
}

/// Look up an attribute on a page, following the /Parent chain when the
/// page dictionary itself lacks it.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Result<Option<Object>> {
    let mut dict = doc.get_dictionary(page_id)?;

    loop {
        if let Ok(value) = dict.get(key) {
            return Ok(Some(value.clone()));
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => {
                dict = doc.get_dictionary(*parent_id)?;
            }
            _ => return Ok(None),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
