//! Page-size normalization
//!
//! Every page adopts the document's most common page size. Content is
//! scaled uniformly by the largest factor that still fits the target box,
//! anchored at the coordinate origin, then the MediaBox is overwritten
//! with the target rectangle exactly. No recentering: when the scale is
//! limited by one axis, the slack on the other axis stays on one side.

use crate::stats::{most_common_page_size, page_extent};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Rescale every page in the document to the most common page size.
///
/// The target rectangle is computed once, before any page is mutated.
/// A page with a non-positive or unreadable extent fails the whole
/// document with [`RepageError::Geometry`].
pub fn normalize_page_sizes(doc: &mut Document) -> Result<()> {
    let target = most_common_page_size(doc)?;
    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();

    for page_id in page_ids {
        let extent = page_extent(doc, page_id)?;

        // Largest uniform factor that fits inside the target box
        let scale = (target.width / extent.width).min(target.height / extent.height);

        if (scale - 1.0).abs() > f32::EPSILON {
            scale_page_contents(doc, page_id, scale)?;
        }
        set_media_box(doc, page_id, &target)?;
    }

    Ok(())
}

/// Wrap the page's content streams in a uniform scaling transformation.
///
/// A prefix stream pushes the graphics state and concatenates the scale
/// matrix; a suffix stream pops it. Content stream boundaries concatenate
/// with whitespace, so the original streams are kept untouched in between.
fn scale_page_contents(doc: &mut Document, page_id: ObjectId, scale: f32) -> Result<()> {
    let contents = doc.get_dictionary(page_id)?.get(b"Contents").ok().cloned();

    let mut content_refs: Vec<Object> = Vec::new();
    match contents {
        Some(Object::Reference(id)) => content_refs.push(Object::Reference(id)),
        Some(Object::Array(refs)) => content_refs.extend(refs),
        Some(Object::Stream(stream)) => {
            // Inline stream: move it into its own object so it can sit in
            // the new Contents array
            let id = doc.add_object(stream);
            content_refs.push(Object::Reference(id));
        }
        _ => {}
    }

    let prefix = format!("q\n{} 0 0 {} 0 0 cm\n", scale, scale);
    let prefix_id = doc.add_object(Stream::new(Dictionary::new(), prefix.into_bytes()));
    let suffix_id = doc.add_object(Stream::new(Dictionary::new(), b"Q\n".to_vec()));

    let mut new_contents = Vec::with_capacity(content_refs.len() + 2);
    new_contents.push(Object::Reference(prefix_id));
    new_contents.extend(content_refs);
    new_contents.push(Object::Reference(suffix_id));

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page_dict.set("Contents", Object::Array(new_contents));

    Ok(())
}

/// Overwrite the page's MediaBox with the target rectangle.
fn set_media_box(doc: &mut Document, page_id: ObjectId, target: &Rect) -> Result<()> {
    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Real(target.x),
            Object::Real(target.y),
            Object::Real(target.x + target.width),
            Object::Real(target.y + target.height),
        ]),
    );

    Ok(())
}
