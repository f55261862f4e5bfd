//! Page-size statistics
//!
//! The size normalizer targets the most common page size in a document.
//! This module computes that size profile, and a summary the CLI can show
//! before anything is rewritten.

use crate::options::RepageOptions;
use crate::types::*;
use lopdf::{Document, Object, ObjectId};

/// Read a page's extent from its effective MediaBox.
///
/// MediaBox is inheritable: when the page dictionary has none, the
/// /Parent chain is searched. Width and height are the top-right corner
/// relative to the declared origin.
pub(crate) fn page_extent(doc: &Document, page_id: ObjectId) -> Result<Rect> {
    let mut dict = doc.get_dictionary(page_id)?;

    loop {
        if let Ok(mb) = dict.get(b"MediaBox").and_then(|obj| obj.as_array()) {
            return rect_from_media_box(mb);
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => {
                dict = doc.get_dictionary(*parent_id)?;
            }
            _ => break,
        }
    }

    // No MediaBox anywhere on the chain
    Err(RepageError::Geometry {
        width: 0.0,
        height: 0.0,
    })
}

fn rect_from_media_box(mb: &[Object]) -> Result<Rect> {
    if mb.len() != 4 {
        return Err(RepageError::Geometry {
            width: 0.0,
            height: 0.0,
        });
    }

    let llx = extract_number(&mb[0]);
    let lly = extract_number(&mb[1]);
    let urx = extract_number(&mb[2]);
    let ury = extract_number(&mb[3]);

    match (llx, lly, urx, ury) {
        (Some(llx), Some(lly), Some(urx), Some(ury)) => {
            let width = urx - llx;
            let height = ury - lly;
            if width <= 0.0 || height <= 0.0 {
                return Err(RepageError::Geometry { width, height });
            }
            Ok(Rect::new(llx, lly, width, height))
        }
        _ => Err(RepageError::Geometry {
            width: 0.0,
            height: 0.0,
        }),
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Count the occurrences of every distinct page size, in page order.
///
/// The result keeps first-encountered order so that frequency ties resolve
/// deterministically to the earliest size in the document.
pub fn size_profile(doc: &Document) -> Result<Vec<(PageSize, usize)>> {
    let mut profile: Vec<(PageSize, usize)> = Vec::new();

    for page_id in doc.get_pages().values() {
        let size = page_extent(doc, *page_id)?.size();
        match profile.iter_mut().find(|(s, _)| *s == size) {
            Some((_, count)) => *count += 1,
            None => profile.push((size, 1)),
        }
    }

    Ok(profile)
}

/// Determine the most common page size and return it as a rectangle
/// anchored at the origin.
pub fn most_common_page_size(doc: &Document) -> Result<Rect> {
    let profile = size_profile(doc)?;

    let mut best: Option<(PageSize, usize)> = None;
    for (size, count) in profile {
        match best {
            // Strict comparison keeps the earliest size on ties
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((size, count)),
        }
    }

    match best {
        Some((size, _)) => Ok(Rect::at_origin(size)),
        None => Err(RepageError::NoPages),
    }
}

/// Calculate statistics for a repage run
pub fn calculate_statistics(doc: &Document, options: &RepageOptions) -> Result<RepageStatistics> {
    let profile = size_profile(doc)?;
    let source_pages: usize = profile.iter().map(|(_, count)| count).sum();

    if source_pages == 0 {
        return Err(RepageError::NoPages);
    }

    let target_size = if options.normalize_sizes {
        Some(most_common_page_size(doc)?.size())
    } else {
        None
    };

    let pages_to_rescale = match target_size {
        Some(target) => profile
            .iter()
            .filter(|(size, _)| *size != target)
            .map(|(_, count)| count)
            .sum(),
        None => 0,
    };

    let pairs_swapped = if options.swap_pages {
        let full_pairs = source_pages / 2;
        if options.restore_first_pair && full_pairs > 0 {
            full_pairs - 1
        } else {
            full_pairs
        }
    } else {
        0
    };

    Ok(RepageStatistics {
        source_pages,
        distinct_sizes: profile.len(),
        target_size,
        pages_to_rescale,
        pairs_swapped,
    })
}
