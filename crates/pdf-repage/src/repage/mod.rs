//! PDF repaging - page order and page size rewriting
//!
//! This module orchestrates the two transformations:
//! 1. Swap adjacent page pairs (optionally keeping the first pair in place)
//! 2. Normalize every page to the document's most common size
//!
//! When both are enabled, the order is rewritten first and sizes are
//! normalized on the reordered sequence.

mod io;
mod resize;
mod swap;

pub use io::{load_pdf, save_pdf};
pub use resize::normalize_page_sizes;
pub use swap::{swap_adjacent_pages, swap_order};

use crate::options::RepageOptions;
use crate::types::*;
use lopdf::Document;

/// Main repage function
pub async fn repage(doc: &Document, options: &RepageOptions) -> Result<Document> {
    options.validate()?;

    let doc = doc.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        let mut doc = doc;
        repage_sync(&mut doc, &options)?;
        Ok(doc)
    })
    .await?
}

fn repage_sync(doc: &mut Document, options: &RepageOptions) -> Result<()> {
    if options.swap_pages {
        swap_adjacent_pages(doc, options.restore_first_pair)?;
    }

    if options.normalize_sizes {
        normalize_page_sizes(doc)?;
    }

    Ok(())
}
