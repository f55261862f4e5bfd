pub mod repage;
mod options;
mod stats;
mod types;

pub use options::RepageOptions;
pub use repage::{load_pdf, normalize_page_sizes, repage, save_pdf, swap_adjacent_pages, swap_order};
pub use stats::{calculate_statistics, most_common_page_size, size_profile};
pub use types::*;
