//! Layout engine: block measurement and pagination

mod engine;
pub mod font;
mod line_break;
mod measure;
mod pagination;

pub use engine::{LayoutConstraints, PagedView};
pub use font::{FontMetrics, Typography};
pub use line_break::{LineBreaker, LineLayout};
pub use measure::{Measure, TextMeasurer, MIN_BLOCK_HEIGHT};
pub use pagination::{paginate, Page, Pagination, Paginator, PlacedBlock};
