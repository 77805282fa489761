//! Pagination for multi-page documents
//!
//! Greedy single pass over the document's blocks. Blocks are never split:
//! a block that does not fit starts a new page, and a block taller than a
//! whole page sits alone on its own page.

use crate::document::Block;
use crate::layout::measure::{Measure, MIN_BLOCK_HEIGHT};
use log::{debug, trace, warn};
use serde::Serialize;
use smallvec::SmallVec;

/// A block together with its measured height
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    pub block: Block,
    pub height: f32,
}

/// One page of laid out blocks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    blocks: SmallVec<[PlacedBlock; 4]>,
    used_height: f32,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, placed: PlacedBlock) {
        self.used_height += placed.height;
        self.blocks.push(placed);
    }

    pub fn blocks(&self) -> &[PlacedBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of the contained blocks' heights
    pub fn used_height(&self) -> f32 {
        self.used_height
    }

    /// Concatenated markup of the page's blocks
    pub fn markup(&self) -> String {
        self.blocks.iter().map(|p| p.block.markup()).collect()
    }

    /// Check whether the page holds a block with the given markup
    pub fn contains_markup(&self, markup: &str) -> bool {
        self.blocks.iter().any(|p| p.block.markup() == markup)
    }
}

/// Ordered list of pages; page numbers derive from position
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pages: Vec<Page>,
}

impl Default for Pagination {
    /// A single empty page
    fn default() -> Self {
        Self {
            pages: vec![Page::new()],
        }
    }
}

impl Pagination {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Never zero
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page by its 1-based number
    pub fn page(&self, number: usize) -> Option<&Page> {
        number.checked_sub(1).and_then(|index| self.pages.get(index))
    }

    /// Pages paired with their 1-based numbers
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Page)> + '_ {
        self.pages.iter().enumerate().map(|(i, page)| (i + 1, page))
    }

    /// Number of placed blocks across all pages
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// All placed blocks in order
    pub fn placed_blocks(&self) -> impl Iterator<Item = &PlacedBlock> + '_ {
        self.pages.iter().flat_map(|page| page.blocks().iter())
    }

    /// Number of the first page holding a block with the given markup
    pub fn page_number_of(&self, markup: &str) -> Option<usize> {
        self.numbered()
            .find(|(_, page)| page.contains_markup(markup))
            .map(|(number, _)| number)
    }
}

/// Paginator bound to a page body capacity and a measurer
#[derive(Debug, Clone)]
pub struct Paginator<M> {
    capacity: f32,
    measurer: M,
}

impl<M: Measure> Paginator<M> {
    pub fn new(capacity: f32, measurer: M) -> Self {
        Self { capacity, measurer }
    }

    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    /// Partition the blocks into pages
    pub fn paginate(&mut self, blocks: &[Block]) -> Pagination {
        paginate(blocks, self.capacity, &mut self.measurer)
    }
}

/// Partition blocks into pages of at most `capacity` height
///
/// Runs a full pass every time; nothing carries over between calls other
/// than what the measurer keeps.
pub fn paginate<M: Measure + ?Sized>(blocks: &[Block], capacity: f32, measurer: &mut M) -> Pagination {
    let mut pages = Vec::new();
    let mut current = Page::new();
    let mut after_break = false;

    for block in blocks {
        if block.is_hard_break() {
            trace!("hard break closes page {}", pages.len() + 1);
            pages.push(std::mem::take(&mut current));
            after_break = true;
            continue;
        }
        after_break = false;

        let height = checked_height(measurer.measure(block.markup()));

        // Soft break; a lone over-tall block stays where it is
        if current.used_height + height > capacity && !current.is_empty() {
            trace!(
                "soft break after {} blocks ({:.1} of {:.1})",
                current.len(),
                current.used_height,
                capacity
            );
            pages.push(std::mem::take(&mut current));
        }

        if height > capacity {
            debug!("block of height {height:.1} exceeds page capacity {capacity:.1}");
        }

        current.push(PlacedBlock {
            block: block.clone(),
            height,
        });
    }

    // A trailing hard break leaves its empty page open
    if !current.is_empty() || pages.is_empty() || after_break {
        pages.push(current);
    }

    debug!("paginated {} blocks into {} pages", blocks.len(), pages.len());
    Pagination { pages }
}

fn checked_height(height: f32) -> f32 {
    if height.is_finite() && height >= 0.0 {
        height
    } else {
        warn!("measurer returned {height}; using fallback height");
        MIN_BLOCK_HEIGHT
    }
}
