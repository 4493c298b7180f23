//! Absolute layout - controls keep their authored bounds.
//!
//! Lets a container opt out of automatic arrangement while still hosting
//! nested layouts: absolute bounds are still written and child containers
//! still get their pass. A control that explicitly asks for an alignment
//! is aligned against the content area; unaligned controls never move.

use crate::primitives::Rect;

use super::align::{Axes, aligned_bounds};
use super::{ChildSnapshot, Placements};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsoluteLayout;

impl AbsoluteLayout {
    pub fn arrange(&self, content: Rect, children: &[ChildSnapshot]) -> Placements {
        children
            .iter()
            .map(|child| {
                child.visible.then(|| {
                    aligned_bounds(child.bounds, child.margin, child.alignment, content, Axes::BOTH)
                })
            })
            .collect()
    }
}
