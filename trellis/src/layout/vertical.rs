//! Vertical layout - children stacked top to bottom.
//!
//! Each child is aligned horizontally against the content area, then
//! placed below the previous one. There is no wrapping: content taller
//! than the container overflows, which is the scroll layout's business.

use crate::config::VerticalConfig;
use crate::primitives::Rect;

use super::align::{Axes, aligned_bounds};
use super::{ChildSnapshot, Placements, stack_at_origin};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerticalLayout {
    /// Spacing between children.
    spacing: f32,
    /// Walk children last to first.
    bottom_to_top: bool,
}

impl VerticalLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &VerticalConfig) -> Self {
        Self {
            spacing: config.spacing,
            bottom_to_top: config.bottom_to_top,
        }
    }

    /// Set spacing between children.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Stack the last child at the top.
    pub fn bottom_to_top(mut self, enabled: bool) -> Self {
        self.bottom_to_top = enabled;
        self
    }

    pub fn arrange(&self, content: Rect, children: &[ChildSnapshot]) -> Placements {
        if content.is_degenerate() {
            return stack_at_origin(content, children);
        }

        let mut placements: Placements = vec![None; children.len()];
        let mut y = content.y;

        let order: Box<dyn Iterator<Item = usize>> = if self.bottom_to_top {
            Box::new((0..children.len()).rev())
        } else {
            Box::new(0..children.len())
        };

        for index in order {
            let child = &children[index];
            if !child.visible {
                continue;
            }
            let at_left_edge = Rect::new(
                content.x + child.margin.left,
                y + child.margin.top,
                child.bounds.width,
                child.bounds.height,
            );
            placements[index] = Some(aligned_bounds(
                at_left_edge,
                child.margin,
                child.alignment,
                content,
                Axes::HORIZONTAL,
            ));
            y += child.outer_size().height + self.spacing;
        }

        placements
    }
}
