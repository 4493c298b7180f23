//! Flow layout - left to right with row wrapping.
//!
//! Children are laid out horizontally until the next one would cross the
//! right edge of the content area, then wrap to a new row. Each row is as
//! tall as its tallest child (margins included); children with a vertical
//! alignment are aligned inside their row once the row is complete.

use crate::config::FlowConfig;
use crate::primitives::Rect;

use super::align::{Axes, aligned_bounds};
use super::{ChildSnapshot, Placements, stack_at_origin};

/// A flow layout that wraps children like CSS `flex-wrap: wrap`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowLayout {
    /// Horizontal spacing between items.
    spacing: f32,
    /// Vertical spacing between rows.
    line_spacing: f32,
}

impl FlowLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        Self {
            spacing: config.spacing,
            line_spacing: config.line_spacing,
        }
    }

    /// Set horizontal spacing between items.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set vertical spacing between wrapped rows.
    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Compute a placement for every visible child.
    pub fn arrange(&self, content: Rect, children: &[ChildSnapshot]) -> Placements {
        if content.is_degenerate() {
            return stack_at_origin(content, children);
        }

        let mut placements: Placements = vec![None; children.len()];
        let mut row: Vec<usize> = Vec::new();
        let mut line_x = 0.0f32;
        let mut line_y = 0.0f32;
        let mut line_height = 0.0f32;

        for (index, child) in children.iter().enumerate() {
            if !child.visible {
                continue;
            }
            let outer = child.outer_size();

            // Wrap, unless the row is empty: an oversized child gets a row
            // of its own instead of wrapping forever.
            if !row.is_empty() && line_x + outer.width > content.width {
                self.close_row(content, line_y, line_height, &row, children, &mut placements);
                line_y += line_height + self.line_spacing;
                line_x = 0.0;
                line_height = 0.0;
                row.clear();
            }

            placements[index] = Some(Rect::new(
                content.x + line_x + child.margin.left,
                content.y + line_y + child.margin.top,
                child.bounds.width,
                child.bounds.height,
            ));
            row.push(index);

            line_x += outer.width + self.spacing;
            line_height = line_height.max(outer.height);
        }

        if !row.is_empty() {
            self.close_row(content, line_y, line_height, &row, children, &mut placements);
        }

        placements
    }

    /// Vertical alignment inside a finished row.
    fn close_row(
        &self,
        content: Rect,
        line_y: f32,
        line_height: f32,
        row: &[usize],
        children: &[ChildSnapshot],
        placements: &mut Placements,
    ) {
        let band = Rect::new(content.x, content.y + line_y, content.width, line_height);
        for &index in row {
            let child = &children[index];
            if let Some(rect) = placements[index].as_mut() {
                *rect = aligned_bounds(*rect, child.margin, child.alignment, band, Axes::VERTICAL);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Alignment;
    use crate::primitives::Margin;

    fn sized(width: f32, height: f32) -> ChildSnapshot {
        ChildSnapshot::new(Rect::new(0.0, 0.0, width, height))
    }

    fn rects(placements: Placements) -> Vec<Rect> {
        placements.into_iter().flatten().collect()
    }

    #[test]
    fn wraps_when_row_overflows() {
        let content = Rect::new(0.0, 0.0, 100.0, 400.0);
        let placed = rects(FlowLayout::new().arrange(content, &[sized(60.0, 20.0), sized(60.0, 30.0)]));
        assert_eq!(placed[0], Rect::new(0.0, 0.0, 60.0, 20.0));
        assert_eq!(placed[1], Rect::new(0.0, 20.0, 60.0, 30.0));
    }

    #[test]
    fn exact_fit_does_not_wrap() {
        let content = Rect::new(0.0, 0.0, 100.0, 400.0);
        let placed = rects(FlowLayout::new().arrange(content, &[sized(40.0, 10.0), sized(60.0, 10.0)]));
        assert_eq!(placed[1].origin().y, 0.0);
        assert_eq!(placed[1].x, 40.0);
    }

    #[test]
    fn oversized_child_gets_its_own_row() {
        let content = Rect::new(0.0, 0.0, 100.0, 400.0);
        let children = [sized(10.0, 10.0), sized(250.0, 15.0), sized(10.0, 10.0)];
        let placed = rects(FlowLayout::new().arrange(content, &children));
        assert_eq!(placed[0].y, 0.0);
        assert_eq!(placed[1], Rect::new(0.0, 10.0, 250.0, 15.0));
        assert_eq!(placed[2], Rect::new(0.0, 25.0, 10.0, 10.0));
    }

    #[test]
    fn row_height_includes_vertical_margins() {
        let content = Rect::new(0.0, 0.0, 100.0, 400.0);
        let children = [
            sized(50.0, 20.0).margin(Margin::new(5.0, 0.0, 5.0, 0.0)),
            sized(50.0, 10.0),
            sized(50.0, 10.0),
        ];
        let placed = rects(FlowLayout::new().arrange(content, &children));
        assert_eq!(placed[0].y, 5.0);
        assert_eq!(placed[2].y, 30.0);
    }

    #[test]
    fn margins_and_spacing_advance_cursor() {
        let content = Rect::new(10.0, 10.0, 200.0, 400.0);
        let children = [
            sized(40.0, 10.0).margin(Margin::new(0.0, 3.0, 0.0, 2.0)),
            sized(40.0, 10.0),
        ];
        let placed = rects(FlowLayout::new().spacing(4.0).arrange(content, &children));
        assert_eq!(placed[0].x, 12.0);
        assert_eq!(placed[1].x, 10.0 + 45.0 + 4.0);
    }

    #[test]
    fn line_spacing_separates_rows() {
        let content = Rect::new(0.0, 0.0, 100.0, 400.0);
        let placed = rects(
            FlowLayout::new()
                .line_spacing(6.0)
                .arrange(content, &[sized(80.0, 10.0), sized(80.0, 10.0)]),
        );
        assert_eq!(placed[1].y, 16.0);
    }

    #[test]
    fn vertical_alignment_within_row() {
        let content = Rect::new(0.0, 0.0, 300.0, 400.0);
        let children = [
            sized(50.0, 40.0),
            sized(50.0, 10.0).align(Alignment::new(None, Some(crate::control::VerticalAlign::Center))),
            sized(50.0, 10.0).align(Alignment::new(None, Some(crate::control::VerticalAlign::Bottom))),
            sized(50.0, 10.0).align(Alignment::FILL_HEIGHT),
        ];
        let placed = rects(FlowLayout::new().arrange(content, &children));
        assert_eq!(placed[1].y, 15.0);
        assert_eq!(placed[2].y, 30.0);
        assert_eq!(placed[3].height, 40.0);
        // The primary axis is never touched by alignment.
        assert_eq!(placed[3].x, 150.0);
    }

    #[test]
    fn hidden_children_take_no_space() {
        let content = Rect::new(0.0, 0.0, 100.0, 400.0);
        let children = [sized(60.0, 10.0), sized(60.0, 10.0).hidden(), sized(30.0, 10.0)];
        let placements = FlowLayout::new().arrange(content, &children);
        assert_eq!(placements[1], None);
        assert_eq!(placements[2], Some(Rect::new(60.0, 0.0, 30.0, 10.0)));
    }

    #[test]
    fn degenerate_content_stacks_at_origin() {
        let content = Rect::new(4.0, 4.0, 0.0, 0.0);
        let placed = rects(FlowLayout::new().arrange(content, &[sized(60.0, 10.0), sized(60.0, 10.0)]));
        assert!(placed.iter().all(|rect| rect.origin() == content.origin()));
    }

    #[test]
    fn no_overlap_and_order_preserved() {
        let content = Rect::new(0.0, 0.0, 170.0, 1000.0);
        let children: Vec<ChildSnapshot> = (0..24)
            .map(|i| sized(10.0 + (i * 7 % 50) as f32, 5.0 + (i * 3 % 20) as f32))
            .collect();
        let placed = rects(FlowLayout::new().arrange(content, &children));
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
                // Later children are further right on the same row, or lower.
                assert!(b.y > a.y || (b.y == a.y && b.x >= a.right()));
            }
        }
    }
}
