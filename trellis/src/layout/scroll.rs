//! Scroll layout - drag-to-scroll content that may exceed the container.
//!
//! Children are first placed by the configured arrangement (authored
//! bounds, a vertical stack, or a horizontal row). Their local bounds stay
//! untranslated; the scroll offset is applied when absolute bounds are
//! written, so re-running the arrangement every frame is stable.
//!
//! ## Gesture state machine
//!
//! ```text
//! Press ──> dragging ──Move*──> dragging ──Release──> idle (+ inertia)
//!                                         ──Cancel───> idle
//! ```
//!
//! Offsets follow the finger: dragging up by 50px moves the content up by
//! 50px, i.e. the offset decreases. The valid range on each axis is
//! `[-(extent - viewport), 0]`.

use serde::{Deserialize, Serialize};

use crate::config::{Overscroll, ScrollConfig};
use crate::primitives::{Point, Rect, Size};
use crate::touch::TouchEvent;

use super::absolute::AbsoluteLayout;
use super::align::{Axes, aligned_bounds};
use super::vertical::VerticalLayout;
use super::{ChildSnapshot, Placements, stack_at_origin};

/// Elastic offsets closer than this to the valid range snap onto it.
const SNAP_DISTANCE: f32 = 0.5;

/// How children are placed before scrolling is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollArrangement {
    /// Children keep their authored bounds.
    #[default]
    None,
    /// Stacked top to bottom, like the vertical layout.
    Vertical,
    /// Placed left to right in a single row.
    Horizontal,
}

impl ScrollArrangement {
    /// Axes left to alignment by this arrangement.
    pub fn free_axes(&self) -> Axes {
        match self {
            ScrollArrangement::None => Axes::BOTH,
            ScrollArrangement::Vertical => Axes::HORIZONTAL,
            ScrollArrangement::Horizontal => Axes::VERTICAL,
        }
    }
}

/// Axes the user may scroll along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Vertical,
    Horizontal,
    /// Both axes; each drag locks onto whichever axis moved first.
    #[default]
    Both,
}

impl ScrollDirection {
    fn allows(&self, axis: Axis) -> bool {
        match self {
            ScrollDirection::Both => true,
            ScrollDirection::Vertical => axis == Axis::Vertical,
            ScrollDirection::Horizontal => axis == Axis::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// An active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragGesture {
    contact: u32,
    last: Point,
    lock: Option<Axis>,
    moved: bool,
}

/// Scroll layout with its gesture state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollLayout {
    config: ScrollConfig,
    /// Translation applied to every child (0 = unscrolled).
    offset: Point,
    /// Per-frame velocity handed over on release.
    velocity: Point,
    gesture: Option<DragGesture>,
    /// Children's extent from the content origin, measured each pass.
    extent: Size,
    /// Content-area size, measured each pass.
    viewport: Size,
}

impl Default for ScrollLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollLayout {
    pub fn new() -> Self {
        Self::from_config(ScrollConfig::default())
    }

    pub fn from_config(config: ScrollConfig) -> Self {
        Self {
            config,
            offset: Point::ORIGIN,
            velocity: Point::ORIGIN,
            gesture: None,
            extent: Size::ZERO,
            viewport: Size::ZERO,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn arrangement(&self) -> ScrollArrangement {
        self.config.arrangement
    }

    pub fn direction(&self) -> ScrollDirection {
        self.config.direction
    }

    pub fn scroll_offset(&self) -> Point {
        self.offset
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Children's extent measured by the last pass.
    pub fn content_extent(&self) -> Size {
        self.extent
    }

    /// Content-area size measured by the last pass.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Lowest valid offset per axis. The highest is always zero.
    pub fn min_offset(&self) -> Point {
        let span = |axis: Axis, extent: f32, viewport: f32| {
            if self.config.direction.allows(axis) {
                -(extent - viewport).max(0.0)
            } else {
                0.0
            }
        };
        Point::new(
            span(Axis::Horizontal, self.extent.width, self.viewport.width),
            span(Axis::Vertical, self.extent.height, self.viewport.height),
        )
    }

    /// Clamp a candidate offset into the valid range.
    pub fn clamp_offset(&self, offset: Point) -> Point {
        let min = self.min_offset();
        Point::new(offset.x.clamp(min.x, 0.0), offset.y.clamp(min.y, 0.0))
    }

    /// Jump to an offset (clamped), stopping any inertia.
    pub fn scroll_to(&mut self, offset: Point) {
        self.offset = self.clamp_offset(offset.sanitized());
        self.velocity = Point::ORIGIN;
    }

    /// Scroll by a delta (clamped), stopping any inertia.
    pub fn scroll_by(&mut self, delta: Point) {
        self.scroll_to(self.offset + delta.sanitized());
    }

    // =====================================================================
    // Layout pass
    // =====================================================================

    pub fn arrange(&self, content: Rect, children: &[ChildSnapshot]) -> Placements {
        match self.config.arrangement {
            ScrollArrangement::None => AbsoluteLayout.arrange(content, children),
            ScrollArrangement::Vertical => VerticalLayout::new()
                .spacing(self.config.spacing)
                .arrange(content, children),
            ScrollArrangement::Horizontal => self.arrange_horizontal(content, children),
        }
    }

    fn arrange_horizontal(&self, content: Rect, children: &[ChildSnapshot]) -> Placements {
        if content.is_degenerate() {
            return stack_at_origin(content, children);
        }

        let mut placements: Placements = vec![None; children.len()];
        let mut x = content.x;
        for (index, child) in children.iter().enumerate() {
            if !child.visible {
                continue;
            }
            let at_top_edge = Rect::new(
                x + child.margin.left,
                content.y + child.margin.top,
                child.bounds.width,
                child.bounds.height,
            );
            placements[index] = Some(aligned_bounds(
                at_top_edge,
                child.margin,
                child.alignment,
                content,
                Axes::VERTICAL,
            ));
            x += child.outer_size().width + self.config.spacing;
        }
        placements
    }

    /// Record the content extent and viewport from a finished arrangement.
    pub fn measure(&mut self, content: Rect, children: &[ChildSnapshot], placements: &[Option<Rect>]) {
        let mut extent = Size::ZERO;
        for (placement, child) in placements.iter().zip(children) {
            if let Some(rect) = placement {
                extent.width = extent.width.max(rect.right() + child.margin.right - content.x);
                extent.height = extent.height.max(rect.bottom() + child.margin.bottom - content.y);
            }
        }
        self.extent = extent;
        self.viewport = content.size();
    }

    /// Per-frame motion: inertia while released, then bring the offset
    /// back into range (hard clamp or elastic spring-back).
    pub fn advance_frame(&mut self) {
        if self.gesture.is_some() {
            return;
        }

        if self.config.inertia && self.velocity != Point::ORIGIN {
            self.offset += self.velocity;
            self.velocity.x = decay(self.velocity.x, self.config.friction, self.config.min_velocity);
            self.velocity.y = decay(self.velocity.y, self.config.friction, self.config.min_velocity);
        }

        let min = self.min_offset();
        let spring = self.config.spring;
        let overscroll = self.config.overscroll;
        self.offset.x = settle(self.offset.x, min.x, &mut self.velocity.x, overscroll, spring);
        self.offset.y = settle(self.offset.y, min.y, &mut self.velocity.y, overscroll, spring);
    }

    // =====================================================================
    // Touch handling
    // =====================================================================

    /// Drive the drag state machine. Returns whether the event was
    /// consumed.
    pub fn touch_event(&mut self, event: TouchEvent, x: i32, y: i32, contact_index: u32) -> bool {
        let position = Point::new(x as f32, y as f32);
        match event {
            TouchEvent::Press => {
                if self.gesture.is_some() {
                    return false;
                }
                self.gesture = Some(DragGesture {
                    contact: contact_index,
                    last: position,
                    lock: None,
                    moved: false,
                });
                self.velocity = Point::ORIGIN;
                tracing::debug!("scroll drag started at {:?} (contact {})", position, contact_index);
                // Children still get the press.
                false
            }
            TouchEvent::Move => {
                let Some(mut gesture) = self.gesture.filter(|g| g.contact == contact_index) else {
                    return false;
                };
                let delta = position - gesture.last;
                gesture.last = position;

                if gesture.lock.is_none() && (delta.x != 0.0 || delta.y != 0.0) {
                    gesture.lock = Some(self.lock_axis(delta));
                }

                let applied = match gesture.lock {
                    Some(Axis::Horizontal) => Point::new(delta.x, 0.0),
                    Some(Axis::Vertical) => Point::new(0.0, delta.y),
                    None => Point::ORIGIN,
                };
                if applied != Point::ORIGIN {
                    gesture.moved = true;
                    self.offset = self.drag_limit(self.offset + applied);
                }
                self.velocity = applied;
                self.gesture = Some(gesture);
                true
            }
            TouchEvent::Release | TouchEvent::Cancel => {
                let Some(gesture) = self.gesture.filter(|g| g.contact == contact_index) else {
                    return false;
                };
                self.gesture = None;
                if event == TouchEvent::Cancel || !self.config.inertia {
                    self.velocity = Point::ORIGIN;
                }
                tracing::debug!(
                    "scroll drag ended ({:?}) at offset {:?}, velocity {:?}",
                    event,
                    self.offset,
                    self.velocity
                );
                gesture.moved
            }
        }
    }

    /// Range a drag may reach: the valid range, widened by the elastic
    /// limit when overscroll is allowed.
    /// Axis a drag session follows, picked from its first movement. With
    /// both axes enabled, an axis whose content fits the viewport is never
    /// chosen over one that can scroll.
    fn lock_axis(&self, delta: Point) -> Axis {
        match self.config.direction {
            ScrollDirection::Vertical => Axis::Vertical,
            ScrollDirection::Horizontal => Axis::Horizontal,
            ScrollDirection::Both => {
                let min = self.min_offset();
                match (min.x < 0.0, min.y < 0.0) {
                    (true, false) => Axis::Horizontal,
                    (false, true) => Axis::Vertical,
                    _ if delta.x.abs() > delta.y.abs() => Axis::Horizontal,
                    _ => Axis::Vertical,
                }
            }
        }
    }

    fn drag_limit(&self, offset: Point) -> Point {
        let min = self.min_offset();
        let slack = match self.config.overscroll {
            Overscroll::Clamp => 0.0,
            Overscroll::Elastic { limit } => limit,
        };
        let axis = |value: f32, min: f32, allowed: bool| {
            if allowed {
                value.clamp(min - slack, slack)
            } else {
                0.0
            }
        };
        Point::new(
            axis(offset.x, min.x, self.config.direction.allows(Axis::Horizontal)),
            axis(offset.y, min.y, self.config.direction.allows(Axis::Vertical)),
        )
    }
}

fn decay(velocity: f32, friction: f32, min_velocity: f32) -> f32 {
    let next = velocity * friction;
    if next.abs() < min_velocity { 0.0 } else { next }
}

/// Move one axis back toward `[min, 0]`. Velocity stops at the edge.
fn settle(value: f32, min: f32, velocity: &mut f32, overscroll: Overscroll, spring: f32) -> f32 {
    let target = value.clamp(min, 0.0);
    if target == value {
        return value;
    }
    *velocity = 0.0;
    match overscroll {
        Overscroll::Clamp => target,
        Overscroll::Elastic { .. } => {
            let next = target + (value - target) * (1.0 - spring);
            if (next - target).abs() < SNAP_DISTANCE { target } else { next }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Alignment;

    /// A scroll layout measured against a 100x200 viewport holding
    /// content of the given size.
    fn measured(config: ScrollConfig, extent: Size) -> ScrollLayout {
        let mut scroll = ScrollLayout::from_config(config);
        let content = Rect::new(0.0, 0.0, 100.0, 200.0);
        let children = [ChildSnapshot::new(Rect::new(0.0, 0.0, extent.width, extent.height))];
        let placements = scroll.arrange(content, &children);
        scroll.measure(content, &children, &placements);
        scroll
    }

    fn tall() -> ScrollLayout {
        measured(ScrollConfig::default(), Size::new(100.0, 500.0))
    }

    #[test]
    fn drag_clamps_to_content_range() {
        let mut scroll = tall();
        scroll.touch_event(TouchEvent::Press, 50, 150, 0);
        assert!(scroll.touch_event(TouchEvent::Move, 50, -850, 0));
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -300.0));
    }

    #[test]
    fn drag_moves_offset_by_exact_delta() {
        let mut scroll = tall();
        assert!(!scroll.touch_event(TouchEvent::Press, 10, 100, 0));
        assert!(scroll.touch_event(TouchEvent::Move, 10, 50, 0));
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -50.0));

        scroll.scroll_to(Point::new(0.0, -100.0));
        assert!(scroll.touch_event(TouchEvent::Move, 10, 100, 0));
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -50.0));
    }

    #[test]
    fn dragging_past_the_top_clamps_to_zero() {
        let mut scroll = tall();
        scroll.touch_event(TouchEvent::Press, 10, 10, 0);
        scroll.touch_event(TouchEvent::Move, 10, 90, 0);
        assert_eq!(scroll.scroll_offset(), Point::ORIGIN);
    }

    #[test]
    fn content_smaller_than_viewport_never_scrolls() {
        let mut scroll = measured(ScrollConfig::default(), Size::new(50.0, 50.0));
        scroll.touch_event(TouchEvent::Press, 10, 100, 0);
        assert!(scroll.touch_event(TouchEvent::Move, 10, 0, 0));
        assert_eq!(scroll.scroll_offset(), Point::ORIGIN);
    }

    #[test]
    fn larger_first_delta_locks_the_axis() {
        let mut scroll = measured(ScrollConfig::default(), Size::new(500.0, 500.0));
        scroll.touch_event(TouchEvent::Press, 50, 50, 0);
        scroll.touch_event(TouchEvent::Move, 60, 20, 0);
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -30.0));

        // Horizontal movement is ignored for the rest of the session.
        scroll.touch_event(TouchEvent::Move, 0, 20, 0);
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -30.0));

        // A new session can lock the other axis.
        scroll.touch_event(TouchEvent::Release, 0, 20, 0);
        scroll.touch_event(TouchEvent::Press, 50, 50, 0);
        scroll.touch_event(TouchEvent::Move, 10, 45, 0);
        assert_eq!(scroll.scroll_offset(), Point::new(-40.0, -30.0));
    }

    #[test]
    fn diagonal_first_move_locks_the_scrollable_axis() {
        let mut scroll = tall();
        scroll.touch_event(TouchEvent::Press, 50, 90, 0);
        assert!(scroll.touch_event(TouchEvent::Move, 52, 89, 0));
        assert!(scroll.touch_event(TouchEvent::Move, 52, 40, 0));
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -50.0));

        let mut wide = measured(ScrollConfig::default(), Size::new(400.0, 100.0));
        wide.touch_event(TouchEvent::Press, 50, 50, 0);
        wide.touch_event(TouchEvent::Move, 51, 40, 0);
        wide.touch_event(TouchEvent::Move, 21, 40, 0);
        assert_eq!(wide.scroll_offset(), Point::new(-30.0, 0.0));
    }

    #[test]
    fn single_axis_direction_ignores_other_axis() {
        let config = ScrollConfig {
            direction: ScrollDirection::Horizontal,
            ..ScrollConfig::default()
        };
        let mut scroll = measured(config, Size::new(500.0, 500.0));
        scroll.touch_event(TouchEvent::Press, 50, 50, 0);
        scroll.touch_event(TouchEvent::Move, 45, 0, 0);
        assert_eq!(scroll.scroll_offset(), Point::new(-5.0, 0.0));
        assert_eq!(scroll.min_offset().y, 0.0);
    }

    #[test]
    fn tap_is_not_consumed_and_resets_state() {
        let mut scroll = tall();
        scroll.touch_event(TouchEvent::Press, 10, 10, 0);
        assert!(scroll.is_dragging());
        assert!(!scroll.touch_event(TouchEvent::Release, 10, 10, 0));
        assert!(!scroll.is_dragging());
        assert!(!scroll.touch_event(TouchEvent::Move, 10, 50, 0));
    }

    #[test]
    fn drag_release_is_consumed() {
        let mut scroll = tall();
        scroll.touch_event(TouchEvent::Press, 10, 100, 0);
        scroll.touch_event(TouchEvent::Move, 10, 80, 0);
        assert!(scroll.touch_event(TouchEvent::Release, 10, 80, 0));
    }

    #[test]
    fn other_contacts_are_ignored_during_a_drag() {
        let mut scroll = tall();
        scroll.touch_event(TouchEvent::Press, 10, 100, 0);
        assert!(!scroll.touch_event(TouchEvent::Press, 20, 100, 1));
        assert!(!scroll.touch_event(TouchEvent::Move, 20, 10, 1));
        assert!(!scroll.touch_event(TouchEvent::Release, 20, 10, 1));
        assert_eq!(scroll.scroll_offset(), Point::ORIGIN);
        assert!(scroll.is_dragging());
    }

    #[test]
    fn inertia_decays_to_rest() {
        let config = ScrollConfig {
            friction: 0.5,
            min_velocity: 1.0,
            ..ScrollConfig::default()
        };
        let mut scroll = measured(config, Size::new(100.0, 1000.0));
        scroll.touch_event(TouchEvent::Press, 10, 100, 0);
        scroll.touch_event(TouchEvent::Move, 10, 80, 0);
        scroll.touch_event(TouchEvent::Release, 10, 80, 0);
        assert_eq!(scroll.velocity(), Point::new(0.0, -20.0));

        for _ in 0..10 {
            scroll.advance_frame();
        }
        assert_eq!(scroll.velocity(), Point::ORIGIN);
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -20.0 - 38.75));
    }

    #[test]
    fn inertia_stops_at_the_edge() {
        let mut scroll = tall();
        scroll.scroll_to(Point::new(0.0, -290.0));
        scroll.touch_event(TouchEvent::Press, 10, 100, 0);
        scroll.touch_event(TouchEvent::Move, 10, 95, 0);
        scroll.touch_event(TouchEvent::Release, 10, 95, 0);
        for _ in 0..3 {
            scroll.advance_frame();
        }
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -300.0));
        assert_eq!(scroll.velocity(), Point::ORIGIN);
    }

    #[test]
    fn cancel_drops_velocity() {
        let mut scroll = tall();
        scroll.touch_event(TouchEvent::Press, 10, 100, 0);
        scroll.touch_event(TouchEvent::Move, 10, 80, 0);
        scroll.touch_event(TouchEvent::Cancel, 10, 80, 0);
        assert_eq!(scroll.velocity(), Point::ORIGIN);
        scroll.advance_frame();
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -20.0));
    }

    #[test]
    fn no_inertia_when_disabled() {
        let config = ScrollConfig {
            inertia: false,
            ..ScrollConfig::default()
        };
        let mut scroll = measured(config, Size::new(100.0, 500.0));
        scroll.touch_event(TouchEvent::Press, 10, 100, 0);
        scroll.touch_event(TouchEvent::Move, 10, 80, 0);
        scroll.touch_event(TouchEvent::Release, 10, 80, 0);
        scroll.advance_frame();
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -20.0));
    }

    #[test]
    fn elastic_overscroll_springs_back() {
        let config = ScrollConfig {
            overscroll: Overscroll::Elastic { limit: 40.0 },
            spring: 0.5,
            inertia: false,
            ..ScrollConfig::default()
        };
        let mut scroll = measured(config, Size::new(100.0, 500.0));
        scroll.touch_event(TouchEvent::Press, 10, 10, 0);
        scroll.touch_event(TouchEvent::Move, 10, 110, 0);
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, 40.0));

        // Held in place while the finger is down.
        scroll.advance_frame();
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, 40.0));

        scroll.touch_event(TouchEvent::Release, 10, 110, 0);
        scroll.advance_frame();
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, 20.0));
        for _ in 0..10 {
            scroll.advance_frame();
        }
        assert_eq!(scroll.scroll_offset(), Point::ORIGIN);
    }

    #[test]
    fn shrinking_content_pulls_offset_back_into_range() {
        let mut scroll = tall();
        scroll.scroll_to(Point::new(0.0, -300.0));

        let content = Rect::new(0.0, 0.0, 100.0, 200.0);
        let children = [ChildSnapshot::new(Rect::new(0.0, 0.0, 100.0, 250.0))];
        let placements = scroll.arrange(content, &children);
        scroll.measure(content, &children, &placements);
        scroll.advance_frame();
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -50.0));
    }

    #[test]
    fn scroll_to_clamps_and_sanitizes() {
        let mut scroll = tall();
        scroll.scroll_to(Point::new(-20.0, -1000.0));
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -300.0));
        scroll.scroll_to(Point::new(f32::NAN, 5.0));
        assert_eq!(scroll.scroll_offset(), Point::ORIGIN);
        scroll.scroll_by(Point::new(0.0, -10.0));
        assert_eq!(scroll.scroll_offset(), Point::new(0.0, -10.0));
    }

    #[test]
    fn horizontal_arrangement_places_a_single_row() {
        let config = ScrollConfig {
            arrangement: ScrollArrangement::Horizontal,
            spacing: 2.0,
            ..ScrollConfig::default()
        };
        let scroll = ScrollLayout::from_config(config);
        let content = Rect::new(0.0, 0.0, 50.0, 40.0);
        let children = [
            ChildSnapshot::new(Rect::new(0.0, 0.0, 40.0, 10.0)),
            ChildSnapshot::new(Rect::new(0.0, 0.0, 40.0, 10.0)).align(Alignment::CENTER),
        ];
        let placements = scroll.arrange(content, &children);
        assert_eq!(placements[0], Some(Rect::new(0.0, 0.0, 40.0, 10.0)));
        // Alignment only moves the cross axis.
        assert_eq!(placements[1], Some(Rect::new(42.0, 15.0, 40.0, 10.0)));
    }

    #[test]
    fn measure_includes_trailing_margins() {
        let mut scroll = ScrollLayout::new();
        let content = Rect::new(10.0, 10.0, 100.0, 100.0);
        let children = [ChildSnapshot::new(Rect::new(20.0, 30.0, 50.0, 200.0))
            .margin(crate::primitives::Margin::all(5.0))];
        let placements = scroll.arrange(content, &children);
        scroll.measure(content, &children, &placements);
        assert_eq!(scroll.content_extent(), Size::new(65.0, 225.0));
        assert_eq!(scroll.min_offset(), Point::new(0.0, -125.0));
    }
}
