//! Layout policies.
//!
//! A container picks one of four policies and the layout pass runs it once
//! per frame:
//!
//! ```text
//! snapshot children -> arrange (pure) -> commit bounds -> recurse into child containers
//! ```
//!
//! Arrangement works on [`ChildSnapshot`]s, so every policy is a pure
//! function of the container's content area and its children. Only the
//! commit step touches controls.

pub mod absolute;
pub mod align;
pub mod flow;
pub mod scroll;
pub mod vertical;

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::control::{Alignment, Container, Control};
use crate::error::LayoutError;
use crate::host::run_layout;
use crate::primitives::{Margin, Point, Rect, Size};
use crate::touch::TouchEvent;

pub use absolute::AbsoluteLayout;
pub use align::{Axes, align_within, aligned_bounds};
pub use flow::FlowLayout;
pub use scroll::{ScrollArrangement, ScrollDirection, ScrollLayout};
pub use vertical::VerticalLayout;

// =========================================================================
// LayoutType
// =========================================================================

/// The policy a container selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    /// Left to right, wrapping to a new row at the right edge.
    Flow,
    /// Top to bottom, never wrapping.
    Vertical,
    /// Controls keep their authored bounds.
    Absolute,
    /// Children may extend past the container and are dragged into view.
    Scroll,
}

impl LayoutType {
    /// Name used by UI descriptors.
    pub fn descriptor_name(&self) -> &'static str {
        match self {
            LayoutType::Flow => "LAYOUT_FLOW",
            LayoutType::Vertical => "LAYOUT_VERTICAL",
            LayoutType::Absolute => "LAYOUT_ABSOLUTE",
            LayoutType::Scroll => "LAYOUT_SCROLL",
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor_name())
    }
}

impl FromStr for LayoutType {
    type Err = LayoutError;

    /// Accepts `flow` as well as the descriptor form `LAYOUT_FLOW`,
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_prefix("layout_").unwrap_or(&name);
        match name {
            "flow" => Ok(LayoutType::Flow),
            "vertical" => Ok(LayoutType::Vertical),
            "absolute" => Ok(LayoutType::Absolute),
            "scroll" => Ok(LayoutType::Scroll),
            _ => Err(LayoutError::UnknownLayoutType(s.to_string())),
        }
    }
}

// =========================================================================
// Layout
// =========================================================================

/// A layout policy. Only [`ScrollLayout`] carries state.
#[derive(Debug, Clone)]
pub enum Layout {
    Flow(FlowLayout),
    Vertical(VerticalLayout),
    Absolute(AbsoluteLayout),
    Scroll(ScrollLayout),
}

impl Layout {
    /// Create a layout of the given type with default options.
    pub fn new(layout_type: LayoutType) -> Self {
        match layout_type {
            LayoutType::Flow => Layout::Flow(FlowLayout::new()),
            LayoutType::Vertical => Layout::Vertical(VerticalLayout::new()),
            LayoutType::Absolute => Layout::Absolute(AbsoluteLayout),
            LayoutType::Scroll => Layout::Scroll(ScrollLayout::new()),
        }
    }

    /// Build a layout from a validated config.
    pub fn from_config(config: &LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(match config {
            LayoutConfig::Flow(flow) => Layout::Flow(FlowLayout::from_config(flow)),
            LayoutConfig::Vertical(vertical) => {
                Layout::Vertical(VerticalLayout::from_config(vertical))
            }
            LayoutConfig::Absolute => Layout::Absolute(AbsoluteLayout),
            LayoutConfig::Scroll(scroll) => Layout::Scroll(ScrollLayout::from_config(scroll.clone())),
        })
    }

    /// The policy this layout implements. Fixed at construction.
    pub fn layout_type(&self) -> LayoutType {
        match self {
            Layout::Flow(_) => LayoutType::Flow,
            Layout::Vertical(_) => LayoutType::Vertical,
            Layout::Absolute(_) => LayoutType::Absolute,
            Layout::Scroll(_) => LayoutType::Scroll,
        }
    }

    /// Axes that [`Layout::align`] may adjust. The rest are owned by the
    /// primary arrangement rule.
    pub fn free_axes(&self) -> Axes {
        match self {
            // Flow aligns inside each row band during `update` instead.
            Layout::Flow(_) => Axes::NONE,
            Layout::Vertical(_) => Axes::HORIZONTAL,
            Layout::Absolute(_) => Axes::BOTH,
            Layout::Scroll(scroll) => scroll.arrangement().free_axes(),
        }
    }

    /// Align a control within the container's content area along the
    /// axes this policy leaves free. Pure and idempotent.
    pub fn align(&self, control: &mut dyn Control, container: &dyn Container) {
        align_within(control, container.content_bounds().sanitized(), self.free_axes());
    }

    /// Scroll state accessor.
    pub fn as_scroll(&self) -> Option<&ScrollLayout> {
        match self {
            Layout::Scroll(scroll) => Some(scroll),
            _ => None,
        }
    }

    pub fn as_scroll_mut(&mut self) -> Option<&mut ScrollLayout> {
        match self {
            Layout::Scroll(scroll) => Some(scroll),
            _ => None,
        }
    }

    /// Position every visible child of `container` and recurse into child
    /// containers. `offset` is the window-space position of the
    /// container's local origin.
    pub(crate) fn update(&mut self, container: &mut dyn Container, offset: Point) {
        let content = container.content_bounds().sanitized();
        let children = snapshot_children(container);
        if children.is_empty() {
            return;
        }

        let (placements, translation) = match self {
            Layout::Flow(flow) => (flow.arrange(content, &children), Point::ORIGIN),
            Layout::Vertical(vertical) => (vertical.arrange(content, &children), Point::ORIGIN),
            Layout::Absolute(absolute) => (absolute.arrange(content, &children), Point::ORIGIN),
            Layout::Scroll(scroll) => {
                let placements = scroll.arrange(content, &children);
                scroll.measure(content, &children, &placements);
                scroll.advance_frame();
                (placements, scroll.scroll_offset())
            }
        };

        tracing::trace!(
            "{} pass: {} children in {:?}",
            self.layout_type(),
            children.len(),
            content
        );

        commit(container, &placements, offset + translation);
    }

    /// Interpret a touch event. Coordinates are relative to the
    /// container's content-area origin. Returns whether the event was
    /// consumed.
    pub(crate) fn touch_event(&mut self, event: TouchEvent, x: i32, y: i32, contact_index: u32) -> bool {
        match self {
            Layout::Scroll(scroll) => scroll.touch_event(event, x, y, contact_index),
            Layout::Flow(_) | Layout::Vertical(_) | Layout::Absolute(_) => false,
        }
    }
}

// =========================================================================
// SharedLayout
// =========================================================================

#[derive(Debug)]
struct LayoutCell {
    layout: RefCell<Layout>,
    attached: Cell<bool>,
}

/// Shared ownership of a layout.
///
/// Several holders may keep a handle (a container and a form, say), but a
/// layout is attached to at most one container at a time: two containers
/// driving one scroll layout would interleave their gestures.
#[derive(Debug, Clone)]
pub struct SharedLayout(Rc<LayoutCell>);

impl SharedLayout {
    pub fn new(layout: Layout) -> Self {
        Self(Rc::new(LayoutCell {
            layout: RefCell::new(layout),
            attached: Cell::new(false),
        }))
    }

    /// A new layout, already attached to the container creating it.
    pub(crate) fn claimed(layout: Layout) -> Self {
        let shared = Self::new(layout);
        shared.0.attached.set(true);
        shared
    }

    pub fn from_type(layout_type: LayoutType) -> Self {
        Self::new(Layout::new(layout_type))
    }

    pub fn from_config(config: &LayoutConfig) -> Result<Self, LayoutError> {
        Ok(Self::new(Layout::from_config(config)?))
    }

    /// Claim this layout for a container.
    pub fn attach(&self) -> Result<(), LayoutError> {
        if self.0.attached.replace(true) {
            return Err(LayoutError::AlreadyAttached);
        }
        Ok(())
    }

    /// Release the claim taken by [`SharedLayout::attach`].
    pub fn detach(&self) {
        self.0.attached.set(false);
    }

    pub fn is_attached(&self) -> bool {
        self.0.attached.get()
    }

    pub fn layout_type(&self) -> LayoutType {
        self.0.layout.borrow().layout_type()
    }

    /// Current scroll offset, for scroll layouts.
    pub fn scroll_offset(&self) -> Option<Point> {
        self.0.layout.borrow().as_scroll().map(ScrollLayout::scroll_offset)
    }

    /// Jump a scroll layout to `offset` (clamped to the range measured by
    /// the last pass). Returns false for other layouts or while a pass is
    /// running.
    pub fn scroll_to(&self, offset: Point) -> bool {
        let Some(mut layout) = self.try_borrow_mut() else {
            tracing::warn!("scroll_to during a layout pass, ignoring");
            return false;
        };
        match layout.as_scroll_mut() {
            Some(scroll) => {
                scroll.scroll_to(offset);
                true
            }
            None => false,
        }
    }

    pub fn borrow(&self) -> Ref<'_, Layout> {
        self.0.layout.borrow()
    }

    /// Mutable access for configuration (e.g. `scroll_to`). Must not be
    /// held across a layout pass.
    pub fn borrow_mut(&self) -> RefMut<'_, Layout> {
        self.0.layout.borrow_mut()
    }

    pub(crate) fn try_borrow_mut(&self) -> Option<RefMut<'_, Layout>> {
        self.0.layout.try_borrow_mut().ok()
    }

    pub fn ptr_eq(&self, other: &SharedLayout) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// =========================================================================
// Arrangement helpers
// =========================================================================

/// What a policy needs to know about one child, read before arranging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildSnapshot {
    pub visible: bool,
    pub bounds: Rect,
    pub margin: Margin,
    pub alignment: Alignment,
}

impl ChildSnapshot {
    pub fn new(bounds: Rect) -> Self {
        Self {
            visible: true,
            bounds,
            margin: Margin::ZERO,
            alignment: Alignment::NONE,
        }
    }

    pub fn of(control: &dyn Control) -> Self {
        Self {
            visible: control.is_visible(),
            bounds: control.bounds().sanitized(),
            margin: control.margin().sanitized(),
            alignment: control.alignment(),
        }
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Size including margins.
    pub fn outer_size(&self) -> Size {
        Size::new(
            self.bounds.width + self.margin.horizontal(),
            self.bounds.height + self.margin.vertical(),
        )
    }
}

/// One entry per child, in child order. `None` marks a skipped child.
pub type Placements = Vec<Option<Rect>>;

pub(crate) fn snapshot_children(container: &dyn Container) -> Vec<ChildSnapshot> {
    container.children().map(ChildSnapshot::of).collect()
}

/// Fallback for a content area with no room: every visible child sits at
/// the content origin with its own size.
pub(crate) fn stack_at_origin(content: Rect, children: &[ChildSnapshot]) -> Placements {
    children
        .iter()
        .map(|child| child.visible.then(|| child.bounds.with_origin(content.origin())))
        .collect()
}

/// Write placements back to the children and run nested layouts.
fn commit(container: &mut dyn Container, placements: &[Option<Rect>], translation: Point) {
    for (child, placement) in container.children_mut().zip(placements) {
        let Some(bounds) = *placement else {
            continue;
        };
        if child.bounds() != bounds {
            child.set_bounds(bounds);
        }
        let absolute = bounds.translate(translation);
        child.set_absolute_bounds(absolute);
        if let Some(nested) = child.as_container_mut() {
            run_layout(nested, absolute.origin());
        }
    }
}
