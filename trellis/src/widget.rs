//! Reference controls.
//!
//! `Widget` is a plain leaf control (a button or label stand-in) and
//! `Panel` a container with border, padding and an attached layout. Both
//! are built with chained setters:
//!
//! ```ignore
//! let panel = Panel::new("list", LayoutType::Vertical)
//!     .bounds(Rect::new(0.0, 0.0, 200.0, 400.0))
//!     .padding(Insets::all(4.0))
//!     .push(Widget::new("ok").size(80.0, 24.0))
//!     .push(Widget::new("cancel").size(80.0, 24.0));
//! ```

use crate::control::{Alignment, Container, Control};
use crate::error::LayoutError;
use crate::layout::{Layout, LayoutType, SharedLayout};
use crate::primitives::{Insets, Margin, Rect};

// =========================================================================
// Widget
// =========================================================================

/// A leaf control.
#[derive(Debug, Clone)]
pub struct Widget {
    id: String,
    bounds: Rect,
    absolute_bounds: Rect,
    margin: Margin,
    alignment: Alignment,
    visible: bool,
}

impl Widget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bounds: Rect::ZERO,
            absolute_bounds: Rect::ZERO,
            margin: Margin::ZERO,
            alignment: Alignment::NONE,
            visible: true,
        }
    }

    /// Set the authored bounds.
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the desired size, keeping the position.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.bounds.width = width;
        self.bounds.height = height;
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

impl Control for Widget {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn absolute_bounds(&self) -> Rect {
        self.absolute_bounds
    }

    fn set_absolute_bounds(&mut self, bounds: Rect) {
        self.absolute_bounds = bounds;
    }

    fn margin(&self) -> Margin {
        self.margin
    }

    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

// =========================================================================
// Panel
// =========================================================================

/// A container control. Owns its children and holds the only attachment
/// of its layout; dropping the panel releases the layout.
pub struct Panel {
    id: String,
    bounds: Rect,
    absolute_bounds: Rect,
    margin: Margin,
    alignment: Alignment,
    visible: bool,
    border: Insets,
    padding: Insets,
    children: Vec<Box<dyn Control>>,
    layout: SharedLayout,
}

impl Panel {
    /// Create a panel with a fresh layout of the given type.
    pub fn new(id: impl Into<String>, layout_type: LayoutType) -> Self {
        Self::with_attached(id.into(), SharedLayout::claimed(Layout::new(layout_type)))
    }

    /// Create a panel around an existing layout, claiming it.
    pub fn with_layout(id: impl Into<String>, layout: SharedLayout) -> Result<Self, LayoutError> {
        layout.attach()?;
        Ok(Self::with_attached(id.into(), layout))
    }

    fn with_attached(id: String, layout: SharedLayout) -> Self {
        Self {
            id,
            bounds: Rect::ZERO,
            absolute_bounds: Rect::ZERO,
            margin: Margin::ZERO,
            alignment: Alignment::NONE,
            visible: true,
            border: Insets::ZERO,
            padding: Insets::ZERO,
            children: Vec::new(),
            layout,
        }
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn border(mut self, border: Insets) -> Self {
        self.border = border;
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Add any child control.
    pub fn push(mut self, child: impl Control + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn add_child(&mut self, child: Box<dyn Control>) {
        self.children.push(child);
    }

    /// Remove and return the child at `index`.
    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn Control>> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Swap in another layout. The new one is claimed before the old one is
    /// released, so on error the panel keeps its current layout.
    pub fn set_layout(&mut self, layout: SharedLayout) -> Result<(), LayoutError> {
        if layout.ptr_eq(&self.layout) {
            return Ok(());
        }
        layout.attach()?;
        let previous = std::mem::replace(&mut self.layout, layout);
        previous.detach();
        Ok(())
    }

    /// Replace the layout with a fresh one of the given type.
    pub fn set_layout_type(&mut self, layout_type: LayoutType) {
        let layout = SharedLayout::claimed(Layout::new(layout_type));
        std::mem::replace(&mut self.layout, layout).detach();
        tracing::debug!("{} switched to {}", self.id, layout_type);
    }

    /// Depth-first search for a descendant (or self) by id.
    pub fn find(&self, id: &str) -> Option<&dyn Control> {
        if self.id == id {
            return Some(self);
        }
        find_in(self, id)
    }
}

fn find_in<'a>(container: &'a dyn Container, id: &str) -> Option<&'a dyn Control> {
    for child in container.children() {
        if child.id() == Some(id) {
            return Some(child);
        }
        if let Some(found) = child.as_container().and_then(|nested| find_in(nested, id)) {
            return Some(found);
        }
    }
    None
}

impl Drop for Panel {
    fn drop(&mut self) {
        self.layout.detach();
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("bounds", &self.bounds)
            .field("layout", &self.layout.layout_type())
            .field("children", &self.children.len())
            .finish()
    }
}

impl Control for Panel {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn absolute_bounds(&self) -> Rect {
        self.absolute_bounds
    }

    fn set_absolute_bounds(&mut self, bounds: Rect) {
        self.absolute_bounds = bounds;
    }

    fn margin(&self) -> Margin {
        self.margin
    }

    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn as_container(&self) -> Option<&dyn Container> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        Some(self)
    }
}

impl Container for Panel {
    fn content_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.bounds.width, self.bounds.height)
            .inset(self.border.combine(self.padding))
    }

    fn children<'a>(&'a self) -> Box<dyn Iterator<Item = &'a dyn Control> + 'a> {
        Box::new(self.children.iter().map(|child| &**child as &dyn Control))
    }

    fn children_mut<'a>(&'a mut self) -> Box<dyn Iterator<Item = &'a mut dyn Control> + 'a> {
        Box::new(self.children.iter_mut().map(|child| &mut **child as &mut dyn Control))
    }

    fn layout(&self) -> SharedLayout {
        self.layout.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_bounds_subtract_border_and_padding() {
        let panel = Panel::new("p", LayoutType::Flow)
            .bounds(Rect::new(40.0, 40.0, 100.0, 60.0))
            .border(Insets::all(1.0))
            .padding(Insets::new(2.0, 3.0, 4.0, 5.0));
        assert_eq!(panel.content_bounds(), Rect::new(6.0, 3.0, 90.0, 52.0));
    }

    #[test]
    fn panel_claims_and_releases_its_layout() {
        let layout = SharedLayout::from_type(LayoutType::Scroll);
        let panel = Panel::with_layout("a", layout.clone()).unwrap();
        assert!(layout.is_attached());
        assert!(matches!(
            Panel::with_layout("b", layout.clone()),
            Err(LayoutError::AlreadyAttached)
        ));
        drop(panel);
        assert!(!layout.is_attached());
        assert!(Panel::with_layout("b", layout).is_ok());
    }

    #[test]
    fn set_layout_keeps_current_on_error() {
        let shared = SharedLayout::from_type(LayoutType::Scroll);
        let _owner = Panel::with_layout("owner", shared.clone()).unwrap();
        let mut panel = Panel::new("p", LayoutType::Flow);
        let original = panel.layout();

        assert!(panel.set_layout(shared).is_err());
        assert!(panel.layout().ptr_eq(&original));

        panel.set_layout_type(LayoutType::Vertical);
        assert_eq!(panel.layout().layout_type(), LayoutType::Vertical);
        assert!(!original.is_attached());
    }

    #[test]
    fn find_searches_nested_panels() {
        let panel = Panel::new("root", LayoutType::Absolute)
            .push(Widget::new("a"))
            .push(Panel::new("inner", LayoutType::Vertical).push(Widget::new("b")));
        assert!(panel.find("b").is_some());
        assert_eq!(panel.find("inner").and_then(|c| c.id()), Some("inner"));
        assert!(panel.find("missing").is_none());
    }

    #[test]
    fn remove_child_out_of_range_is_none() {
        let mut panel = Panel::new("p", LayoutType::Flow).push(Widget::new("a"));
        assert!(panel.remove_child(3).is_none());
        assert_eq!(panel.remove_child(0).and_then(|c| c.id().map(str::to_owned)), Some("a".to_owned()));
        assert_eq!(panel.child_count(), 0);
    }
}
