//! Control and container contracts.
//!
//! Layouts never own the controls they arrange. They see them through the
//! [`Control`] and [`Container`] traits, which the embedding UI (or the
//! reference host in [`crate::widget`]) implements.
//!
//! # Coordinate spaces
//!
//! - A control's *local* bounds are relative to its parent container's
//!   local origin (the parent's top-left corner, before border/padding).
//! - A container's content area is expressed in that same local space, so
//!   its origin sits at the border+padding insets.
//! - *Absolute* bounds are in window space: the local bounds translated by
//!   the offset the parent's layout was given, plus any scroll translation.

use serde::{Deserialize, Serialize};

use crate::layout::SharedLayout;
use crate::primitives::{Margin, Rect};

/// Horizontal placement of a control inside its alignment band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
    /// Stretch to the band width minus horizontal margins.
    Fill,
}

/// Vertical placement of a control inside its alignment band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
    /// Stretch to the band height minus vertical margins.
    Fill,
}

/// Per-axis alignment preference. `None` on an axis means the layout must
/// leave that coordinate (and size) exactly as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Alignment {
    pub horizontal: Option<HorizontalAlign>,
    pub vertical: Option<VerticalAlign>,
}

impl Alignment {
    /// No preference on either axis.
    pub const NONE: Self = Self::new(None, None);

    pub const TOP_LEFT: Self = Self::new(Some(HorizontalAlign::Left), Some(VerticalAlign::Top));
    pub const TOP_CENTER: Self = Self::new(Some(HorizontalAlign::Center), Some(VerticalAlign::Top));
    pub const TOP_RIGHT: Self = Self::new(Some(HorizontalAlign::Right), Some(VerticalAlign::Top));
    pub const CENTER_LEFT: Self = Self::new(Some(HorizontalAlign::Left), Some(VerticalAlign::Center));
    pub const CENTER: Self = Self::new(Some(HorizontalAlign::Center), Some(VerticalAlign::Center));
    pub const CENTER_RIGHT: Self = Self::new(Some(HorizontalAlign::Right), Some(VerticalAlign::Center));
    pub const BOTTOM_LEFT: Self = Self::new(Some(HorizontalAlign::Left), Some(VerticalAlign::Bottom));
    pub const BOTTOM_CENTER: Self =
        Self::new(Some(HorizontalAlign::Center), Some(VerticalAlign::Bottom));
    pub const BOTTOM_RIGHT: Self = Self::new(Some(HorizontalAlign::Right), Some(VerticalAlign::Bottom));

    /// Stretch on both axes.
    pub const FILL: Self = Self::new(Some(HorizontalAlign::Fill), Some(VerticalAlign::Fill));
    /// Stretch horizontally, leave the vertical axis alone.
    pub const FILL_WIDTH: Self = Self::new(Some(HorizontalAlign::Fill), None);
    /// Stretch vertically, leave the horizontal axis alone.
    pub const FILL_HEIGHT: Self = Self::new(None, Some(VerticalAlign::Fill));

    pub const fn new(horizontal: Option<HorizontalAlign>, vertical: Option<VerticalAlign>) -> Self {
        Self { horizontal, vertical }
    }

    /// Whether either axis carries a preference.
    pub fn is_set(&self) -> bool {
        self.horizontal.is_some() || self.vertical.is_some()
    }
}

/// A rectangular UI element a layout can position.
pub trait Control {
    /// Identifier used for hit-testing results and logging.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Local bounds. The size is the control's desired size.
    fn bounds(&self) -> Rect;

    fn set_bounds(&mut self, bounds: Rect);

    /// Window-space bounds from the last layout pass.
    fn absolute_bounds(&self) -> Rect;

    fn set_absolute_bounds(&mut self, bounds: Rect);

    fn margin(&self) -> Margin {
        Margin::ZERO
    }

    fn alignment(&self) -> Alignment {
        Alignment::NONE
    }

    fn is_visible(&self) -> bool {
        true
    }

    /// Downcast to a container when this control hosts children.
    fn as_container(&self) -> Option<&dyn Container> {
        None
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        None
    }
}

/// A control that owns an ordered list of child controls and a layout.
///
/// Child order is arrangement order. Implementations must not mutate the
/// child list while a layout pass or touch dispatch is running.
pub trait Container: Control {
    /// Content area in the container's local space (inside border and
    /// padding). Independent of any scroll offset.
    fn content_bounds(&self) -> Rect;

    fn children<'a>(&'a self) -> Box<dyn Iterator<Item = &'a dyn Control> + 'a>;

    fn children_mut<'a>(&'a mut self) -> Box<dyn Iterator<Item = &'a mut dyn Control> + 'a>;

    /// The layout attached to this container.
    fn layout(&self) -> SharedLayout;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_alignment_is_unset() {
        assert!(!Alignment::default().is_set());
        assert_eq!(Alignment::default(), Alignment::NONE);
        assert!(Alignment::FILL_WIDTH.is_set());
    }

    #[test]
    fn alignment_deserializes_from_snake_case() {
        let alignment: Alignment =
            serde_json::from_str(r#"{"horizontal":"center","vertical":"fill"}"#).unwrap();
        assert_eq!(
            alignment,
            Alignment::new(Some(HorizontalAlign::Center), Some(VerticalAlign::Fill))
        );

        let partial: Alignment = serde_json::from_str(r#"{"vertical":"bottom"}"#).unwrap();
        assert_eq!(partial.horizontal, None);
    }
}
