//! Trellis: layout engine for in-game UI forms.
//!
//! Every container owns one layout policy that positions its child
//! controls once per frame:
//!
//! - **Flow** lays children left to right and wraps into rows.
//! - **Vertical** stacks them top to bottom.
//! - **Absolute** leaves authored positions alone.
//! - **Scroll** lets content overflow and turns touch drags into a scroll
//!   offset, with optional inertia and elastic edges.
//!
//! Layouts see controls only through the [`Control`] and [`Container`]
//! traits. [`Panel`], [`Widget`] and [`Form`] are a small reference host
//! that implements them.
//!
//! # Usage
//!
//! ```ignore
//! use trellis::{Form, LayoutType, Panel, Rect, TouchEvent, Widget};
//!
//! let list = Panel::new("list", LayoutType::Scroll)
//!     .bounds(Rect::new(0.0, 0.0, 320.0, 240.0))
//!     .push(Widget::new("row").size(320.0, 900.0));
//! let mut form = Form::new(list);
//!
//! form.update();
//! form.touch_event(TouchEvent::Press, 100, 200, 0);
//! form.touch_event(TouchEvent::Move, 100, 120, 0);
//! form.touch_event(TouchEvent::Release, 100, 120, 0);
//! form.update();
//! ```

// Core primitives
pub mod primitives;
pub mod error;

// Control contracts and reference host
pub mod control;
pub mod widget;
pub mod form;

// Layout policies and their options
pub mod layout;
pub mod config;

// Input and entry points
pub mod touch;
pub mod host;

pub use primitives::{Insets, Margin, Point, Rect, Size};
pub use error::LayoutError;
pub use control::{Alignment, Container, Control, HorizontalAlign, VerticalAlign};
pub use layout::{
    AbsoluteLayout, Axes, ChildSnapshot, FlowLayout, Layout, LayoutType, Placements,
    ScrollArrangement, ScrollDirection, ScrollLayout, SharedLayout, VerticalLayout,
    align_within, aligned_bounds,
};
pub use config::{FlowConfig, LayoutConfig, Overscroll, ScrollConfig, VerticalConfig};
pub use touch::{TouchCapture, TouchEvent};
pub use host::{dispatch_touch, run_layout};
pub use widget::{Panel, Widget};
pub use form::Form;
