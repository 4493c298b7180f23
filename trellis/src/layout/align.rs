//! Alignment of a single control inside a band.
//!
//! Every layout funnels its secondary-axis placement through
//! [`aligned_bounds`]: Vertical aligns horizontally against the content
//! area, Flow aligns vertically against each row, Absolute aligns both
//! axes. The function is pure, so applying it twice gives the same rect.

use crate::control::{Alignment, Control, HorizontalAlign, VerticalAlign};
use crate::primitives::{Margin, Rect};

/// Axes an alignment pass is allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axes {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Axes {
    pub const NONE: Self = Self { horizontal: false, vertical: false };
    pub const HORIZONTAL: Self = Self { horizontal: true, vertical: false };
    pub const VERTICAL: Self = Self { horizontal: false, vertical: true };
    pub const BOTH: Self = Self { horizontal: true, vertical: true };
}

/// Compute where `bounds` lands when aligned inside `band`.
///
/// Margins are honored on every rule: the result never starts inside the
/// leading margin, and `Fill` shrinks the size by both margins. A control
/// larger than its band is pinned to the leading margin.
pub fn aligned_bounds(
    bounds: Rect,
    margin: Margin,
    alignment: Alignment,
    band: Rect,
    axes: Axes,
) -> Rect {
    let mut rect = bounds;

    if axes.horizontal {
        if let Some(rule) = alignment.horizontal {
            let (x, width) = align_span(
                match rule {
                    HorizontalAlign::Left => Span::Start,
                    HorizontalAlign::Center => Span::Center,
                    HorizontalAlign::Right => Span::End,
                    HorizontalAlign::Fill => Span::Fill,
                },
                band.x,
                band.width,
                margin.left,
                margin.right,
                rect.width,
            );
            rect.x = x;
            rect.width = width;
        }
    }

    if axes.vertical {
        if let Some(rule) = alignment.vertical {
            let (y, height) = align_span(
                match rule {
                    VerticalAlign::Top => Span::Start,
                    VerticalAlign::Center => Span::Center,
                    VerticalAlign::Bottom => Span::End,
                    VerticalAlign::Fill => Span::Fill,
                },
                band.y,
                band.height,
                margin.top,
                margin.bottom,
                rect.height,
            );
            rect.y = y;
            rect.height = height;
        }
    }

    rect
}

/// Align a control in place. See [`aligned_bounds`].
pub fn align_within(control: &mut dyn Control, band: Rect, axes: Axes) {
    let alignment = control.alignment();
    if !alignment.is_set() {
        return;
    }
    let bounds = control.bounds().sanitized();
    let aligned = aligned_bounds(bounds, control.margin().sanitized(), alignment, band, axes);
    if aligned != bounds {
        control.set_bounds(aligned);
    }
}

#[derive(Clone, Copy)]
enum Span {
    Start,
    Center,
    End,
    Fill,
}

/// One-axis alignment: returns (position, length).
fn align_span(
    span: Span,
    band_start: f32,
    band_len: f32,
    lead: f32,
    trail: f32,
    len: f32,
) -> (f32, f32) {
    let min_pos = band_start + lead;
    let available = (band_len - lead - trail).max(0.0);
    match span {
        Span::Start => (min_pos, len),
        Span::Center => ((min_pos + (available - len) / 2.0).max(min_pos), len),
        Span::End => ((band_start + band_len - trail - len).max(min_pos), len),
        Span::Fill => (min_pos, available),
    }
}
