//! Entry points for layout hosts.
//!
//! [`Layout::update`](crate::layout::Layout) and its touch handler are
//! crate-private; containers and the input dispatcher reach them only
//! through these functions.

use crate::control::Container;
use crate::primitives::Point;
use crate::touch::TouchEvent;

/// Run `container`'s layout. `offset` is the window-space position of the
/// container's local origin (its top-left corner).
///
/// Never panics: a non-finite offset is replaced with zero, and a layout
/// that is already mid-pass (reachable twice in one tree) is skipped.
pub fn run_layout(container: &mut dyn Container, offset: Point) {
    let offset = if offset.is_finite() {
        offset
    } else {
        tracing::warn!("non-finite layout offset {:?}, using zero", offset);
        offset.sanitized()
    };

    let shared = container.layout();
    let Some(mut layout) = shared.try_borrow_mut() else {
        tracing::warn!(
            "layout for {:?} is already borrowed, skipping this pass",
            container.id()
        );
        return;
    };
    layout.update(container, offset);
}

/// Forward a touch event to `container`'s layout. Coordinates are relative
/// to the container's content-area origin. Returns whether it was consumed.
pub fn dispatch_touch(
    container: &dyn Container,
    event: TouchEvent,
    x: i32,
    y: i32,
    contact_index: u32,
) -> bool {
    let shared = container.layout();
    let Some(mut layout) = shared.try_borrow_mut() else {
        return false;
    };
    layout.touch_event(event, x, y, contact_index)
}
